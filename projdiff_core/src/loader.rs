use projdiff_common::{ProjDiffError, ProjectSnapshot};
use std::path::Path;
use tracing::debug;

/// Loads a project snapshot from a JSON file, or from YAML when the path
/// ends in `.yaml`/`.yml`.
pub fn load_snapshot(path: &Path) -> Result<ProjectSnapshot, ProjDiffError> {
    let content = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let snapshot: ProjectSnapshot = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yml::from_str(&content).map_err(|e| {
            ProjDiffError::Serialization(format!("Failed to parse {}: {e}", path.display()))
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            ProjDiffError::Serialization(format!("Failed to parse {}: {e}", path.display()))
        })?,
    };

    debug!(
        "Loaded snapshot '{}' with {} targets from {}",
        snapshot.name,
        snapshot.targets.len(),
        path.display()
    );
    Ok(snapshot)
}
