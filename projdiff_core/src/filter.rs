use projdiff_common::ProjectSnapshot;
use std::collections::BTreeSet;

/// Narrows a snapshot to the named targets and configurations before
/// comparison. `None` keeps everything; the comparator contract itself
/// stays a two-snapshot operation.
pub fn filter_snapshot(
    snapshot: &ProjectSnapshot,
    targets: Option<&BTreeSet<String>>,
    configurations: Option<&BTreeSet<String>>,
) -> ProjectSnapshot {
    let mut filtered = snapshot.clone();

    if let Some(targets) = targets {
        filtered.targets.retain(|t| targets.contains(&t.name));
    }

    if let Some(configurations) = configurations {
        filtered
            .configurations
            .retain(|c| configurations.contains(&c.name));
        for target in &mut filtered.targets {
            target
                .configurations
                .retain(|c| configurations.contains(&c.name));
        }
    }

    filtered
}
