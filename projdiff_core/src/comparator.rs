use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// A unit of behavior that detects differences in one facet of a project's
/// build description between two snapshots.
///
/// Implementations must not mutate the snapshots and must return an empty
/// list when the facet is identical. Failing is reserved for inputs the
/// comparator cannot interpret or for capability failures; two snapshots
/// merely being different is never an error.
///
/// Comparator instances are created per resolution and are assumed
/// stateless; do not share one instance across concurrent invocations
/// unless it is proven stateless.
pub trait Comparator: Send + Sync {
    /// Stable, non-empty identifier used to attribute this comparator's
    /// differences in the aggregated report.
    fn tag(&self) -> &str;

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError>;
}
