use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_sets, string_set, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares target-to-target dependency declarations.
pub struct DependenciesComparator;

impl Comparator for DependenciesComparator {
    fn tag(&self) -> &str {
        "dependencies"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);
            let left_deps = string_set(left_target.dependencies.iter().cloned());
            let right_deps = string_set(right_target.dependencies.iter().cloned());
            diffs.extend(diff_sets(&context, &left_deps, &right_deps));
        }

        Ok(diffs)
    }
}
