use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_sets, string_set, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares the resource membership of each target.
pub struct ResourcesComparator;

impl Comparator for ResourcesComparator {
    fn tag(&self) -> &str {
        "resources"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);
            let left_paths = string_set(left_target.resources.iter().cloned());
            let right_paths = string_set(right_target.resources.iter().cloned());
            diffs.extend(diff_sets(&context, &left_paths, &right_paths));
        }

        Ok(diffs)
    }
}
