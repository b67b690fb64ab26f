use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_maps, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares project-level and target-level attribute maps.
pub struct AttributesComparator;

impl Comparator for AttributesComparator {
    fn tag(&self) -> &str {
        "attributes"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = diff_maps(
            &["Project".to_string()],
            &left.attributes,
            &right.attributes,
        );

        for (left_target, right_target) in common_targets(left, right)? {
            diffs.extend(diff_maps(
                &target_context(left_target),
                &left_target.attributes,
                &right_target.attributes,
            ));
        }

        Ok(diffs)
    }
}
