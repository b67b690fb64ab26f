use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_sets, string_set, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares which targets exist and their product types.
pub struct TargetsComparator;

impl Comparator for TargetsComparator {
    fn tag(&self) -> &str {
        "targets"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let common = common_targets(left, right)?;

        let left_names = string_set(left.targets.iter().map(|t| t.name.clone()));
        let right_names = string_set(right.targets.iter().map(|t| t.name.clone()));
        let mut diffs = diff_sets(&[], &left_names, &right_names);

        for (left_target, right_target) in common {
            if left_target.product_type != right_target.product_type {
                diffs.push(Difference::value_different(
                    target_context(left_target),
                    "product type",
                    &left_target.product_type,
                    &right_target.product_type,
                ));
            }
        }

        Ok(diffs)
    }
}
