use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_sets, string_set, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares filesystem-synchronized groups per target: which folders are
/// synchronized and their membership exceptions.
pub struct SynchronizedGroupsComparator;

impl Comparator for SynchronizedGroupsComparator {
    fn tag(&self) -> &str {
        "synchronized_groups"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);

            let left_paths =
                string_set(left_target.synchronized_groups.iter().map(|g| g.path.clone()));
            let right_paths =
                string_set(right_target.synchronized_groups.iter().map(|g| g.path.clone()));
            diffs.extend(diff_sets(&context, &left_paths, &right_paths));

            for left_group in &left_target.synchronized_groups {
                let Some(right_group) = right_target
                    .synchronized_groups
                    .iter()
                    .find(|g| g.path == left_group.path)
                else {
                    continue;
                };

                let mut group_context = context.clone();
                group_context.push(format!("Synchronized group \"{}\"", left_group.path));
                group_context.push("Exceptions".to_string());

                let left_exceptions = string_set(left_group.exceptions.iter().cloned());
                let right_exceptions = string_set(right_group.exceptions.iter().cloned());
                diffs.extend(diff_sets(&group_context, &left_exceptions, &right_exceptions));
            }
        }

        Ok(diffs)
    }
}
