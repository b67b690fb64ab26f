use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_sets, string_set, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares linked frameworks and libraries per target, including linkage
/// status changes.
pub struct LinkedDependenciesComparator;

impl Comparator for LinkedDependenciesComparator {
    fn tag(&self) -> &str {
        "linked_dependencies"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);

            let left_names =
                string_set(left_target.linked_dependencies.iter().map(|d| d.name.clone()));
            let right_names =
                string_set(right_target.linked_dependencies.iter().map(|d| d.name.clone()));
            diffs.extend(diff_sets(&context, &left_names, &right_names));

            for left_dep in &left_target.linked_dependencies {
                let Some(right_dep) = right_target
                    .linked_dependencies
                    .iter()
                    .find(|d| d.name == left_dep.name)
                else {
                    continue;
                };
                if left_dep.status != right_dep.status {
                    diffs.push(Difference::value_different(
                        context.clone(),
                        format!("{} (status)", left_dep.name),
                        left_dep.status.clone().unwrap_or_else(|| "required".to_string()),
                        right_dep.status.clone().unwrap_or_else(|| "required".to_string()),
                    ));
                }
            }
        }

        Ok(diffs)
    }
}
