use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_sets, string_set, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares copy-files phases per target: phase presence (by name),
/// destination, and file membership.
pub struct CopyFilesComparator;

impl Comparator for CopyFilesComparator {
    fn tag(&self) -> &str {
        "copy_files"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);

            let left_names = string_set(left_target.copy_files.iter().map(|p| p.name.clone()));
            let right_names = string_set(right_target.copy_files.iter().map(|p| p.name.clone()));
            diffs.extend(diff_sets(&context, &left_names, &right_names));

            for left_phase in &left_target.copy_files {
                let Some(right_phase) = right_target
                    .copy_files
                    .iter()
                    .find(|p| p.name == left_phase.name)
                else {
                    continue;
                };

                let mut phase_context = context.clone();
                phase_context.push(format!("Copy files \"{}\"", left_phase.name));

                if left_phase.destination != right_phase.destination {
                    diffs.push(Difference::value_different(
                        phase_context.clone(),
                        "destination",
                        &left_phase.destination,
                        &right_phase.destination,
                    ));
                }

                let left_files = string_set(left_phase.files.iter().cloned());
                let right_files = string_set(right_phase.files.iter().cloned());
                diffs.extend(diff_sets(&phase_context, &left_files, &right_files));
            }
        }

        Ok(diffs)
    }
}
