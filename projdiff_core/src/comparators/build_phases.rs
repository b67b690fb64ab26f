use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};
use std::collections::BTreeMap;

fn phase_counts(phases: &[String]) -> BTreeMap<&String, usize> {
    let mut counts = BTreeMap::new();
    for phase in phases {
        *counts.entry(phase).or_insert(0) += 1;
    }
    counts
}

/// Compares the build phase list of each target: which phases exist and the
/// order they run in.
pub struct BuildPhasesComparator;

impl Comparator for BuildPhasesComparator {
    fn tag(&self) -> &str {
        "build_phases"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);

            let left_phases: Vec<String> = left_target
                .build_phases
                .iter()
                .map(|p| p.display_name())
                .collect();
            let right_phases: Vec<String> = right_target
                .build_phases
                .iter()
                .map(|p| p.display_name())
                .collect();

            // Multiset presence diff; a target can carry two phases with the
            // same display name.
            let left_counts = phase_counts(&left_phases);
            let right_counts = phase_counts(&right_phases);
            for (phase, left_count) in &left_counts {
                let right_count = right_counts.get(phase).copied().unwrap_or(0);
                for _ in right_count..*left_count {
                    diffs.push(Difference::only_in_left(context.clone(), (*phase).clone()));
                }
            }
            for (phase, right_count) in &right_counts {
                let left_count = left_counts.get(phase).copied().unwrap_or(0);
                for _ in left_count..*right_count {
                    diffs.push(Difference::only_in_right(context.clone(), (*phase).clone()));
                }
            }

            // Same membership, different order.
            if left_phases != right_phases {
                let mut left_sorted = left_phases.clone();
                let mut right_sorted = right_phases.clone();
                left_sorted.sort();
                right_sorted.sort();
                if left_sorted == right_sorted {
                    diffs.push(Difference::value_different(
                        context.clone(),
                        "phase order",
                        left_phases.join(" -> "),
                        right_phases.join(" -> "),
                    ));
                }
            }
        }

        Ok(diffs)
    }
}
