use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_sets, string_set, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares the source file membership of each target, including per-file
/// compiler flags.
pub struct SourcesComparator;

impl Comparator for SourcesComparator {
    fn tag(&self) -> &str {
        "sources"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);

            let left_paths = string_set(left_target.sources.iter().map(|s| s.path.clone()));
            let right_paths = string_set(right_target.sources.iter().map(|s| s.path.clone()));
            diffs.extend(diff_sets(&context, &left_paths, &right_paths));

            // Flag changes only matter for files present on both sides.
            for left_file in &left_target.sources {
                let Some(right_file) = right_target
                    .sources
                    .iter()
                    .find(|f| f.path == left_file.path)
                else {
                    continue;
                };
                if left_file.compiler_flags != right_file.compiler_flags {
                    diffs.push(Difference::value_different(
                        context.clone(),
                        format!("{} (compiler flags)", left_file.path),
                        left_file.compiler_flags.clone().unwrap_or_default(),
                        right_file.compiler_flags.clone().unwrap_or_default(),
                    ));
                }
            }
        }

        Ok(diffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sources_scenario, sources_target};
    use projdiff_common::DifferenceKind;

    #[test]
    fn test_identical_sources_are_clean() {
        let (left, _) = sources_scenario();
        assert!(SourcesComparator.compare(&left, &left).unwrap().is_empty());
    }

    #[test]
    fn test_added_and_removed_source_files() {
        let (left, right) = sources_scenario();
        let diffs = SourcesComparator.compare(&left, &right).unwrap();

        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].context, vec!["Target \"App\"".to_string()]);
        assert_eq!(diffs[0].entity, "b.swift");
        assert_eq!(diffs[0].kind, DifferenceKind::OnlyInLeft);
        assert_eq!(diffs[1].entity, "c.swift");
        assert_eq!(diffs[1].kind, DifferenceKind::OnlyInRight);
    }

    #[test]
    fn test_compiler_flag_change() {
        let (left, mut right) = sources_scenario();
        right.targets[0] = sources_target("App", &["a.swift", "b.swift"]);
        right.targets[0].sources[0].compiler_flags = Some("-Onone".to_string());

        let diffs = SourcesComparator.compare(&left, &right).unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].entity, "a.swift (compiler flags)");
        assert_eq!(diffs[0].kind, DifferenceKind::ValueDifferent);
        assert_eq!(diffs[0].right_value.as_deref(), Some("-Onone"));
    }

    #[test]
    fn test_direction_flip_mirrors_kinds() {
        let (left, right) = sources_scenario();
        let forward = SourcesComparator.compare(&left, &right).unwrap();
        let backward = SourcesComparator.compare(&right, &left).unwrap();

        assert_eq!(forward.len(), backward.len());
        assert_eq!(forward[0].kind, DifferenceKind::OnlyInLeft);
        assert_eq!(backward[1].kind, DifferenceKind::OnlyInRight);
        assert_eq!(backward[1].entity, "b.swift");
    }
}
