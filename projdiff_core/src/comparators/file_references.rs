use crate::comparator::Comparator;
use crate::comparators::helpers::{diff_sets, string_set};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares the project-wide set of referenced file paths.
pub struct FileReferencesComparator;

impl Comparator for FileReferencesComparator {
    fn tag(&self) -> &str {
        "file_references"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let left_paths = string_set(left.file_references.iter().map(|f| f.path.clone()));
        let right_paths = string_set(right.file_references.iter().map(|f| f.path.clone()));
        Ok(diff_sets(&[], &left_paths, &right_paths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projdiff_common::{DifferenceKind, FileReference};

    fn project(name: &str, paths: &[&str]) -> ProjectSnapshot {
        ProjectSnapshot {
            name: name.to_string(),
            file_references: paths
                .iter()
                .map(|p| FileReference {
                    path: p.to_string(),
                    source_tree: "<group>".to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_references_are_clean() {
        let a = project("App", &["a.swift", "b.swift"]);
        assert!(FileReferencesComparator.compare(&a, &a).unwrap().is_empty());
    }

    #[test]
    fn test_added_and_removed_references() {
        let left = project("App", &["a.swift", "b.swift"]);
        let right = project("App", &["a.swift", "Assets.xcassets"]);

        let diffs = FileReferencesComparator.compare(&left, &right).unwrap();
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].entity, "b.swift");
        assert_eq!(diffs[0].kind, DifferenceKind::OnlyInLeft);
        assert_eq!(diffs[1].entity, "Assets.xcassets");
        assert_eq!(diffs[1].kind, DifferenceKind::OnlyInRight);
    }
}
