use crate::comparator::Comparator;
use crate::comparators::helpers::{diff_sets, string_set};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares the group tree: which groups exist and how each is anchored
/// (source tree and display name).
pub struct SourceTreesComparator;

impl Comparator for SourceTreesComparator {
    fn tag(&self) -> &str {
        "source_trees"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let left_paths = string_set(left.groups.iter().map(|g| g.path.clone()));
        let right_paths = string_set(right.groups.iter().map(|g| g.path.clone()));
        let mut diffs = diff_sets(&[], &left_paths, &right_paths);

        for left_group in &left.groups {
            let Some(right_group) = right.groups.iter().find(|g| g.path == left_group.path)
            else {
                continue;
            };

            if left_group.source_tree != right_group.source_tree {
                diffs.push(Difference::value_different(
                    vec![format!("Group \"{}\"", left_group.path)],
                    "source tree",
                    &left_group.source_tree,
                    &right_group.source_tree,
                ));
            }
            if left_group.name != right_group.name {
                diffs.push(Difference::value_different(
                    vec![format!("Group \"{}\"", left_group.path)],
                    "name",
                    left_group.name.clone().unwrap_or_default(),
                    right_group.name.clone().unwrap_or_default(),
                ));
            }
        }

        Ok(diffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projdiff_common::{DifferenceKind, GroupDescriptor};

    fn group(path: &str, source_tree: &str) -> GroupDescriptor {
        GroupDescriptor {
            path: path.to_string(),
            source_tree: source_tree.to_string(),
            name: None,
        }
    }

    #[test]
    fn test_group_presence_and_anchor_change() {
        let left = ProjectSnapshot {
            groups: vec![group("Sources", "<group>"), group("Sources/Legacy", "<group>")],
            ..Default::default()
        };
        let right = ProjectSnapshot {
            groups: vec![group("Sources", "SOURCE_ROOT")],
            ..Default::default()
        };

        let diffs = SourceTreesComparator.compare(&left, &right).unwrap();
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].entity, "Sources/Legacy");
        assert_eq!(diffs[0].kind, DifferenceKind::OnlyInLeft);
        assert_eq!(diffs[1].entity, "source tree");
        assert_eq!(diffs[1].left_value.as_deref(), Some("<group>"));
        assert_eq!(diffs[1].right_value.as_deref(), Some("SOURCE_ROOT"));
    }
}
