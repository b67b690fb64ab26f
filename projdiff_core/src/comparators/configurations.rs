use crate::comparator::Comparator;
use crate::comparators::helpers::{
    common_targets, diff_sets, ensure_unique, string_set, target_context,
};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares which build configurations exist, at the project level and per
/// target. Setting contents are the `settings` comparator's concern.
pub struct ConfigurationsComparator;

impl Comparator for ConfigurationsComparator {
    fn tag(&self) -> &str {
        "configurations"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        ensure_unique(
            left.configurations.iter().map(|c| c.name.as_str()),
            "configuration",
            &left.name,
        )?;
        ensure_unique(
            right.configurations.iter().map(|c| c.name.as_str()),
            "configuration",
            &right.name,
        )?;

        let left_names = string_set(left.configurations.iter().map(|c| c.name.clone()));
        let right_names = string_set(right.configurations.iter().map(|c| c.name.clone()));
        let mut diffs = diff_sets(&["Project".to_string()], &left_names, &right_names);

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);
            let left_names = string_set(left_target.configurations.iter().map(|c| c.name.clone()));
            let right_names =
                string_set(right_target.configurations.iter().map(|c| c.name.clone()));
            diffs.extend(diff_sets(&context, &left_names, &right_names));
        }

        Ok(diffs)
    }
}
