use crate::comparator::Comparator;
use crate::comparators::helpers::{
    common_configurations, common_targets, configuration_context, diff_maps, target_context,
};
use projdiff_common::{BuildConfiguration, ComparatorError, Difference, ProjectSnapshot};
use std::collections::BTreeMap;

/// Compares declared build settings, configuration by configuration, at the
/// project level and per target.
pub struct SettingsComparator;

impl Comparator for SettingsComparator {
    fn tag(&self) -> &str {
        "settings"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        let project_context = vec!["Project".to_string()];
        for (left_config, right_config) in
            common_configurations(&left.configurations, &right.configurations, &left.name)?
        {
            let context = configuration_context(&project_context, &left_config.name);
            diffs.extend(diff_settings(&context, left_config, right_config));
        }

        for (left_target, right_target) in common_targets(left, right)? {
            let base = target_context(left_target);
            for (left_config, right_config) in common_configurations(
                &left_target.configurations,
                &right_target.configurations,
                &left.name,
            )? {
                let context = configuration_context(&base, &left_config.name);
                diffs.extend(diff_settings(&context, left_config, right_config));
            }
        }

        Ok(diffs)
    }
}

fn diff_settings(
    context: &[String],
    left: &BuildConfiguration,
    right: &BuildConfiguration,
) -> Vec<Difference> {
    let left_map: BTreeMap<String, String> = left
        .settings
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect();
    let right_map: BTreeMap<String, String> = right
        .settings
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect();
    diff_maps(context, &left_map, &right_map)
}
