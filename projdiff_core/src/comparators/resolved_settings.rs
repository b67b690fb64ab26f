use crate::comparator::Comparator;
use crate::comparators::helpers::{
    common_targets, configuration_context, diff_maps, ensure_unique, target_context,
};
use crate::system::System;
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};
use std::sync::Arc;
use tracing::debug;

/// Compares effective build settings after resolution through the injected
/// [`System`] capability, per common target and configuration.
///
/// This is the one comparator that consults the execution environment; it is
/// excluded from the default catalog set because resolution shells out to an
/// external toolchain.
pub struct ResolvedSettingsComparator {
    system: Arc<dyn System>,
}

impl ResolvedSettingsComparator {
    pub fn new(system: Arc<dyn System>) -> Self {
        Self { system }
    }
}

impl Comparator for ResolvedSettingsComparator {
    fn tag(&self) -> &str {
        "resolved_settings"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        for (left_target, right_target) in common_targets(left, right)? {
            ensure_unique(
                left_target.configurations.iter().map(|c| c.name.as_str()),
                "configuration",
                &left.name,
            )?;
            ensure_unique(
                right_target.configurations.iter().map(|c| c.name.as_str()),
                "configuration",
                &right.name,
            )?;

            let base = target_context(left_target);
            for left_config in &left_target.configurations {
                if right_target.configuration(&left_config.name).is_none() {
                    continue;
                }

                debug!(
                    "Resolving settings for {}/{}",
                    left_target.name, left_config.name
                );
                let left_resolved =
                    self.system
                        .resolve_settings(left, &left_target.name, &left_config.name)?;
                let right_resolved =
                    self.system
                        .resolve_settings(right, &right_target.name, &left_config.name)?;

                let context = configuration_context(&base, &left_config.name);
                diffs.extend(diff_maps(&context, &left_resolved, &right_resolved));
            }
        }

        Ok(diffs)
    }
}
