use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_sets, string_set, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares remote package references (by URL, with version requirement
/// changes) and which package products each target consumes.
pub struct SwiftPackagesComparator;

impl Comparator for SwiftPackagesComparator {
    fn tag(&self) -> &str {
        "swift_packages"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let left_urls = string_set(left.swift_packages.iter().map(|p| p.url.clone()));
        let right_urls = string_set(right.swift_packages.iter().map(|p| p.url.clone()));
        let mut diffs = diff_sets(&[], &left_urls, &right_urls);

        for left_package in &left.swift_packages {
            let Some(right_package) = right
                .swift_packages
                .iter()
                .find(|p| p.url == left_package.url)
            else {
                continue;
            };
            if left_package.requirement != right_package.requirement {
                diffs.push(Difference::value_different(
                    vec![format!("Package \"{}\"", left_package.url)],
                    "requirement",
                    &left_package.requirement,
                    &right_package.requirement,
                ));
            }
        }

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);
            let left_products = string_set(left_target.package_products.iter().cloned());
            let right_products = string_set(right_target.package_products.iter().cloned());
            diffs.extend(diff_sets(&context, &left_products, &right_products));
        }

        Ok(diffs)
    }
}
