use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_sets, string_set, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot};

/// Compares the header membership of each target, including visibility.
pub struct HeadersComparator;

impl Comparator for HeadersComparator {
    fn tag(&self) -> &str {
        "headers"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);

            let left_paths = string_set(left_target.headers.iter().map(|h| h.path.clone()));
            let right_paths = string_set(right_target.headers.iter().map(|h| h.path.clone()));
            diffs.extend(diff_sets(&context, &left_paths, &right_paths));

            for left_header in &left_target.headers {
                let Some(right_header) = right_target
                    .headers
                    .iter()
                    .find(|h| h.path == left_header.path)
                else {
                    continue;
                };
                if left_header.visibility != right_header.visibility {
                    diffs.push(Difference::value_different(
                        context.clone(),
                        format!("{} (visibility)", left_header.path),
                        left_header.visibility.clone().unwrap_or_else(|| "project".to_string()),
                        right_header.visibility.clone().unwrap_or_else(|| "project".to_string()),
                    ));
                }
            }
        }

        Ok(diffs)
    }
}
