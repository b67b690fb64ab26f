use crate::comparator::Comparator;
use crate::comparators::helpers::{common_targets, diff_sets, string_set, target_context};
use projdiff_common::{ComparatorError, Difference, ProjectSnapshot, RunScript};
use similar::{ChangeTag, TextDiff};

/// Compares run-script phases per target: presence (by name), shell, script
/// body, and declared input/output paths.
pub struct RunScriptsComparator;

impl Comparator for RunScriptsComparator {
    fn tag(&self) -> &str {
        "run_scripts"
    }

    fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<Vec<Difference>, ComparatorError> {
        let mut diffs = Vec::new();

        for (left_target, right_target) in common_targets(left, right)? {
            let context = target_context(left_target);

            let left_names = string_set(left_target.run_scripts.iter().map(|s| s.name.clone()));
            let right_names = string_set(right_target.run_scripts.iter().map(|s| s.name.clone()));
            diffs.extend(diff_sets(&context, &left_names, &right_names));

            for left_script in &left_target.run_scripts {
                let Some(right_script) = right_target
                    .run_scripts
                    .iter()
                    .find(|s| s.name == left_script.name)
                else {
                    continue;
                };
                diffs.extend(compare_scripts(&context, left_script, right_script));
            }
        }

        Ok(diffs)
    }
}

fn compare_scripts(
    context: &[String],
    left: &RunScript,
    right: &RunScript,
) -> Vec<Difference> {
    let mut script_context = context.to_vec();
    script_context.push(format!("Run script \"{}\"", left.name));

    let mut diffs = Vec::new();

    if left.shell != right.shell {
        diffs.push(Difference::value_different(
            script_context.clone(),
            "shell",
            left.shell.clone().unwrap_or_default(),
            right.shell.clone().unwrap_or_default(),
        ));
    }

    if left.script != right.script {
        diffs.push(Difference::value_different(
            script_context.clone(),
            "script body",
            summarize_body(&left.script, &right.script),
            summarize_body(&right.script, &left.script),
        ));
    }

    let left_inputs = string_set(left.input_paths.iter().cloned());
    let right_inputs = string_set(right.input_paths.iter().cloned());
    let mut input_context = script_context.clone();
    input_context.push("Input paths".to_string());
    diffs.extend(diff_sets(&input_context, &left_inputs, &right_inputs));

    let left_outputs = string_set(left.output_paths.iter().cloned());
    let right_outputs = string_set(right.output_paths.iter().cloned());
    let mut output_context = script_context;
    output_context.push("Output paths".to_string());
    diffs.extend(diff_sets(&output_context, &left_outputs, &right_outputs));

    diffs
}

/// Short description of one side of a script-body change: line count plus
/// how many lines the other side adds and removes relative to it.
fn summarize_body(side: &str, other: &str) -> String {
    let diff = TextDiff::from_lines(side, other);
    let mut inserted = 0usize;
    let mut deleted = 0usize;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => inserted += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    format!("{} lines (+{inserted}/-{deleted} vs other)", side.lines().count())
}
