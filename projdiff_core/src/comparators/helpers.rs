use projdiff_common::{
    BuildConfiguration, ComparatorError, Difference, ProjectSnapshot, Target,
};
use std::collections::{BTreeMap, BTreeSet};

pub(crate) fn target_context(target: &Target) -> Vec<String> {
    vec![format!("Target \"{}\"", target.name)]
}

pub(crate) fn configuration_context(base: &[String], configuration: &str) -> Vec<String> {
    let mut context = base.to_vec();
    context.push(format!("Configuration \"{configuration}\""));
    context
}

/// Pairs up targets present in both snapshots, preserving left-side order.
/// Target presence differences are the `targets` comparator's concern, not
/// an error here; duplicate target names within one snapshot are malformed.
pub(crate) fn common_targets<'a>(
    left: &'a ProjectSnapshot,
    right: &'a ProjectSnapshot,
) -> Result<Vec<(&'a Target, &'a Target)>, ComparatorError> {
    ensure_unique(left.targets.iter().map(|t| t.name.as_str()), "target", &left.name)?;
    ensure_unique(right.targets.iter().map(|t| t.name.as_str()), "target", &right.name)?;

    Ok(left
        .targets
        .iter()
        .filter_map(|l| right.target(&l.name).map(|r| (l, r)))
        .collect())
}

/// Pairs up configurations present in both lists, preserving left-side
/// order. Duplicate configuration names within one list are malformed.
pub(crate) fn common_configurations<'a>(
    left: &'a [BuildConfiguration],
    right: &'a [BuildConfiguration],
    project: &str,
) -> Result<Vec<(&'a BuildConfiguration, &'a BuildConfiguration)>, ComparatorError> {
    ensure_unique(left.iter().map(|c| c.name.as_str()), "configuration", project)?;
    ensure_unique(right.iter().map(|c| c.name.as_str()), "configuration", project)?;

    Ok(left
        .iter()
        .filter_map(|l| {
            right
                .iter()
                .find(|r| r.name == l.name)
                .map(|r| (l, r))
        })
        .collect())
}

pub(crate) fn ensure_unique<'a>(
    names: impl Iterator<Item = &'a str>,
    kind: &str,
    project: &str,
) -> Result<(), ComparatorError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ComparatorError::MalformedProject(format!(
                "project '{project}' declares {kind} '{name}' more than once"
            )));
        }
    }
    Ok(())
}

pub(crate) fn string_set<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

/// Set membership diff: left-only entries first, then right-only, each in
/// sorted order.
pub(crate) fn diff_sets(
    context: &[String],
    left: &BTreeSet<String>,
    right: &BTreeSet<String>,
) -> Vec<Difference> {
    let mut diffs = Vec::new();
    for entity in left.difference(right) {
        diffs.push(Difference::only_in_left(context.to_vec(), entity.clone()));
    }
    for entity in right.difference(left) {
        diffs.push(Difference::only_in_right(context.to_vec(), entity.clone()));
    }
    diffs
}

/// Key-union map diff: presence differences plus value changes, in key
/// order.
pub(crate) fn diff_maps(
    context: &[String],
    left: &BTreeMap<String, String>,
    right: &BTreeMap<String, String>,
) -> Vec<Difference> {
    let mut diffs = Vec::new();
    let keys: BTreeSet<&String> = left.keys().chain(right.keys()).collect();

    for key in keys {
        match (left.get(key), right.get(key)) {
            (Some(l), Some(r)) if l != r => {
                diffs.push(Difference::value_different(context.to_vec(), key.clone(), l, r));
            }
            (Some(_), Some(_)) => {}
            (Some(_), None) => diffs.push(Difference::only_in_left(context.to_vec(), key.clone())),
            (None, Some(_)) => diffs.push(Difference::only_in_right(context.to_vec(), key.clone())),
            (None, None) => unreachable!("key came from one of the maps"),
        }
    }

    diffs
}
