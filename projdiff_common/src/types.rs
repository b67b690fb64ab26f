use serde::{Deserialize, Serialize};

/// One detected discrepancy between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    /// Where the difference was found (e.g. `Target "App"`,
    /// `Configuration "Debug"`), outermost first.
    pub context: Vec<String>,
    /// The element that differs (a path, a setting key, a target name, ...).
    pub entity: String,
    pub kind: DifferenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Element present only in the left snapshot.
    OnlyInLeft,
    /// Element present only in the right snapshot.
    OnlyInRight,
    /// Element present in both with differing values.
    ValueDifferent,
}

impl Difference {
    pub fn only_in_left(context: Vec<String>, entity: impl Into<String>) -> Self {
        Self {
            context,
            entity: entity.into(),
            kind: DifferenceKind::OnlyInLeft,
            left_value: None,
            right_value: None,
        }
    }

    pub fn only_in_right(context: Vec<String>, entity: impl Into<String>) -> Self {
        Self {
            context,
            entity: entity.into(),
            kind: DifferenceKind::OnlyInRight,
            left_value: None,
            right_value: None,
        }
    }

    pub fn value_different(
        context: Vec<String>,
        entity: impl Into<String>,
        left_value: impl Into<String>,
        right_value: impl Into<String>,
    ) -> Self {
        Self {
            context,
            entity: entity.into(),
            kind: DifferenceKind::ValueDifferent,
            left_value: Some(left_value.into()),
            right_value: Some(right_value.into()),
        }
    }
}

/// Aggregate result of running a selection of comparators, one section per
/// comparator in the order the caller selected them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub sections: Vec<ComparatorSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparatorSection {
    /// Tag of the comparator that produced this section.
    pub tag: String,
    pub outcome: SectionOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionOutcome {
    /// The comparator ran; an empty list means the facet is identical.
    Differences(Vec<Difference>),
    /// The comparator could not run to completion.
    Failed(ComparatorFailure),
}

/// A recorded comparator-level failure. Failures never suppress sibling
/// comparators and are never reported as an empty difference list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparatorFailure {
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A snapshot could not be interpreted by the comparator.
    MalformedProject,
    /// The injected system capability could not answer.
    System,
}

impl ComparisonReport {
    pub fn has_differences(&self) -> bool {
        self.sections.iter().any(|s| match &s.outcome {
            SectionOutcome::Differences(diffs) => !diffs.is_empty(),
            SectionOutcome::Failed(_) => false,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.sections
            .iter()
            .any(|s| matches!(s.outcome, SectionOutcome::Failed(_)))
    }

    pub fn difference_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| match &s.outcome {
                SectionOutcome::Differences(diffs) => diffs.len(),
                SectionOutcome::Failed(_) => 0,
            })
            .sum()
    }

    /// Sections that contain differences or failed outright.
    pub fn dirty_sections(&self) -> impl Iterator<Item = &ComparatorSection> {
        self.sections.iter().filter(|s| match &s.outcome {
            SectionOutcome::Differences(diffs) => !diffs.is_empty(),
            SectionOutcome::Failed(_) => true,
        })
    }
}
