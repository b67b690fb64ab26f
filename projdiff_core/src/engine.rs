use crate::catalog::ComparatorIdentity;
use crate::comparator::Comparator;
use crate::system::System;
use projdiff_common::{
    ComparatorError, ComparatorFailure, ComparatorSection, ComparisonReport, FailureKind,
    ProjDiffError, ProjectSnapshot, SectionOutcome,
};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates a selection of comparators over two project snapshots.
///
/// Identities run in the order the caller selected them; the report
/// preserves that order and, within each section, the order the comparator
/// produced. A comparator failure is recorded in its section and never
/// prevents sibling comparators from running. Duplicate resolved tags are
/// rejected before anything executes.
pub struct ComparisonEngine {
    identities: Vec<ComparatorIdentity>,
    system: Option<Arc<dyn System>>,
    parallel: bool,
}

impl ComparisonEngine {
    pub fn new(identities: Vec<ComparatorIdentity>) -> Self {
        Self {
            identities,
            system: None,
            parallel: false,
        }
    }

    /// Injects the system capability handed to `resolved_settings`.
    /// Without this, resolution falls back to [`crate::DefaultSystem`].
    pub fn with_system(mut self, system: Arc<dyn System>) -> Self {
        self.system = Some(system);
        self
    }

    /// Runs comparators across a rayon pool. Report order is unaffected;
    /// each comparator instance is still used by exactly one invocation.
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn compare(
        &self,
        left: &ProjectSnapshot,
        right: &ProjectSnapshot,
    ) -> Result<ComparisonReport, ProjDiffError> {
        let comparators = self.resolve_all()?;
        info!(
            "Comparing '{}' with '{}' using {} comparators",
            left.name,
            right.name,
            comparators.len()
        );

        let sections: Vec<ComparatorSection> = if self.parallel {
            comparators
                .par_iter()
                .map(|c| run_comparator(c.as_ref(), left, right))
                .collect()
        } else {
            comparators
                .iter()
                .map(|c| run_comparator(c.as_ref(), left, right))
                .collect()
        };

        Ok(ComparisonReport { sections })
    }

    /// Resolves every identity up front so configuration errors surface
    /// before any comparator executes.
    fn resolve_all(&self) -> Result<Vec<Arc<dyn Comparator>>, ProjDiffError> {
        let mut seen = BTreeSet::new();
        let mut comparators = Vec::with_capacity(self.identities.len());

        for identity in &self.identities {
            let comparator = match &self.system {
                Some(system) => identity.resolve_with_system(Arc::clone(system)),
                None => identity.resolve(),
            };
            let tag = comparator.tag().to_string();
            if tag.is_empty() {
                return Err(ProjDiffError::Config(
                    "comparator tag must not be empty".to_string(),
                ));
            }
            if !seen.insert(tag.clone()) {
                return Err(ProjDiffError::DuplicateTag(tag));
            }
            comparators.push(comparator);
        }

        Ok(comparators)
    }
}

fn run_comparator(
    comparator: &dyn Comparator,
    left: &ProjectSnapshot,
    right: &ProjectSnapshot,
) -> ComparatorSection {
    let tag = comparator.tag().to_string();
    debug!("Running comparator {tag}");

    let outcome = match comparator.compare(left, right) {
        Ok(differences) => SectionOutcome::Differences(differences),
        Err(err) => {
            warn!("Comparator {tag} failed: {err}");
            let kind = match &err {
                ComparatorError::MalformedProject(_) => FailureKind::MalformedProject,
                ComparatorError::System(_) => FailureKind::System,
            };
            SectionOutcome::Failed(ComparatorFailure {
                kind,
                message: err.to_string(),
            })
        }
    };

    ComparatorSection { tag, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{all_available_comparators, default_comparators};
    use crate::system::StaticSystem;
    use crate::testutil::{configuration, small_project, sources_scenario};
    use projdiff_common::{Difference, DifferenceKind, SystemError};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSystem {
        calls: AtomicUsize,
    }

    impl CountingSystem {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl System for CountingSystem {
        fn resolve_settings(
            &self,
            _project: &ProjectSnapshot,
            _target: &str,
            _configuration: &str,
        ) -> Result<BTreeMap<String, String>, SystemError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(BTreeMap::new())
        }
    }

    struct FixedComparator {
        tag: String,
        differences: Vec<Difference>,
    }

    impl Comparator for FixedComparator {
        fn tag(&self) -> &str {
            &self.tag
        }

        fn compare(
            &self,
            _left: &ProjectSnapshot,
            _right: &ProjectSnapshot,
        ) -> Result<Vec<Difference>, ComparatorError> {
            Ok(self.differences.clone())
        }
    }

    fn custom(tag: &str, differences: Vec<Difference>) -> ComparatorIdentity {
        ComparatorIdentity::Custom(Arc::new(FixedComparator {
            tag: tag.to_string(),
            differences,
        }))
    }

    #[test]
    fn test_report_preserves_selection_order() {
        let (left, right) = sources_scenario();
        let engine = ComparisonEngine::new(default_comparators());
        let report = engine.compare(&left, &right).unwrap();

        let tags: Vec<&str> = report.sections.iter().map(|s| s.tag.as_str()).collect();
        let expected: Vec<String> = default_comparators().iter().map(|i| i.tag()).collect();
        assert_eq!(tags, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_sources_scenario_end_to_end() {
        let (left, right) = sources_scenario();
        let engine = ComparisonEngine::new(vec![
            ComparatorIdentity::FileReferences,
            ComparatorIdentity::Sources,
        ]);
        let report = engine.compare(&left, &right).unwrap();

        assert_eq!(report.sections[0].tag, "file_references");
        assert_eq!(
            report.sections[0].outcome,
            SectionOutcome::Differences(vec![])
        );

        assert_eq!(report.sections[1].tag, "sources");
        let SectionOutcome::Differences(diffs) = &report.sections[1].outcome else {
            panic!("sources comparator should succeed");
        };
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].entity, "b.swift");
        assert_eq!(diffs[0].kind, DifferenceKind::OnlyInLeft);
        assert_eq!(diffs[1].entity, "c.swift");
        assert_eq!(diffs[1].kind, DifferenceKind::OnlyInRight);
    }

    #[test]
    fn test_compare_self_is_clean_for_every_builtin() {
        let snapshot = small_project("App");
        let system = Arc::new(StaticSystem::new().with_settings(
            "App",
            "App",
            "Debug",
            [("ARCHS", "arm64")],
        ));

        let engine = ComparisonEngine::new(all_available_comparators()).with_system(system);
        let report = engine.compare(&snapshot, &snapshot).unwrap();

        assert_eq!(report.sections.len(), 17);
        assert!(!report.has_differences());
        assert!(!report.has_failures());
    }

    #[test]
    fn test_partial_failure_keeps_siblings() {
        let left = small_project("Before");
        let mut right = small_project("After");
        right.targets[0] = crate::testutil::sources_target("App", &["a.swift", "c.swift"]);
        right.targets[0].configurations = vec![configuration("Debug", &[("SWIFT_VERSION", "5.0")])];

        // Empty canned system: resolved_settings fails, siblings must not.
        let engine = ComparisonEngine::new(vec![
            ComparatorIdentity::Sources,
            ComparatorIdentity::ResolvedSettings,
            ComparatorIdentity::Targets,
        ])
        .with_system(Arc::new(StaticSystem::new()));

        let report = engine.compare(&left, &right).unwrap();
        assert_eq!(report.sections.len(), 3);

        let SectionOutcome::Differences(source_diffs) = &report.sections[0].outcome else {
            panic!("sources should succeed");
        };
        assert_eq!(source_diffs.len(), 2);

        let SectionOutcome::Failed(failure) = &report.sections[1].outcome else {
            panic!("resolved_settings should fail");
        };
        assert_eq!(failure.kind, FailureKind::System);

        assert_eq!(
            report.sections[2].outcome,
            SectionOutcome::Differences(vec![])
        );
    }

    #[test]
    fn test_custom_comparator_aggregates_like_builtin() {
        let (left, right) = sources_scenario();
        let difference = Difference::only_in_right(vec![], "generated.swift");
        let engine = ComparisonEngine::new(vec![
            ComparatorIdentity::FileReferences,
            custom("generated_files", vec![difference.clone()]),
        ]);

        let report = engine.compare(&left, &right).unwrap();
        assert_eq!(report.sections[1].tag, "generated_files");
        assert_eq!(
            report.sections[1].outcome,
            SectionOutcome::Differences(vec![difference])
        );
    }

    #[test]
    fn test_duplicate_custom_tag_is_rejected_before_execution() {
        let (left, right) = sources_scenario();
        let engine = ComparisonEngine::new(vec![
            ComparatorIdentity::Sources,
            custom("sources", vec![]),
        ]);

        let err = engine.compare(&left, &right).unwrap_err();
        assert!(matches!(err, ProjDiffError::DuplicateTag(tag) if tag == "sources"));
    }

    #[test]
    fn test_default_set_never_touches_the_system_capability() {
        let snapshot = small_project("App");
        let system = CountingSystem::new();

        let capability: Arc<dyn System> = system.clone();

        let engine =
            ComparisonEngine::new(default_comparators()).with_system(Arc::clone(&capability));
        engine.compare(&snapshot, &snapshot).unwrap();
        assert_eq!(system.calls.load(Ordering::SeqCst), 0);

        let engine =
            ComparisonEngine::new(all_available_comparators()).with_system(Arc::clone(&capability));
        engine.compare(&snapshot, &snapshot).unwrap();
        assert!(system.calls.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (left, right) = sources_scenario();
        let sequential = ComparisonEngine::new(default_comparators())
            .compare(&left, &right)
            .unwrap();
        let parallel = ComparisonEngine::new(default_comparators())
            .with_parallel(true)
            .compare(&left, &right)
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_symmetric_facet_flagging() {
        let (left, right) = sources_scenario();
        let engine = ComparisonEngine::new(default_comparators());

        let forward = engine.compare(&left, &right).unwrap();
        let backward = engine.compare(&right, &left).unwrap();

        let dirty = |report: &ComparisonReport| -> Vec<String> {
            report.dirty_sections().map(|s| s.tag.clone()).collect()
        };
        assert_eq!(dirty(&forward), dirty(&backward));
    }
}
