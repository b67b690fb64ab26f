use crate::comparator::Comparator;
use crate::comparators::{
    AttributesComparator, BuildPhasesComparator, ConfigurationsComparator, CopyFilesComparator,
    DependenciesComparator, FileReferencesComparator, HeadersComparator,
    LinkedDependenciesComparator, ResolvedSettingsComparator, ResourcesComparator,
    RunScriptsComparator, SettingsComparator, SourceTreesComparator, SourcesComparator,
    SwiftPackagesComparator, SynchronizedGroupsComparator, TargetsComparator,
};
use crate::system::{DefaultSystem, System};
use std::fmt;
use std::sync::Arc;

/// One entry in the comparator catalog: a built-in facet, or an arbitrary
/// caller-supplied comparator behind the `Custom` escape hatch.
///
/// Identities carry no intrinsic ordering; execution and report order follow
/// the sequence the caller builds.
pub enum ComparatorIdentity {
    FileReferences,
    BuildPhases,
    CopyFiles,
    Targets,
    Headers,
    Sources,
    Resources,
    RunScripts,
    Configurations,
    Settings,
    ResolvedSettings,
    SourceTrees,
    Dependencies,
    LinkedDependencies,
    Attributes,
    SwiftPackages,
    SynchronizedGroups,
    Custom(Arc<dyn Comparator>),
}

impl ComparatorIdentity {
    /// Tag of the comparator this identity resolves to.
    pub fn tag(&self) -> String {
        self.resolve().tag().to_string()
    }

    /// Resolves this identity to a comparator instance.
    ///
    /// Built-in identities get a freshly constructed instance on every call;
    /// `ResolvedSettings` is built with a fresh [`DefaultSystem`]; `Custom`
    /// returns the wrapped comparator unchanged.
    pub fn resolve(&self) -> Arc<dyn Comparator> {
        self.resolve_with_system(Arc::new(DefaultSystem::default()))
    }

    /// Like [`resolve`](Self::resolve), but `ResolvedSettings` is built with
    /// the supplied system capability. The other identities ignore it.
    pub fn resolve_with_system(&self, system: Arc<dyn System>) -> Arc<dyn Comparator> {
        match self {
            Self::FileReferences => Arc::new(FileReferencesComparator),
            Self::BuildPhases => Arc::new(BuildPhasesComparator),
            Self::CopyFiles => Arc::new(CopyFilesComparator),
            Self::Targets => Arc::new(TargetsComparator),
            Self::Headers => Arc::new(HeadersComparator),
            Self::Sources => Arc::new(SourcesComparator),
            Self::Resources => Arc::new(ResourcesComparator),
            Self::RunScripts => Arc::new(RunScriptsComparator),
            Self::Configurations => Arc::new(ConfigurationsComparator),
            Self::Settings => Arc::new(SettingsComparator),
            Self::ResolvedSettings => Arc::new(ResolvedSettingsComparator::new(system)),
            Self::SourceTrees => Arc::new(SourceTreesComparator),
            Self::Dependencies => Arc::new(DependenciesComparator),
            Self::LinkedDependencies => Arc::new(LinkedDependenciesComparator),
            Self::Attributes => Arc::new(AttributesComparator),
            Self::SwiftPackages => Arc::new(SwiftPackagesComparator),
            Self::SynchronizedGroups => Arc::new(SynchronizedGroupsComparator),
            Self::Custom(comparator) => Arc::clone(comparator),
        }
    }

    /// Looks up a built-in identity by its tag. `Custom` identities have no
    /// tag-based lookup; they are constructed directly by the caller.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "file_references" => Some(Self::FileReferences),
            "build_phases" => Some(Self::BuildPhases),
            "copy_files" => Some(Self::CopyFiles),
            "targets" => Some(Self::Targets),
            "headers" => Some(Self::Headers),
            "sources" => Some(Self::Sources),
            "resources" => Some(Self::Resources),
            "run_scripts" => Some(Self::RunScripts),
            "configurations" => Some(Self::Configurations),
            "settings" => Some(Self::Settings),
            "resolved_settings" => Some(Self::ResolvedSettings),
            "source_trees" => Some(Self::SourceTrees),
            "dependencies" => Some(Self::Dependencies),
            "linked_dependencies" => Some(Self::LinkedDependencies),
            "attributes" => Some(Self::Attributes),
            "swift_packages" => Some(Self::SwiftPackages),
            "synchronized_groups" => Some(Self::SynchronizedGroups),
            _ => None,
        }
    }
}

impl Clone for ComparatorIdentity {
    fn clone(&self) -> Self {
        match self {
            Self::FileReferences => Self::FileReferences,
            Self::BuildPhases => Self::BuildPhases,
            Self::CopyFiles => Self::CopyFiles,
            Self::Targets => Self::Targets,
            Self::Headers => Self::Headers,
            Self::Sources => Self::Sources,
            Self::Resources => Self::Resources,
            Self::RunScripts => Self::RunScripts,
            Self::Configurations => Self::Configurations,
            Self::Settings => Self::Settings,
            Self::ResolvedSettings => Self::ResolvedSettings,
            Self::SourceTrees => Self::SourceTrees,
            Self::Dependencies => Self::Dependencies,
            Self::LinkedDependencies => Self::LinkedDependencies,
            Self::Attributes => Self::Attributes,
            Self::SwiftPackages => Self::SwiftPackages,
            Self::SynchronizedGroups => Self::SynchronizedGroups,
            Self::Custom(comparator) => Self::Custom(Arc::clone(comparator)),
        }
    }
}

impl fmt::Debug for ComparatorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(comparator) => write!(f, "Custom({})", comparator.tag()),
            _ => f.write_str(&self.tag()),
        }
    }
}

/// Every built-in identity, in canonical order. Each call returns a fresh
/// vector; the shared definition cannot be mutated through the result.
pub fn all_available_comparators() -> Vec<ComparatorIdentity> {
    vec![
        ComparatorIdentity::FileReferences,
        ComparatorIdentity::BuildPhases,
        ComparatorIdentity::CopyFiles,
        ComparatorIdentity::Targets,
        ComparatorIdentity::Headers,
        ComparatorIdentity::Sources,
        ComparatorIdentity::Resources,
        ComparatorIdentity::RunScripts,
        ComparatorIdentity::Configurations,
        ComparatorIdentity::Settings,
        ComparatorIdentity::ResolvedSettings,
        ComparatorIdentity::SourceTrees,
        ComparatorIdentity::Dependencies,
        ComparatorIdentity::LinkedDependencies,
        ComparatorIdentity::Attributes,
        ComparatorIdentity::SwiftPackages,
        ComparatorIdentity::SynchronizedGroups,
    ]
}

/// The subset used when the caller expresses no preference: every built-in
/// except `resolved_settings`, which shells out to an external resolver and
/// is comparatively slow.
pub fn default_comparators() -> Vec<ComparatorIdentity> {
    vec![
        ComparatorIdentity::FileReferences,
        ComparatorIdentity::BuildPhases,
        ComparatorIdentity::CopyFiles,
        ComparatorIdentity::Targets,
        ComparatorIdentity::Headers,
        ComparatorIdentity::Sources,
        ComparatorIdentity::Resources,
        ComparatorIdentity::RunScripts,
        ComparatorIdentity::Configurations,
        ComparatorIdentity::Settings,
        ComparatorIdentity::SourceTrees,
        ComparatorIdentity::Dependencies,
        ComparatorIdentity::LinkedDependencies,
        ComparatorIdentity::Attributes,
        ComparatorIdentity::SwiftPackages,
        ComparatorIdentity::SynchronizedGroups,
    ]
}
