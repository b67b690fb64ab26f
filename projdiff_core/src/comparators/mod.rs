//! Built-in facet comparators. Each module owns one facet of the build
//! description and implements the [`Comparator`](crate::Comparator)
//! contract over shared set/map diff helpers.

mod attributes;
mod build_phases;
mod configurations;
mod copy_files;
mod dependencies;
mod file_references;
mod headers;
pub(crate) mod helpers;
mod linked_dependencies;
mod resolved_settings;
mod resources;
mod run_scripts;
mod settings;
mod source_trees;
mod sources;
mod swift_packages;
mod synchronized_groups;
mod targets;

pub use attributes::AttributesComparator;
pub use build_phases::BuildPhasesComparator;
pub use configurations::ConfigurationsComparator;
pub use copy_files::CopyFilesComparator;
pub use dependencies::DependenciesComparator;
pub use file_references::FileReferencesComparator;
pub use headers::HeadersComparator;
pub use linked_dependencies::LinkedDependenciesComparator;
pub use resolved_settings::ResolvedSettingsComparator;
pub use resources::ResourcesComparator;
pub use run_scripts::RunScriptsComparator;
pub use settings::SettingsComparator;
pub use source_trees::SourceTreesComparator;
pub use sources::SourcesComparator;
pub use swift_packages::SwiftPackagesComparator;
pub use synchronized_groups::SynchronizedGroupsComparator;
pub use targets::TargetsComparator;
