use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// In-memory representation of a project's build description at a point in
/// time. Snapshots are produced by a loader and treated as immutable by the
/// comparison engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub name: String,

    /// Every file the project references, project-wide.
    #[serde(default)]
    pub file_references: Vec<FileReference>,

    /// Flattened group tree; `path` is the slash-joined location of the
    /// group within the tree.
    #[serde(default)]
    pub groups: Vec<GroupDescriptor>,

    #[serde(default)]
    pub targets: Vec<Target>,

    /// Project-level build configurations.
    #[serde(default)]
    pub configurations: Vec<BuildConfiguration>,

    /// Project-level attributes (organization, version markers, ...).
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Remote package references declared by the project.
    #[serde(default)]
    pub swift_packages: Vec<SwiftPackageReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileReference {
    pub path: String,
    /// Base the path is relative to (e.g. "<group>", "SOURCE_ROOT",
    /// "<absolute>").
    #[serde(default)]
    pub source_tree: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupDescriptor {
    pub path: String,
    #[serde(default)]
    pub source_tree: String,
    /// Display name when it differs from the last path component.
    #[serde(default)]
    pub name: Option<String>,
}

/// A buildable unit within the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    #[serde(default)]
    pub product_type: String,

    /// Ordered build phase summary; the per-facet collections below carry
    /// the phase contents.
    #[serde(default)]
    pub build_phases: Vec<BuildPhase>,

    #[serde(default)]
    pub sources: Vec<BuildFile>,
    #[serde(default)]
    pub headers: Vec<HeaderFile>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub copy_files: Vec<CopyFilesPhase>,
    #[serde(default)]
    pub run_scripts: Vec<RunScript>,

    /// Target-level build configurations.
    #[serde(default)]
    pub configurations: Vec<BuildConfiguration>,

    /// Names of targets this target depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Frameworks and libraries linked into the product.
    #[serde(default)]
    pub linked_dependencies: Vec<LinkedDependency>,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Package products this target consumes.
    #[serde(default)]
    pub package_products: Vec<String>,

    /// Folder groups synchronized with the filesystem.
    #[serde(default)]
    pub synchronized_groups: Vec<SynchronizedGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildPhase {
    /// Phase kind (e.g. "sources", "resources", "run_script").
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl BuildPhase {
    /// Display name used when diffing phase lists.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.kind, name),
            None => self.kind.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildFile {
    pub path: String,
    #[serde(default)]
    pub compiler_flags: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderFile {
    pub path: String,
    /// "public", "private" or "project" visibility.
    #[serde(default)]
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopyFilesPhase {
    pub name: String,
    /// Destination location (e.g. "frameworks", "resources", "plugins").
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunScript {
    pub name: String,
    #[serde(default)]
    pub shell: Option<String>,
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub input_paths: Vec<String>,
    #[serde(default)]
    pub output_paths: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfiguration {
    pub name: String,
    #[serde(default)]
    pub settings: BTreeMap<String, SettingValue>,
}

/// A build setting value, either a single string or an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    List(Vec<String>),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::String(value) => write!(f, "{value}"),
            SettingValue::List(values) => write!(f, "{}", values.join(" ")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedDependency {
    pub name: String,
    /// Linkage status (e.g. "required", "optional", "weak").
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwiftPackageReference {
    pub url: String,
    /// Version requirement in display form (e.g. "upToNextMajor 5.0.0").
    #[serde(default)]
    pub requirement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynchronizedGroup {
    pub path: String,
    /// Paths excluded from target membership.
    #[serde(default)]
    pub exceptions: Vec<String>,
}

impl ProjectSnapshot {
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn configuration(&self, name: &str) -> Option<&BuildConfiguration> {
        self.configurations.iter().find(|c| c.name == name)
    }
}

impl Target {
    pub fn configuration(&self, name: &str) -> Option<&BuildConfiguration> {
        self.configurations.iter().find(|c| c.name == name)
    }
}
