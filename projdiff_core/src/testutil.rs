//! Shared fixtures for unit tests.

use projdiff_common::{
    BuildConfiguration, BuildFile, BuildPhase, FileReference, ProjectSnapshot, SettingValue,
    Target,
};

pub(crate) fn named_target(name: &str) -> Target {
    Target {
        name: name.to_string(),
        product_type: "application".to_string(),
        ..Default::default()
    }
}

pub(crate) fn configuration(name: &str, settings: &[(&str, &str)]) -> BuildConfiguration {
    BuildConfiguration {
        name: name.to_string(),
        settings: settings
            .iter()
            .map(|(k, v)| (k.to_string(), SettingValue::String(v.to_string())))
            .collect(),
    }
}

pub(crate) fn sources_target(name: &str, files: &[&str]) -> Target {
    Target {
        sources: files
            .iter()
            .map(|path| BuildFile {
                path: path.to_string(),
                compiler_flags: None,
            })
            .collect(),
        build_phases: vec![BuildPhase {
            kind: "sources".to_string(),
            name: None,
        }],
        ..named_target(name)
    }
}

/// A project with one "App" target, two source files and a Debug
/// configuration. Rich enough that every default comparator has data to
/// walk without finding anything unexpected.
pub(crate) fn small_project(name: &str) -> ProjectSnapshot {
    let mut target = sources_target("App", &["a.swift", "b.swift"]);
    target.configurations = vec![configuration("Debug", &[("SWIFT_VERSION", "5.0")])];
    target.dependencies = vec!["AppKitExt".to_string()];

    ProjectSnapshot {
        name: name.to_string(),
        file_references: vec![
            FileReference {
                path: "a.swift".to_string(),
                source_tree: "<group>".to_string(),
            },
            FileReference {
                path: "b.swift".to_string(),
                source_tree: "<group>".to_string(),
            },
        ],
        targets: vec![target, named_target("AppKitExt")],
        configurations: vec![configuration("Debug", &[("SWIFT_VERSION", "5.0")])],
        ..Default::default()
    }
}

/// The canonical scenario: target "App" with sources {a.swift, b.swift} on
/// the left and {a.swift, c.swift} on the right, identical file reference
/// sets aside.
pub(crate) fn sources_scenario() -> (ProjectSnapshot, ProjectSnapshot) {
    let left = ProjectSnapshot {
        name: "App".to_string(),
        targets: vec![sources_target("App", &["a.swift", "b.swift"])],
        ..Default::default()
    };
    let right = ProjectSnapshot {
        name: "App".to_string(),
        targets: vec![sources_target("App", &["a.swift", "c.swift"])],
        ..Default::default()
    };
    (left, right)
}
