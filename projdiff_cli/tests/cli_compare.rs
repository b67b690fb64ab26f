use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper struct to manage snapshot fixtures on disk
struct TestFixture {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        TestFixture {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Write a snapshot file and return its path
    fn write_snapshot(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.root.join(file_name);
        fs::write(&path, content).expect("Failed to write snapshot");
        path
    }

    fn left_right_with_source_change(&self) -> (PathBuf, PathBuf) {
        let left = self.write_snapshot(
            "before.json",
            r#"{
                "name": "App",
                "file_references": [
                    {"path": "a.swift", "source_tree": "<group>"},
                    {"path": "b.swift", "source_tree": "<group>"}
                ],
                "targets": [
                    {
                        "name": "App",
                        "product_type": "application",
                        "sources": [{"path": "a.swift"}, {"path": "b.swift"}]
                    }
                ]
            }"#,
        );
        let right = self.write_snapshot(
            "after.json",
            r#"{
                "name": "App",
                "file_references": [
                    {"path": "a.swift", "source_tree": "<group>"},
                    {"path": "b.swift", "source_tree": "<group>"}
                ],
                "targets": [
                    {
                        "name": "App",
                        "product_type": "application",
                        "sources": [{"path": "a.swift"}, {"path": "c.swift"}]
                    }
                ]
            }"#,
        );
        (left, right)
    }
}

fn projdiff() -> Command {
    Command::cargo_bin("projdiff").expect("binary builds")
}

#[test]
fn test_compare_reports_source_differences() {
    let fixture = TestFixture::new();
    let (left, right) = fixture.left_right_with_source_change();

    let assert = projdiff()
        .arg("compare")
        .arg(&left)
        .arg(&right)
        .arg("--no-color")
        .assert()
        .code(1);

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("DIFF SOURCES"), "stdout: {stdout}");
    assert!(stdout.contains("b.swift"));
    assert!(stdout.contains("c.swift"));
}

#[test]
fn test_compare_identical_snapshots_is_clean() {
    let fixture = TestFixture::new();
    let (left, _) = fixture.left_right_with_source_change();

    projdiff()
        .arg("compare")
        .arg(&left)
        .arg(&left)
        .arg("--no-color")
        .assert()
        .code(0);
}

#[test]
fn test_compare_json_output() {
    let fixture = TestFixture::new();
    let (left, right) = fixture.left_right_with_source_change();

    let assert = projdiff()
        .arg("compare")
        .arg(&left)
        .arg(&right)
        .arg("--json")
        .assert()
        .code(1);

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");

    assert_eq!(report["difference_count"], 2);
    assert_eq!(report["failed"], false);
    let sections = report["report"]["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 16);
    let sources = sections
        .iter()
        .find(|s| s["tag"] == "sources")
        .expect("sources section present");
    let diffs = sources["outcome"]["differences"].as_array().unwrap();
    assert_eq!(diffs.len(), 2);
}

#[test]
fn test_only_restricts_selection() {
    let fixture = TestFixture::new();
    let (left, right) = fixture.left_right_with_source_change();

    let assert = projdiff()
        .arg("compare")
        .arg(&left)
        .arg(&right)
        .arg("--only")
        .arg("file_references")
        .arg("--json")
        .assert()
        .code(0);

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let sections = report["report"]["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["tag"], "file_references");
    assert_eq!(report["difference_count"], 0);
}

#[test]
fn test_unknown_tag_fails_before_running() {
    let fixture = TestFixture::new();
    let (left, right) = fixture.left_right_with_source_change();

    projdiff()
        .arg("compare")
        .arg(&left)
        .arg(&right)
        .arg("--only")
        .arg("no_such_facet")
        .assert()
        .code(2);
}

#[test]
fn test_missing_snapshot_file_fails() {
    let fixture = TestFixture::new();
    let (left, _) = fixture.left_right_with_source_change();

    projdiff()
        .arg("compare")
        .arg(&left)
        .arg(Path::new("missing.json"))
        .assert()
        .code(2);
}

#[test]
fn test_unknown_target_filter_fails() {
    let fixture = TestFixture::new();
    let (left, right) = fixture.left_right_with_source_change();

    projdiff()
        .arg("compare")
        .arg(&left)
        .arg(&right)
        .arg("--target")
        .arg("NotATarget")
        .assert()
        .code(2);
}

#[test]
fn test_yaml_snapshot_round_trip() {
    let fixture = TestFixture::new();
    let left = fixture.write_snapshot(
        "before.yaml",
        "name: App\ntargets:\n  - name: App\n    sources:\n      - path: a.swift\n",
    );
    let right = fixture.write_snapshot(
        "after.yaml",
        "name: App\ntargets:\n  - name: App\n    sources:\n      - path: b.swift\n",
    );

    projdiff()
        .arg("compare")
        .arg(&left)
        .arg(&right)
        .assert()
        .code(1);
}

#[test]
fn test_list_shows_full_catalog() {
    let assert = projdiff().arg("list").assert().code(0);

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert_eq!(stdout.lines().count(), 17);
    assert!(stdout.contains("sources"));
    assert!(stdout.contains("resolved_settings (not in default set)"));
}

#[test]
fn test_list_json() {
    let assert = projdiff().arg("list").arg("--json").assert().code(0);

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let entries: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 17);
    let resolved = entries
        .iter()
        .find(|e| e["tag"] == "resolved_settings")
        .unwrap();
    assert_eq!(resolved["default"], false);
}
