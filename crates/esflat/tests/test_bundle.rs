use std::{fs, path::Path};

use esflat::{BundleOrchestrator, Config, NoProgress, module_list::ModuleEntry};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const TIMESTAMP: &str = "2025-11-15T16:32:59.357976";

fn fixture_root() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/skelly"))
}

fn build_fixture() -> String {
    let orchestrator =
        BundleOrchestrator::new(fixture_root(), Config::default()).expect("default config is valid");
    orchestrator
        .build(TIMESTAMP, &mut NoProgress)
        .expect("fixture modules are all present")
        .text
}

#[test]
fn test_fixture_bundle_matches_expected() {
    let expected = fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/skelly-bundle.expected.js"
    ))
    .expect("read expected bundle");

    assert_eq!(build_fixture(), expected);
}

#[test]
fn test_fixture_closure_has_no_module_syntax() {
    let bundle = build_fixture();
    let body = &bundle[bundle.find("(() => {").expect("closure start")..];

    for line in body.lines() {
        assert!(
            !line.starts_with("import") && !line.starts_with("export"),
            "module syntax left in bundle: {line}"
        );
    }
}

#[test]
fn test_fixture_helper_declared_once_by_first_holder() {
    let bundle = build_fixture();
    let declaration = "const $ = (selector) => document.querySelector(selector);";

    assert_eq!(bundle.matches(declaration).count(), 1);

    let edit_modal = bundle.find("// Edit Modal Manager (js/edit-modal.js)").expect("banner");
    let app = bundle.find("// Main Application (app-modular.js)").expect("banner");
    let kept = bundle.find(declaration).expect("declaration");
    let placeholder = bundle.find("// $ helper already defined above").expect("placeholder");
    assert!(edit_modal < kept && kept < app && app < placeholder);
}

#[test]
fn test_run_writes_into_project_root() {
    let temp_dir = TempDir::new().expect("create temp dir");
    fs::write(temp_dir.path().join("a.js"), "export const X = 1;\n").expect("write a.js");
    fs::write(
        temp_dir.path().join("b.js"),
        "import {X} from './a.js'; console.log(X);\n",
    )
    .expect("write b.js");

    let config = Config {
        modules: vec![ModuleEntry::new("a.js", "A"), ModuleEntry::new("b.js", "B")],
        ..Config::default()
    };
    let report = BundleOrchestrator::new(temp_dir.path(), config)
        .expect("valid config")
        .run(&mut NoProgress)
        .expect("bundle written");

    let bundle = fs::read_to_string(temp_dir.path().join("app-bundled.js")).expect("read bundle");
    assert_eq!(report.size, bundle.len() as u64);
    assert!(bundle.contains("const X = 1;\n"));
    assert!(bundle.contains("\nconsole.log(X);\n"));
}
