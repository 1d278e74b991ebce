use std::path::{Path, PathBuf};

use serde_json::json;
use similar_asserts::assert_eq;

use pkgmeta::{Convention, ExportRecord, PackageMetadata, PackageScopeExports, extract_text};

fn fixture(name: &str) -> (PathBuf, String) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path).unwrap();
    (path, text)
}

fn extract_fixture(name: &str) -> PackageMetadata {
    let (path, text) = fixture(name);
    extract_text(&path, &text, &Convention::default())
        .unwrap()
        .metadata
}

fn re_export(name: &str, from: &str, alias: Option<&str>, link_id: u32) -> ExportRecord {
    ExportRecord::ReExport {
        name: name.to_string(),
        from: from.to_string(),
        alias: alias.map(str::to_string),
        link_id: Some(link_id),
    }
}

fn named(name: &str) -> ExportRecord {
    ExportRecord::NamedExport {
        name: name.to_string(),
    }
}

#[test]
fn single_module_package_extracts_to_expected_metadata() {
    let text = r#"
        meteorInstall({ node_modules: { meteor: { "pkg:demo": {
          "index.js": function (require, exports, module) {
            module.export({ Foo: "Foo" });
          }
        } } } });
    "#;
    let metadata = extract_text(Path::new("demo.js"), text, &Convention::default())
        .unwrap()
        .metadata;
    assert_eq!(
        serde_json::to_value(&metadata).unwrap(),
        json!({
            "name": "pkg:demo",
            "modules": { "index.js": [{ "type": "NamedExport", "name": "Foo" }] },
            "packageScopeExports": {}
        })
    );
}

#[test]
fn modern_package_bundle_extracts_every_module_in_order() {
    let metadata = extract_fixture("ostrio_cookies.js");

    assert_eq!(metadata.name, "ostrio:cookies");
    assert_eq!(
        metadata.modules.keys().map(String::as_str).collect::<Vec<&str>>(),
        vec!["cookies.js", "lib/helpers.js", "lib/server/legacy.js"]
    );
    assert_eq!(
        metadata.modules["cookies.js"],
        vec![
            ExportRecord::GlobalBinding {
                name: "Meteor".to_string(),
                from: "meteor/meteor".to_string(),
                link_id: Some(0),
            },
            named("Cookies"),
        ]
    );
    assert_eq!(
        metadata.modules["lib/helpers.js"],
        vec![
            re_export("Cookies", "../cookies.js", None, 1),
            re_export("*", "../cookies.js", None, 1),
            named("parseCookie"),
            named("format-cookie"),
            ExportRecord::DefaultExport {
                name: "helpers".to_string()
            },
        ]
    );
    assert_eq!(
        metadata.modules["lib/server/legacy.js"],
        vec![re_export("legacyParse", "./legacy-impl.js", Some("parse"), 2)]
    );
    assert_eq!(
        metadata.main_module_path.as_deref(),
        Some("/node_modules/meteor/ostrio:cookies/cookies.js")
    );
    assert_eq!(metadata.main_module_key(), Some("cookies.js"));
    assert_eq!(
        metadata.package_scope_exports["ostrio:cookies"]
            .iter()
            .map(String::as_str)
            .collect::<Vec<&str>>(),
        vec!["Cookies"]
    );
    assert_eq!(
        metadata
            .global_bindings()
            .map(|(path, record)| (path, record.name()))
            .collect::<Vec<(&str, &str)>>(),
        vec![("cookies.js", "Meteor")]
    );
}

#[test]
fn legacy_package_uses_second_define_argument_as_package_exports() {
    let metadata = extract_fixture("legacy_tracker.js");

    assert_eq!(metadata.name, "tracker");
    assert!(metadata.modules.is_empty());
    assert_eq!(metadata.main_module_path, None);
    let mut expected = PackageScopeExports::new();
    expected.insert(
        "tracker".to_string(),
        ["Tracker", "Deps"]
            .into_iter()
            .map(str::to_string)
            .collect(),
    );
    assert_eq!(metadata.package_scope_exports, expected);
}

#[test]
fn modules_only_package_defines_name_with_module_exports() {
    let metadata = extract_fixture("acme_widgets.js");

    assert_eq!(metadata.name, "acme:widgets");
    assert_eq!(
        metadata.modules.keys().map(String::as_str).collect::<Vec<&str>>(),
        vec!["index.js", "lib/registry.js"]
    );
    assert_eq!(
        metadata.modules["index.js"],
        vec![
            named("Widget"),
            named("createWidget"),
            ExportRecord::GlobalBinding {
                name: "Registry".to_string(),
                from: "./lib/registry.js".to_string(),
                link_id: Some(0),
            },
        ]
    );
    assert_eq!(metadata.modules["lib/registry.js"], vec![named("Registry")]);
    assert_eq!(
        metadata.main_module_path.as_deref(),
        Some("/node_modules/meteor/acme:widgets/index.js")
    );
    assert!(metadata.package_scope_exports.is_empty());
}

#[test]
fn every_leaf_at_any_depth_gets_exactly_one_entry() {
    let mut tree = String::new();
    let mut expected = Vec::new();
    for depth in 1..=6usize {
        let dirs = (0..depth).map(|level| format!("d{level}")).collect::<Vec<_>>();
        let leaf = format!("leaf{depth}.js");
        let mut entry = format!("\"{leaf}\": function () {{}}");
        for dir in dirs.iter().rev() {
            entry = format!("{dir}: {{ {entry} }}");
        }
        tree.push_str(&format!("branch{depth}: {{ {entry} }},"));
        expected.push(format!("branch{depth}/{}/{leaf}", dirs.join("/")));
    }
    let text =
        format!("meteorInstall({{ node_modules: {{ meteor: {{ deep: {{ {tree} }} }} }} }});");

    let metadata = extract_text(Path::new("deep.js"), &text, &Convention::default())
        .unwrap()
        .metadata;
    assert_eq!(
        metadata.modules.keys().cloned().collect::<Vec<String>>(),
        expected
    );
    assert!(metadata.modules.values().all(Vec::is_empty));
}

#[test]
fn extraction_is_idempotent() {
    let (path, text) = fixture("ostrio_cookies.js");
    let convention = Convention::default();
    let first = extract_text(&path, &text, &convention).unwrap();
    let second = extract_text(&path, &text, &convention).unwrap();
    assert_eq!(first.metadata, second.metadata);
}

#[test]
fn extraction_reports_path_metadata_and_elapsed_time() {
    let (path, text) = fixture("legacy_tracker.js");
    let extraction = extract_text(&path, &text, &Convention::default()).unwrap();
    let report = serde_json::to_value(extraction.report()).unwrap();
    assert_eq!(report["metadata"]["name"].as_str(), Some("tracker"));
    assert!(report["path"].as_str().unwrap().ends_with("legacy_tracker.js"));
    assert!(!report["elapsed"].as_str().unwrap().is_empty());
}
