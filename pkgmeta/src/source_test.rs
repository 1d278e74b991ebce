use std::io::Write;

use tempfile::NamedTempFile;

use crate::error::ErrorKind;
use crate::source::BundleInput;

#[test]
fn loaded_text_is_returned_as_is() {
    let (path, text) = BundleInput::with_text("pkg.js", "var a = 1;").load().unwrap();
    assert_eq!(path.to_str(), Some("pkg.js"));
    assert_eq!(&*text, "var a = 1;");
}

#[test]
fn path_input_reads_the_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "Package._define(\"x\");").unwrap();
    let (_, text) = BundleInput::from_path(file.path()).load().unwrap();
    assert_eq!(&*text, "Package._define(\"x\");");
}

#[test]
fn deferred_text_runs_the_loader_once_at_load_time() {
    let input = BundleInput::deferred("lazy.js", || Ok("var lazy;".to_string()));
    let (_, text) = input.load().unwrap();
    assert_eq!(&*text, "var lazy;");
}

#[test]
fn read_failures_carry_the_bundle_path() {
    let err = BundleInput::from_path("/definitely/missing/bundle.js")
        .load()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.path().ends_with("bundle.js"));
}

#[test]
fn deferred_failures_are_io_errors() {
    let input = BundleInput::deferred("lazy.js", || {
        Err(std::io::Error::other("cache evicted"))
    });
    let err = input.load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains("cache evicted"));
}
