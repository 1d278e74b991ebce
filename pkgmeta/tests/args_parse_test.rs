use std::path::PathBuf;

use pkgmeta::args::parse_args;
use pkgmeta::batch::FailurePolicy;

#[test]
fn bundles_and_flags_are_parsed() {
    let cli = parse_args([
        "pkgmeta",
        "-j",
        "4",
        "--keep-going",
        "--pretty",
        "-vv",
        "a.js",
        "b.js",
    ])
    .unwrap();
    assert_eq!(cli.concurrency, Some(4));
    assert!(cli.pretty);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.failure_policy(), FailurePolicy::KeepGoing);
    assert_eq!(cli.bundles, vec![PathBuf::from("a.js"), PathBuf::from("b.js")]);
    assert_eq!(cli.config, None);
}

#[test]
fn defaults_abort_on_first_failure() {
    let cli = parse_args(["pkgmeta", "--config", "cfg.json5", "x.js"]).unwrap();
    assert_eq!(cli.failure_policy(), FailurePolicy::AbortOnFirst);
    assert_eq!(cli.config, Some(PathBuf::from("cfg.json5")));
    assert_eq!(cli.concurrency, None);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn at_least_one_bundle_is_required() {
    let err = parse_args(["pkgmeta", "--pretty"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn non_numeric_concurrency_is_rejected() {
    assert!(parse_args(["pkgmeta", "-j", "many", "a.js"]).is_err());
}
