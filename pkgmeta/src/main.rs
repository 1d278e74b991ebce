use std::process::ExitCode;

use pkgmeta::args::parse_args;
use pkgmeta::batch::extract_with_policy;
use pkgmeta::config::{ExtractorConfig, load_config, load_config_from_path};
use pkgmeta::extract::Convention;
use pkgmeta::source::BundleInput;

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };
    pkgmeta::logging::init(cli.verbose);

    let config = match load_cli_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let convention = match Convention::from_config(&config) {
        Ok(convention) => convention,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let concurrency = cli
        .concurrency
        .filter(|count| *count > 0)
        .unwrap_or_else(|| config.effective_concurrency());

    let inputs = cli
        .bundles
        .iter()
        .map(|path| {
            BundleInput::from_path(dunce::canonicalize(path).unwrap_or_else(|_| path.clone()))
        })
        .collect::<Vec<_>>();
    let results = extract_with_policy(inputs, &convention, concurrency, cli.failure_policy());

    let mut failed = false;
    let mut extractions = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(extraction) => {
                tracing::info!(
                    path = %extraction.path.display(),
                    package = %extraction.metadata.name,
                    elapsed = %extraction.elapsed_display(),
                    "parsed package"
                );
                extractions.push(extraction);
            }
            Err(err) => {
                failed = true;
                tracing::error!(path = %err.path().display(), kind = ?err.kind(), "{err}");
            }
        }
    }
    if failed && !cli.keep_going {
        return ExitCode::FAILURE;
    }

    let reports = extractions.iter().map(|e| e.report()).collect::<Vec<_>>();
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&reports)
    } else {
        serde_json::to_string(&reports)
    };
    match rendered {
        Ok(json) => println!("{json}"),
        Err(err) => {
            tracing::error!("failed to serialize metadata: {err}");
            return ExitCode::FAILURE;
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn load_cli_config(
    explicit: Option<&std::path::Path>,
) -> Result<ExtractorConfig, pkgmeta::error::ConfigError> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    load_config(&cwd)
}
