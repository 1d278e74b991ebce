use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;
use path_slash::PathExt;
use regex::Regex;
use serde::Serialize;

use crate::config::ExtractorConfig;
use crate::error::{ConfigError, ExtractError};
use crate::format::time::format_duration;
use crate::model::PackageMetadata;
use crate::source::BundleInput;

mod ast_utils;
mod collector;
mod exports;
mod installer;
mod main_module;
mod package_scope;


use ast_utils::Defect;
use collector::BundleCollector;

pub const DEFAULT_INSTALLER_IDENT: &str = "meteorInstall";
pub const DEFAULT_REGISTRY_IDENT: &str = "Package";
pub const DEFAULT_MODULE_BINDING_PREFIX: &str = "module";

const SNIPPET_MAX_CHARS: usize = 80;

static DEFAULT_MODULE_BINDING: Lazy<Regex> =
    Lazy::new(|| module_binding_regex(DEFAULT_MODULE_BINDING_PREFIX).expect("valid pattern"));

fn module_binding_regex(prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"^{}\d*$", regex::escape(prefix)))
}

/// The identifiers a bundle uses for the installer, the package registry and
/// the per-module API aliases (`module`, `module1`, `module2`, ...).
#[derive(Debug, Clone)]
pub struct Convention {
    installer_ident: String,
    registry_ident: String,
    module_binding: Regex,
}

impl Default for Convention {
    fn default() -> Self {
        Self {
            installer_ident: DEFAULT_INSTALLER_IDENT.to_string(),
            registry_ident: DEFAULT_REGISTRY_IDENT.to_string(),
            module_binding: DEFAULT_MODULE_BINDING.clone(),
        }
    }
}

impl Convention {
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ConfigError> {
        let module_binding = module_binding_regex(&config.module_binding_prefix).map_err(|err| {
            ConfigError::BindingPattern {
                prefix: config.module_binding_prefix.clone(),
                message: err.to_string(),
            }
        })?;
        Ok(Self {
            installer_ident: config.installer_ident.clone(),
            registry_ident: config.registry_ident.clone(),
            module_binding,
        })
    }

    pub fn installer_ident(&self) -> &str {
        &self.installer_ident
    }

    pub fn registry_ident(&self) -> &str {
        &self.registry_ident
    }

    pub fn is_module_binding(&self, ident: &str) -> bool {
        self.module_binding.is_match(ident)
    }
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub path: PathBuf,
    pub metadata: PackageMetadata,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport<'a> {
    pub path: String,
    pub metadata: &'a PackageMetadata,
    pub elapsed: String,
}

impl Extraction {
    pub fn elapsed_display(&self) -> String {
        format_duration(self.elapsed)
    }

    pub fn report(&self) -> ExtractionReport<'_> {
        ExtractionReport {
            path: self.path.to_slash_lossy().into_owned(),
            metadata: &self.metadata,
            elapsed: self.elapsed_display(),
        }
    }
}

/// Acquires the bundle text and extracts its metadata.
pub fn extract(input: BundleInput, convention: &Convention) -> Result<Extraction, ExtractError> {
    let (path, text) = input.load()?;
    extract_text(&path, &text, convention)
}

/// Extracts package metadata from bundle text already in memory. `path` is
/// only used for diagnostics.
pub fn extract_text(
    path: &Path,
    text: &str,
    convention: &Convention,
) -> Result<Extraction, ExtractError> {
    let _span = crate::profile::span("extract");
    let started = Instant::now();

    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, text, bundle_source_type()).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(|e| format!("{e:?}"))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(ExtractError::Parse {
            path: path.to_path_buf(),
            message,
        });
    }

    let mut collector = BundleCollector::new(convention);
    collector.visit_program(&parsed.program);
    let metadata = collector
        .into_result()
        .map_err(|defect| defect_to_error(defect, path, text))?
        .finish(path)?;

    let extraction = Extraction {
        path: path.to_path_buf(),
        metadata,
        elapsed: started.elapsed(),
    };
    tracing::debug!(
        path = %path.display(),
        package = %extraction.metadata.name,
        modules = extraction.metadata.modules.len(),
        elapsed = %extraction.elapsed_display(),
        "extracted package metadata"
    );
    Ok(extraction)
}

/// Bundles are classic scripts, not ES modules.
pub(crate) fn bundle_source_type() -> SourceType {
    SourceType::default().with_script(true)
}

fn defect_to_error(defect: Defect, path: &Path, text: &str) -> ExtractError {
    match defect {
        Defect::Shape { message, span } => ExtractError::Shape {
            path: path.to_path_buf(),
            message,
            start: span.start,
            end: span.end,
            snippet: snippet(text, span.start, span.end),
        },
        Defect::DuplicateModulePath(module_path) => ExtractError::DuplicateModulePath {
            path: path.to_path_buf(),
            module_path,
        },
    }
}

fn snippet(text: &str, start: u32, end: u32) -> String {
    let Some(raw) = text.get(start as usize..end as usize) else {
        return String::new();
    };
    let flattened = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= SNIPPET_MAX_CHARS {
        return flattened;
    }
    let mut out = flattened.chars().take(SNIPPET_MAX_CHARS).collect::<String>();
    out.push('…');
    out
}
