pub mod args;
pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod logging;
pub mod model;
pub mod parallel_stride;
pub mod profile;
pub mod source;

#[cfg(test)]
mod profile_test;
#[cfg(test)]
mod source_test;

pub use error::{ErrorKind, ExtractError};
pub use extract::{Convention, Extraction, extract, extract_text};
pub use model::{ExportRecord, ModuleList, PackageMetadata, PackageScopeExports};
pub use source::{BundleInput, BundleText};
