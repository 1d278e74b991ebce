use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Structural,
    MissingName,
    Empty,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse bundle {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unexpected bundle shape in {path} at {start}..{end}: {message} (`{snippet}`)")]
    Shape {
        path: PathBuf,
        message: String,
        start: u32,
        end: u32,
        snippet: String,
    },

    #[error("module path {module_path} appears twice in {path}")]
    DuplicateModulePath { path: PathBuf, module_path: String },

    #[error("no package name found in {path}")]
    MissingName { path: PathBuf },

    #[error("no modules or package exports found in {path}")]
    Empty { path: PathBuf },
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::Io { .. } => ErrorKind::Io,
            ExtractError::Parse { .. } => ErrorKind::Parse,
            ExtractError::Shape { .. } | ExtractError::DuplicateModulePath { .. } => {
                ErrorKind::Structural
            }
            ExtractError::MissingName { .. } => ErrorKind::MissingName,
            ExtractError::Empty { .. } => ErrorKind::Empty,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            ExtractError::Io { path, .. }
            | ExtractError::Parse { path, .. }
            | ExtractError::Shape { path, .. }
            | ExtractError::DuplicateModulePath { path, .. }
            | ExtractError::MissingName { path }
            | ExtractError::Empty { path } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid moduleBindingPrefix {prefix:?}: {message}")]
    BindingPattern { prefix: String, message: String },
}
