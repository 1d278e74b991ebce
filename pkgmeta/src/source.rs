use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ExtractError;

type DeferredText = Box<dyn FnOnce() -> std::io::Result<String> + Send>;

/// Where the bundle's program text comes from.
pub enum BundleText {
    ReadFromPath,
    Loaded(Arc<str>),
    Deferred(DeferredText),
}

impl fmt::Debug for BundleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleText::ReadFromPath => f.write_str("ReadFromPath"),
            BundleText::Loaded(text) => write!(f, "Loaded({} bytes)", text.len()),
            BundleText::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

#[derive(Debug)]
pub struct BundleInput {
    pub path: PathBuf,
    pub text: BundleText,
}

impl BundleInput {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            text: BundleText::ReadFromPath,
        }
    }

    pub fn with_text(path: impl Into<PathBuf>, text: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            text: BundleText::Loaded(text.into()),
        }
    }

    pub fn deferred<F>(path: impl Into<PathBuf>, load: F) -> Self
    where
        F: FnOnce() -> std::io::Result<String> + Send + 'static,
    {
        Self {
            path: path.into(),
            text: BundleText::Deferred(Box::new(load)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(self) -> Result<(PathBuf, Arc<str>), ExtractError> {
        let text = match self.text {
            BundleText::Loaded(text) => text,
            BundleText::ReadFromPath => read_text(&self.path, std::fs::read_to_string(&self.path))?,
            BundleText::Deferred(load) => read_text(&self.path, load())?,
        };
        Ok((self.path, text))
    }
}

fn read_text(path: &Path, result: std::io::Result<String>) -> Result<Arc<str>, ExtractError> {
    result.map(Arc::from).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}
