use std::path::{Path, PathBuf};

use crate::error::PubdeclError;
use crate::renderer::DEFAULT_INDENT_WIDTH;

pub const DEFAULT_EXTENSION: &str = "kt";

/// Settings for one run over a source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory whose sources are summarised.
    pub root: PathBuf,
    /// File suffixes (without the dot) treated as sources.
    pub extensions: Vec<String>,
    /// Spaces per nesting level in the report.
    pub indent_width: usize,
    /// Worker threads; 0 lets rayon decide, 1 processes files sequentially.
    pub jobs: usize,
    /// Report files with syntax errors instead of summarising what parsed.
    pub strict: bool,
    /// Skip files excluded by `.gitignore` / `.ignore`.
    pub respect_ignore: bool,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            indent_width: DEFAULT_INDENT_WIDTH,
            jobs: 0,
            strict: false,
            respect_ignore: false,
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        if self.extensions.is_empty() {
            self.extensions.push(DEFAULT_EXTENSION.to_string());
        }
        self
    }

    pub fn validate(&self) -> Result<(), PubdeclError> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(PubdeclError::InvalidRoot(self.root.clone()))
        }
    }

    pub fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted == ext))
    }
}
