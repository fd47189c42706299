use std::path::PathBuf;

use thiserror::Error;

/// Failures the driver can tell apart from generic I/O errors.
#[derive(Error, Debug)]
pub enum PubdeclError {
    #[error("{} is not a valid directory", .0.display())]
    InvalidRoot(PathBuf),

    #[error("syntax error at line {line}, column {column} ({count} error node(s) in file)")]
    Syntax {
        line: usize,
        column: usize,
        count: usize,
    },

    #[error("failed to load Kotlin grammar: {0}")]
    Language(String),
}
