//! # pubdecl
//!
//! Prints the publicly visible declarations of a Kotlin source tree as a
//! readable outline, one section per file.
//!
//! Sources are parsed with tree-sitter into a [`DeclarationTree`], filtered by
//! effective visibility (a declaration is public only if it and every
//! enclosing declaration lack `private`, `internal` and `protected`) and
//! rendered kind by kind with nested bodies indented one level per scope.

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod parser;
pub mod renderer;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use driver::{discover_sources, run, run_with, RunSummary};
pub use error::PubdeclError;
pub use parser::*;
pub use renderer::*;
pub use visibility::{constructor_is_visible, is_public};
