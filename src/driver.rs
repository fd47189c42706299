use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::config::Config;
use crate::parser::{DeclarationParser, KotlinParser};
use crate::renderer::FileRenderer;

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub failed: usize,
}

/// Rendered output for one source file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub output: String,
    pub failed: bool,
}

/// Summarises every source under `config.root` with the Kotlin parser.
pub fn run(config: &Config, out: &mut dyn Write) -> Result<RunSummary> {
    let strict = config.strict;
    run_with(config, move || Ok(KotlinParser::new()?.strict(strict)), out)
}

/// Like [`run`], with parsers built by `make_parser` (one per worker).
pub fn run_with<P, F>(config: &Config, make_parser: F, out: &mut dyn Write) -> Result<RunSummary>
where
    P: DeclarationParser,
    F: Fn() -> Result<P> + Sync + Send,
{
    config.validate()?;

    let files = discover_sources(config);
    tracing::debug!(root = %config.root.display(), count = files.len(), "discovered sources");

    let reports = process_files(config, &files, make_parser)?;

    let mut summary = RunSummary::default();
    for report in &reports {
        out.write_all(report.output.as_bytes())
            .context("failed to write report")?;
        summary.files += 1;
        if report.failed {
            summary.failed += 1;
        }
    }
    out.flush().context("failed to flush report")?;

    tracing::info!(files = summary.files, failed = summary.failed, "finished");
    Ok(summary)
}

/// Source files under the root, sorted by path.
pub fn discover_sources(config: &Config) -> Vec<PathBuf> {
    let mut walker = WalkBuilder::new(&config.root);
    walker
        .standard_filters(config.respect_ignore)
        .hidden(false)
        .require_git(false);

    let mut files = Vec::new();
    for result in walker.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if is_file && config.is_source(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}

/// Renders each file into its own buffer, keeping the input order.
pub fn process_files<P, F>(config: &Config, files: &[PathBuf], make_parser: F) -> Result<Vec<FileReport>>
where
    P: DeclarationParser,
    F: Fn() -> Result<P> + Sync + Send,
{
    let renderer = FileRenderer::new(config.indent_width);
    let root = config.root.as_path();

    if config.jobs == 1 {
        let mut parser = make_parser();
        return Ok(files
            .iter()
            .map(|path| process_file(&mut parser, root, path, &renderer))
            .collect());
    }

    let render_all = || -> Vec<FileReport> {
        files
            .par_iter()
            .map_init(&make_parser, |parser, path| process_file(parser, root, path, &renderer))
            .collect()
    };

    if config.jobs == 0 {
        return Ok(render_all());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .context("failed to build worker pool")?;
    Ok(pool.install(render_all))
}

fn process_file<P: DeclarationParser>(
    parser: &mut Result<P>,
    root: &Path,
    path: &Path,
    renderer: &FileRenderer,
) -> FileReport {
    let relative = path.strip_prefix(root).unwrap_or(path).display().to_string();
    let _span = tracing::info_span!("file", path = %relative).entered();

    match render_file(parser, path, &relative, renderer) {
        Ok(output) => {
            tracing::debug!("rendered");
            FileReport {
                output,
                failed: false,
            }
        }
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "failed to process file");
            FileReport {
                output: format!("Error processing file {}: {:#}\n", path.display(), err),
                failed: true,
            }
        }
    }
}

fn render_file<P: DeclarationParser>(
    parser: &mut Result<P>,
    path: &Path,
    relative: &str,
    renderer: &FileRenderer,
) -> Result<String> {
    let source = fs::read_to_string(path)?;
    let parser = parser.as_mut().map_err(|err| anyhow!("{err:#}"))?;
    let tree = parser.parse(&source)?;
    Ok(renderer.render_to_string(relative, &tree))
}
