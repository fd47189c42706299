use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::config::{Config, DEFAULT_EXTENSION};

pub const USAGE: &str = "Usage: pubdecl <source-directory>";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// No source directory was given.
    Usage,
    Run { config: Config, log_level: String },
}

pub fn command() -> Command {
    Command::new("pubdecl")
        .about("Print the public declarations of a Kotlin source tree")
        .arg(
            Arg::new("root")
                .help("Root directory to scan for sources")
                .value_parser(value_parser!(std::path::PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .short('e')
                .help("Source file suffix to include (repeatable)")
                .action(ArgAction::Append)
                .default_value(DEFAULT_EXTENSION),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Spaces per nesting level")
                .value_parser(value_parser!(usize))
                .default_value("4"),
        )
        .arg(
            Arg::new("jobs")
                .long("jobs")
                .short('j')
                .help("Worker threads (0 = one per core, 1 = sequential)")
                .value_parser(value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Report files containing syntax errors instead of summarising them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("respect-ignore")
                .long("respect-ignore")
                .help("Skip files excluded by .gitignore and .ignore files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Diagnostics filter written to stderr (e.g. warn, debug, pubdecl=trace)")
                .default_value("warn"),
        )
}

pub fn invocation(matches: &ArgMatches) -> Invocation {
    let Some(root) = matches.get_one::<std::path::PathBuf>("root") else {
        return Invocation::Usage;
    };

    let extensions: Vec<String> = matches
        .get_many::<String>("extension")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let mut config = Config::new(root.clone()).with_extensions(extensions);
    if let Some(indent) = matches.get_one::<usize>("indent") {
        config.indent_width = *indent;
    }
    if let Some(jobs) = matches.get_one::<usize>("jobs") {
        config.jobs = *jobs;
    }
    config.strict = matches.get_flag("strict");
    config.respect_ignore = matches.get_flag("respect-ignore");

    let log_level = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or_else(|| "warn".to_string());

    Invocation::Run { config, log_level }
}
