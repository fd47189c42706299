use std::io::{self, BufWriter};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pubdecl::cli::{self, Invocation, USAGE};

fn main() -> Result<()> {
    let matches = cli::command().get_matches();

    let (config, log_level) = match cli::invocation(&matches) {
        Invocation::Usage => {
            println!("{}", USAGE);
            return Ok(());
        }
        Invocation::Run { config, log_level } => (config, log_level),
    };

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = config.validate() {
        println!("Error: {}", err);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    pubdecl::run(&config, &mut out)?;

    Ok(())
}
