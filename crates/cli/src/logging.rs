//! Logging initialisation.

use eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::args::LogArgs;

/// Initialize logging based on command line arguments.
///
/// The filter is built with the following precedence:
/// 1. If `--quiet` is set, only errors are shown
/// 2. Otherwise, start with `RUST_LOG` env var if set, or a level from verbosity
/// 3. Apply any custom filter from `--log.filter`
pub fn init_logging(args: &LogArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(args))
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .map_err(|err| eyre::eyre!("failed to initialize logging: {err}"))?;

    Ok(())
}

fn build_filter(args: &LogArgs) -> EnvFilter {
    if args.quiet {
        return EnvFilter::new("error");
    }

    let base_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base_level));

    if let Some(custom_filter) = &args.filter {
        for directive in custom_filter.split(',') {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }
    }

    filter
}
