use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;

/// Installs a stderr subscriber. `RUST_LOG` directives are honoured on top of
/// the level given on the command line.
pub fn init_logging(cli: &Cli) {
    let level = cli.log_level.as_tracing_level();
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
