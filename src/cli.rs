use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "minidecaf",
    author,
    version,
    about = "Semantic checker for MiniDecaf programs",
    long_about = "Parses a MiniDecaf source file, resolves every name and type checks it.\n\n\
                  Every diagnostic is printed; the exit status is non-zero if there were any."
)]
pub struct Cli {
    #[arg(help = "The source file to check")]
    pub file: PathBuf,

    #[arg(long, help = "Print the checked program")]
    pub dump_ast: bool,

    #[arg(long, value_enum, default_value = "warn", help = "Set the log level")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_default_arguments() {
        let cli = Cli::try_parse_from(["minidecaf", "main.c"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("main.c"));
        assert!(!cli.dump_ast);
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn cli_requires_a_file() {
        assert!(Cli::try_parse_from(["minidecaf"]).is_err());
    }

    #[test]
    fn cli_parses_all_options() {
        let cli = Cli::try_parse_from([
            "minidecaf",
            "--dump-ast",
            "--log-level",
            "debug",
            "tests/sum.c",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("tests/sum.c"));
        assert!(cli.dump_ast);
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn cli_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["minidecaf", "--log-level", "loud", "main.c"]).is_err());
    }

    #[test]
    fn cli_help_shows_options() {
        let mut cmd = Cli::command();
        let help = cmd.render_help().to_string();
        assert!(help.contains("--dump-ast"));
        assert!(help.contains("--log-level"));
    }

    #[test]
    fn log_level_converts_to_tracing_level() {
        assert_eq!(LogLevel::Trace.as_tracing_level(), tracing::Level::TRACE);
        assert_eq!(LogLevel::Debug.as_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Info.as_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Warn.as_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Error.as_tracing_level(), tracing::Level::ERROR);
    }
}
