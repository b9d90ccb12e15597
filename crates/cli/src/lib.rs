pub mod collector;
pub mod logging;
pub mod session;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use package_express_core::config::{
    AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat,
};

use crate::session::Session;

pub const CONFIG_FAILURE_EXIT_CODE: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "package-express",
    about = "Package Express shipping quote",
    long_about = "Prompt for a package's weight and dimensions, check them against the shipping limits, and print a quote.",
    after_help = "Examples:\n  package-express\n  package-express --log-level debug --log-format json"
)]
pub struct Cli {
    #[arg(long, value_name = "PATH", help = "Read logging settings from this TOML file")]
    config: Option<PathBuf>,
    #[arg(
        long,
        value_name = "LEVEL",
        help = "Log level written to stderr (trace|debug|info|warn|error)"
    )]
    log_level: Option<String>,
    #[arg(
        long,
        value_name = "FORMAT",
        value_parser = parse_log_format,
        help = "Log format written to stderr (compact|pretty|json)"
    )]
    log_format: Option<LogFormat>,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                log_level: self.log_level.clone(),
                log_format: self.log_format,
            },
        }
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    value.parse().map_err(|error: ConfigError| error.to_string())
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    AppConfig::load(cli.load_options()).context("could not load package-express configuration")
}

/// Every session outcome exits successfully; only a bad configuration stops the program early.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error:#}");
            return ExitCode::from(CONFIG_FAILURE_EXIT_CODE);
        }
    };
    logging::init(&config.logging);

    tracing::info!(event_name = "system.session.starting", "package express session starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = Session::new(stdin.lock(), stdout.lock()).run();

    tracing::info!(
        event_name = "system.session.finished",
        outcome = outcome.label(),
        "package express session finished"
    );
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use package_express_core::config::LogFormat;

    use super::Cli;

    #[test]
    fn no_arguments_means_plain_interactive_session() {
        let cli = Cli::try_parse_from(["package-express"]).expect("parse without flags");
        let options = cli.load_options();

        assert!(options.config_path.is_none());
        assert!(!options.require_file);
        assert!(options.overrides.log_level.is_none());
        assert!(options.overrides.log_format.is_none());
    }

    #[test]
    fn explicit_config_path_is_required_to_exist() {
        let cli = Cli::try_parse_from([
            "package-express",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])
        .expect("parse with flags");
        let options = cli.load_options();

        assert_eq!(options.config_path, Some(PathBuf::from("custom.toml")));
        assert!(options.require_file);
        assert_eq!(options.overrides.log_level.as_deref(), Some("debug"));
        assert_eq!(options.overrides.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn unknown_log_format_is_a_usage_error() {
        assert!(Cli::try_parse_from(["package-express", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn subcommands_are_not_accepted() {
        assert!(Cli::try_parse_from(["package-express", "quote"]).is_err());
    }
}
