//! CLI configuration

use std::path::PathBuf;

use clap::{Args, Parser};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Session settings.
#[derive(Debug, Args)]
pub(crate) struct SessionConfig {
    /// Service catalog YAML file
    #[arg(
        short,
        long,
        env = "STOREFRONT_CATALOG",
        default_value = "fixtures/catalog/demo.yml"
    )]
    pub catalog: PathBuf,

    /// Checkout script YAML file
    #[arg(
        short = 'k',
        long,
        env = "STOREFRONT_CHECKOUT",
        default_value = "fixtures/checkouts/demo.yml"
    )]
    pub checkout: PathBuf,

    /// Seed for order id generation; drawn from the OS when absent
    #[arg(short, long, env = "STOREFRONT_SEED")]
    pub seed: Option<u64>,

    /// Offer face authentication
    #[arg(long, env = "STOREFRONT_FACE_AUTH")]
    pub face_auth: bool,
}

/// Storefront CLI configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Run a scripted storefront checkout", long_about = None)]
pub(crate) struct CliConfig {
    /// Catalog, script and session settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        CliConfig::command().debug_assert();
    }

    #[test]
    fn explicit_arguments_are_parsed() -> TestResult {
        let config = CliConfig::try_parse_from([
            "storefront",
            "--catalog",
            "catalog.yml",
            "--checkout",
            "script.yml",
            "--seed",
            "42",
            "--face-auth",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])?;

        assert_eq!(config.session.catalog, PathBuf::from("catalog.yml"));
        assert_eq!(config.session.checkout, PathBuf::from("script.yml"));
        assert_eq!(config.session.seed, Some(42));
        assert!(config.session.face_auth, "flag should be set");
        assert_eq!(config.logging.log_format, LogFormat::Json);
        assert_eq!(config.logging.log_level, "debug");

        Ok(())
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = CliConfig::try_parse_from(["storefront", "--log-format", "xml"]);

        assert!(result.is_err(), "xml is not a log format");
    }
}
