use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AnalysisSettings, IngestionSettings, LoggingSettings, OutputFormat, Precision, Settings,
};

/// Prefix for environment overrides, e.g. `SALESPERF__ANALYSIS__TOP_PRODUCTS=3`.
pub const ENV_PREFIX: &str = "SALESPERF";

/// Loads the application configuration.
///
/// Sources are layered, later ones winning: built-in defaults, then the TOML file
/// (`path` if given and required to exist, otherwise an optional `config.toml` in the
/// working directory), then `SALESPERF__*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(config::Config::try_from(&Settings::default())?)
        .add_source(file)
        .add_source(environment())
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;
    tracing::debug!(?settings, "Configuration loaded");

    Ok(settings)
}

/// The `SALESPERF__*` source. List-valued keys take comma-separated values,
/// e.g. `SALESPERF__ROSTER=Ada,Grace`.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("roster")
        .with_list_parse_key("ingestion.index_aliases")
        .try_parsing(true)
}

/// Parses settings from an in-memory TOML document, on top of the defaults.
/// Environment variables are not consulted.
pub fn load_config_from_str(toml: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Config::try_from(&Settings::default())?)
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
