use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{ApiConfig, Config, DashboardConfig, LoggingConfig};

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `TRADEBOARD__API__API_KEY`.
pub const ENV_PREFIX: &str = "TRADEBOARD";

/// Loads the application configuration from `config.toml` and the environment.
///
/// The file is optional: built-in defaults apply to every missing key.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE), false)
}

/// Loads the configuration from an explicit file, layered under environment overrides.
///
/// With `required = true` a missing file is an error; otherwise it is skipped.
pub fn load_config_from(path: &Path, required: bool) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(required))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
