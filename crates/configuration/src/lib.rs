use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    AiSettings, AnalysisSettings, DatabaseSettings, LoggingSettings, ServerSettings, Settings,
};

/// Loads the application settings from an optional `config.toml` in the working
/// directory and from the environment.
///
/// This function is the primary entry point for this crate.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config.toml"))
}

/// Loads the settings using `path` as the (optional) configuration file.
///
/// Sources, lowest precedence first: built-in defaults, the file, then
/// `PYRA__SECTION__KEY` environment variables. Unset secrets and the port fall
/// back to `DATABASE_URL`, `OPENAI_API_KEY` and `PORT`.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("PYRA")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut settings = builder.try_deserialize::<Settings>()?;
    settings.apply_fallbacks(|name| std::env::var(name).ok());
    settings.validate()?;

    Ok(settings)
}
