use crate::config::EvaluatorConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads evaluator configuration by merging TOML and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<EvaluatorConfig> {
        let config: EvaluatorConfig = Figment::new()
            .merge(Toml::file("config/Gate.toml"))
            .merge(Env::prefixed("GATE_"))
            .extract()?;

        Ok(config)
    }

    /// Loads evaluator configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<EvaluatorConfig> {
        let config: EvaluatorConfig = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("GATE_"))
            .extract()?;

        Ok(config)
    }
}
