use ::config::{Config, Environment, File};
use nullset_hasher::zero_bytes::MAX_HEIGHT;
use serde::{Deserialize, Serialize};

use crate::errors::ProverClientError;

pub const DEFAULT_HEIGHT: usize = 32;
pub const ENV_PREFIX: &str = "NULLSET";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulatorConfig {
    /// Height of the indexed Merkle tree.
    pub height: usize,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
        }
    }
}

impl AccumulatorConfig {
    /// Loads the configuration from an optional file, overridden by
    /// `NULLSET_*` environment variables.
    pub fn load(path: Option<&str>) -> Result<Self, ProverClientError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProverClientError> {
        if self.height == 0 || self.height > MAX_HEIGHT {
            return Err(ProverClientError::InvalidHeight(self.height, MAX_HEIGHT));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::{env, fs};

    use serial_test::serial;

    use super::*;

    const HEIGHT_VAR: &str = "NULLSET_HEIGHT";

    #[test]
    #[serial]
    fn test_load_defaults() {
        env::remove_var(HEIGHT_VAR);
        let config = AccumulatorConfig::load(None).unwrap();
        assert_eq!(config, AccumulatorConfig::default());
        assert_eq!(config.height, DEFAULT_HEIGHT);
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        env::set_var(HEIGHT_VAR, "20");
        let config = AccumulatorConfig::load(None);
        env::remove_var(HEIGHT_VAR);
        assert_eq!(config.unwrap().height, 20);
    }

    #[test]
    #[serial]
    fn test_load_from_file_and_env() {
        env::remove_var(HEIGHT_VAR);
        let path = env::temp_dir().join(format!("nullset-config-{}.toml", std::process::id()));
        fs::write(&path, "height = 10\n").unwrap();
        let path_str = path.to_str().unwrap().to_string();

        let config = AccumulatorConfig::load(Some(&path_str)).unwrap();
        assert_eq!(config.height, 10);

        // Environment variables take precedence.
        env::set_var(HEIGHT_VAR, "12");
        let config = AccumulatorConfig::load(Some(&path_str));
        env::remove_var(HEIGHT_VAR);
        fs::remove_file(&path).unwrap();
        assert_eq!(config.unwrap().height, 12);
    }

    #[test]
    #[serial]
    fn test_invalid_height() {
        env::set_var(HEIGHT_VAR, "33");
        let result = AccumulatorConfig::load(None);
        env::remove_var(HEIGHT_VAR);
        assert!(matches!(
            result,
            Err(ProverClientError::InvalidHeight(33, MAX_HEIGHT))
        ));

        assert!(matches!(
            AccumulatorConfig { height: 0 }.validate(),
            Err(ProverClientError::InvalidHeight(0, _))
        ));
        assert!(AccumulatorConfig { height: 1 }.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_missing_file() {
        env::remove_var(HEIGHT_VAR);
        assert!(matches!(
            AccumulatorConfig::load(Some("/nonexistent/nullset.toml")),
            Err(ProverClientError::Config(_))
        ));
    }
}
