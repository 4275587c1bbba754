// Error types for feature configuration

use flagwire_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("Feature configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
