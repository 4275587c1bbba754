// Configuration loading for flagwire
// Prefixed environment lookups, JSON/TOML files and validation helpers

pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use env::{EnvLoader, upper_case_name};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};
