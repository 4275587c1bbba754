//! Flag names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A case-insensitive feature name.
///
/// The name is lower-cased on construction, so `Paginate`, `PAGINATE` and
/// `paginate` are the same flag everywhere: in overlays, in stores and when
/// forming the environment variable name.
///
/// ```
/// use flagwire_features::Flag;
///
/// assert_eq!(Flag::new("Paginate"), Flag::new("PAGINATE"));
/// assert_eq!(Flag::new("Paginate").as_str(), "paginate");
/// assert_eq!(Flag::new("dark-mode").env_suffix(), "DARK-MODE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Flag(String);

impl Flag {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased name, appended to the environment prefix.
    pub fn env_suffix(&self) -> String {
        flagwire_config::upper_case_name(&self.0)
    }

    /// Resolve this flag with the default resolver.
    pub fn is_enabled(&self, overlay: &crate::FlagOverlay) -> bool {
        crate::resolver::is_enabled(overlay, self)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Flag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Flag {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Flag {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl From<&Flag> for Flag {
    fn from(flag: &Flag) -> Self {
        flag.clone()
    }
}

impl From<Flag> for String {
    fn from(flag: Flag) -> Self {
        flag.0
    }
}

impl AsRef<str> for Flag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
