//! Cop configuration and Rails version gating.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CopError;

/// A `major.minor` Rails version used to gate cops.
///
/// # Example
///
/// ```
/// use lintel_cops::RailsVersion;
///
/// let version: RailsVersion = "7.1".parse()?;
/// assert!(version >= RailsVersion::new(7, 0));
/// # Ok::<(), lintel_cops::CopError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "VersionRepr", into = "String")]
pub struct RailsVersion {
    major: u32,
    minor: u32,
}

impl RailsVersion {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Returns the major component.
    #[must_use]
    pub const fn major(self) -> u32 {
        self.major
    }

    /// Returns the minor component.
    #[must_use]
    pub const fn minor(self) -> u32 {
        self.minor
    }
}

impl fmt::Display for RailsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for RailsVersion {
    type Err = CopError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (major, minor) = trimmed.split_once('.').unwrap_or((trimmed, "0"));
        let component = |text: &str, which: &str| {
            text.parse::<u32>().map_err(|err| {
                CopError::invalid_version(input, format!("{which} component: {err}"))
            })
        };
        Ok(Self::new(component(major, "major")?, component(minor, "minor")?))
    }
}

impl From<RailsVersion> for String {
    fn from(version: RailsVersion) -> Self {
        version.to_string()
    }
}

/// Accepts `"7.1"` as well as the bare number `7.1` YAML-style configs emit.
#[derive(Deserialize)]
#[serde(untagged)]
enum VersionRepr {
    Text(String),
    Number(f64),
}

impl TryFrom<VersionRepr> for RailsVersion {
    type Error = CopError;

    fn try_from(repr: VersionRepr) -> Result<Self, Self::Error> {
        match repr {
            VersionRepr::Text(text) => text.parse(),
            VersionRepr::Number(number) => number.to_string().parse(),
        }
    }
}

/// Per-cop settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopConfig {
    enabled: bool,
    autocorrect: bool,
    base_class: Option<String>,
}

impl Default for CopConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            autocorrect: true,
            base_class: None,
        }
    }
}

impl CopConfig {
    /// Returns whether the cop runs at all.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns whether the cop's corrections are kept.
    #[must_use]
    pub const fn autocorrect(&self) -> bool {
        self.autocorrect
    }

    /// Returns the configured base class override, if any.
    #[must_use]
    pub fn base_class(&self) -> Option<&str> {
        self.base_class.as_deref()
    }

    /// Sets whether the cop runs.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets whether corrections are kept.
    #[must_use]
    pub const fn with_autocorrect(mut self, autocorrect: bool) -> Self {
        self.autocorrect = autocorrect;
        self
    }

    /// Overrides the base class name.
    #[must_use]
    pub fn with_base_class(mut self, base_class: impl Into<String>) -> Self {
        self.base_class = Some(base_class.into());
        self
    }
}

/// Configuration for an [`Inspector`](crate::Inspector) run.
///
/// Cops missing from `cops` use [`CopConfig::default`]. Without a
/// `target_rails_version` no cop is gated by version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    target_rails_version: Option<RailsVersion>,
    cops: BTreeMap<String, CopConfig>,
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`CopError::Config`] if the document is malformed, names an
    /// unknown field, or carries an unparseable version.
    pub fn from_json(text: &str) -> Result<Self, CopError> {
        serde_json::from_str(text).map_err(|err| CopError::config(err.to_string()))
    }

    /// Returns the configured target Rails version.
    #[must_use]
    pub const fn target_rails_version(&self) -> Option<RailsVersion> {
        self.target_rails_version
    }

    /// Returns the settings for `cop_name`, falling back to defaults.
    #[must_use]
    pub fn cop(&self, cop_name: &str) -> CopConfig {
        self.cops.get(cop_name).cloned().unwrap_or_default()
    }

    /// Sets the target Rails version.
    #[must_use]
    pub const fn with_target_rails_version(mut self, version: RailsVersion) -> Self {
        self.target_rails_version = Some(version);
        self
    }

    /// Sets the settings for one cop.
    #[must_use]
    pub fn with_cop(mut self, cop_name: impl Into<String>, config: CopConfig) -> Self {
        self.cops.insert(cop_name.into(), config);
        self
    }

    /// Returns `true` when a cop requiring `minimum` may run.
    #[must_use]
    pub fn admits(&self, minimum: Option<RailsVersion>) -> bool {
        match (self.target_rails_version, minimum) {
            (Some(target), Some(minimum)) => target >= minimum,
            _ => true,
        }
    }
}
