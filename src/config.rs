//! Tolerances and group selection for joining and mapping runs.

use serde::Deserialize;

use crate::errors::SettingsError;
use crate::joiner::{JoinOptions, DEFAULT_JOIN_TOLERANCE};

/// Default distance and parameter tolerance for model mapping.
pub const DEFAULT_MAP_TOLERANCE: f64 = 0.005;

/// Settings for a joining and mapping run.
///
/// Missing fields fall back to their defaults when deserialized.
///
/// # Examples
/// ```
/// use beamx::MappingSettings;
///
/// let settings = MappingSettings::from_json(r#"{"target_groups": ["Deck"]}"#).unwrap();
/// assert_eq!(settings.target_groups, vec!["Deck".to_string()]);
/// assert_eq!(settings.join_tolerance, 0.005);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MappingSettings {
    /// Collinearity bound used by the joiner.
    pub join_tolerance: f64,
    /// Slack and distance bound used by the mapper.
    pub map_tolerance: f64,
    /// Groups to join; all groups when empty.
    pub target_groups: Vec<String>,
}

impl Default for MappingSettings {
    fn default() -> Self {
        Self {
            join_tolerance: DEFAULT_JOIN_TOLERANCE,
            map_tolerance: DEFAULT_MAP_TOLERANCE,
            target_groups: Vec::new(),
        }
    }
}

impl MappingSettings {
    /// Parse settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Json`] for malformed documents and
    /// [`SettingsError::InvalidTolerance`] for negative or non-finite tolerances.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()
    }

    /// Load settings from `BEAMX_JOIN_TOLERANCE`, `BEAMX_MAP_TOLERANCE` and
    /// `BEAMX_TARGET_GROUPS` (comma separated), using defaults for unset
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidEnv`] when a tolerance does not parse and
    /// [`SettingsError::InvalidTolerance`] when it is negative or not finite.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let tolerance = |name: &'static str, default: f64| match lookup(name) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|_| SettingsError::InvalidEnv { name, value }),
        };
        let settings = Self {
            join_tolerance: tolerance("BEAMX_JOIN_TOLERANCE", defaults.join_tolerance)?,
            map_tolerance: tolerance("BEAMX_MAP_TOLERANCE", defaults.map_tolerance)?,
            target_groups: lookup("BEAMX_TARGET_GROUPS")
                .map(|groups| {
                    groups
                        .split(',')
                        .map(str::trim)
                        .filter(|group| !group.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        };
        settings.validate()
    }

    /// Reject tolerances that cannot bound a distance.
    fn validate(self) -> Result<Self, SettingsError> {
        for (name, value) in [
            ("join_tolerance", self.join_tolerance),
            ("map_tolerance", self.map_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidTolerance { name, value });
            }
        }
        Ok(self)
    }

    /// Joiner options matching these settings.
    #[must_use]
    pub fn join_options(&self) -> JoinOptions {
        JoinOptions {
            node_table: None,
            tolerance: self.join_tolerance,
            target_groups: self.target_groups.iter().cloned().collect(),
        }
    }
}
