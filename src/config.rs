//! TOML-based scenario configuration, preset definitions, and validation.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::sim::types::{
    DEFAULT_ARRIVAL_MULTIPLIER, DEFAULT_CHARGING_POWER_KW, DEFAULT_EV_CONSUMPTION_KWH_PER_100KM,
    StationConfig,
};

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"station.charge_point_count"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn within(mut self, section: &str) -> Self {
        self.field = format!("{section}.{}", self.field);
        self
    }
}

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Charging station parameters.
    #[serde(default)]
    pub station: StationSection,
    /// Run parameters.
    #[serde(default)]
    pub simulation: SimulationSection,
}

/// Charging station parameters, unvalidated.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StationSection {
    /// Number of charge points (must be >= 1).
    pub charge_point_count: usize,
    /// Scale on the arrival probability table (0.2 to 2.0).
    pub arrival_probability_multiplier: f64,
    /// Vehicle consumption (kWh per 100 km, > 0).
    pub ev_consumption_kwh_per_100km: f64,
    /// Rated power of each charge point (kW, > 0).
    pub charging_power_per_point_kw: f64,
}

impl Default for StationSection {
    fn default() -> Self {
        Self {
            charge_point_count: 20,
            arrival_probability_multiplier: DEFAULT_ARRIVAL_MULTIPLIER,
            ev_consumption_kwh_per_100km: DEFAULT_EV_CONSUMPTION_KWH_PER_100KM,
            charging_power_per_point_kw: DEFAULT_CHARGING_POWER_KW,
        }
    }
}

/// Run parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    /// Random seed; drawn from the operating system when absent.
    pub seed: Option<u64>,
}

impl ScenarioConfig {
    /// Returns the baseline scenario: 20 points at 11 kW, average traffic.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns a station with a single charge point.
    pub fn single_point() -> Self {
        Self {
            station: StationSection {
                charge_point_count: 1,
                ..StationSection::default()
            },
            ..Self::default()
        }
    }

    /// Returns the quiet preset: traffic at the lowest accepted multiplier.
    pub fn quiet() -> Self {
        Self {
            station: StationSection {
                arrival_probability_multiplier: 0.2,
                ..StationSection::default()
            },
            ..Self::default()
        }
    }

    /// Returns the rush-hour preset: traffic at the highest accepted multiplier.
    pub fn rush_hour() -> Self {
        Self {
            station: StationSection {
                arrival_probability_multiplier: 2.0,
                ..StationSection::default()
            },
            ..Self::default()
        }
    }

    /// Returns the fast-charging preset: fewer, 50 kW points.
    pub fn fast_charging() -> Self {
        Self {
            station: StationSection {
                charge_point_count: 8,
                charging_power_per_point_kw: 50.0,
                ..StationSection::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &[
        "baseline",
        "single_point",
        "quiet",
        "rush_hour",
        "fast_charging",
    ];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "single_point" => Ok(Self::single_point()),
            "quiet" => Ok(Self::quiet()),
            "rush_hour" => Ok(Self::rush_hour()),
            "fast_charging" => Ok(Self::fast_charging()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let st = &self.station;
        StationConfig::violations(
            st.charge_point_count,
            st.arrival_probability_multiplier,
            st.ev_consumption_kwh_per_100km,
            st.charging_power_per_point_kw,
        )
        .into_iter()
        .map(|e| e.within("station"))
        .collect()
    }

    /// Converts the station section into a validated [`StationConfig`].
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn station_config(&self) -> Result<StationConfig, ConfigError> {
        let st = &self.station;
        StationConfig::new(
            st.charge_point_count,
            st.arrival_probability_multiplier,
            st.ev_consumption_kwh_per_100km,
            st.charging_power_per_point_kw,
        )
        .map_err(|e| e.within("station"))
    }
}
