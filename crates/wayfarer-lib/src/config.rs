use serde::{Deserialize, Serialize};

/// Default multiplier from map units to display units.
pub const DEFAULT_DISTANCE_SCALE: f64 = 1.0;

/// Default label for display distances.
pub const DEFAULT_DISTANCE_UNIT: &str = "km";

/// Default currency symbol for tolls.
pub const DEFAULT_CURRENCY: &str = "€";

/// Conversion from internal map units to the units shown to people.
///
/// Map files carry these under a `units` key; every field is optional. The
/// distance scale multiplies straight-line map distances, so travel times and
/// tolls are computed in the scaled units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    #[serde(default = "default_distance_scale")]
    pub distance_scale: f64,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            distance_scale: DEFAULT_DISTANCE_SCALE,
            distance_unit: DEFAULT_DISTANCE_UNIT.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl UnitConfig {
    /// Replace the distance scale, keeping the labels.
    pub fn with_distance_scale(mut self, scale: f64) -> Self {
        self.distance_scale = scale;
        self
    }

    /// Replace the distance unit label.
    pub fn with_distance_unit(mut self, unit: impl Into<String>) -> Self {
        self.distance_unit = unit.into();
        self
    }

    /// `true` when the scale can be used for distance conversion.
    pub fn is_valid(&self) -> bool {
        self.distance_scale.is_finite() && self.distance_scale > 0.0
    }
}

fn default_distance_scale() -> f64 {
    DEFAULT_DISTANCE_SCALE
}

fn default_distance_unit() -> String {
    DEFAULT_DISTANCE_UNIT.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}
