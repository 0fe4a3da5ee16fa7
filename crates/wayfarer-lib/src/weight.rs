//! Travel profiles per route class and the edge weight used by the search.
//!
//! Both the search ([`edge_weight`]) and the segment estimates in
//! [`crate::segments`] read the same [`ClassProfile`] table, so a class is
//! never fast in one place and slow in the other.

use serde::Serialize;

use crate::map::{Cell, RouteClass};

/// Speed that maps to a speed factor of `1.0`.
pub const REFERENCE_SPEED_KMH: f64 = 100.0;

/// Toll charged per unit of display distance on highways.
pub const HIGHWAY_TOLL_RATE: f64 = 0.0055;

/// Slowdown per 100 height units gained.
const UPHILL_PENALTY_PER_100: f64 = 0.3;

/// Speed-up per 100 height units lost.
const DOWNHILL_BONUS_PER_100: f64 = 0.1;

/// Lower bound on the elevation penalty so steep descents keep weights positive.
pub const MIN_ELEVATION_PENALTY: f64 = 0.1;

/// Travel characteristics shared by every route of one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProfile {
    /// Typical travel speed in km/h.
    pub speed_kmh: f64,
    /// Ratio of real road length to straight-line distance.
    pub winding_factor: f64,
    /// Toll per unit of display distance; zero for untolled classes.
    pub toll_rate: f64,
}

impl ClassProfile {
    /// Speed relative to [`REFERENCE_SPEED_KMH`].
    pub fn speed_factor(&self) -> f64 {
        self.speed_kmh / REFERENCE_SPEED_KMH
    }

    pub fn is_tolled(&self) -> bool {
        self.toll_rate > 0.0
    }
}

impl RouteClass {
    /// Travel profile for this class.
    ///
    /// | Class      | km/h | winding | toll    |
    /// |------------|-----:|--------:|--------:|
    /// | highway    | 120  | 1.1     | 0.0055  |
    /// | secondary  | 100  | 1.2     | 0       |
    /// | tertiary   | 90   | 1.3     | 0       |
    /// | local-road | 100  | 1.3     | 0       |
    /// | trail      | 60   | 1.5     | 0       |
    /// | sea-route  | 80   | 1.3     | 0       |
    /// | custom     | 80   | 1.3     | 0       |
    pub const fn profile(self) -> ClassProfile {
        match self {
            RouteClass::Highway => ClassProfile {
                speed_kmh: 120.0,
                winding_factor: 1.1,
                toll_rate: HIGHWAY_TOLL_RATE,
            },
            RouteClass::Secondary => ClassProfile {
                speed_kmh: 100.0,
                winding_factor: 1.2,
                toll_rate: 0.0,
            },
            RouteClass::Tertiary => ClassProfile {
                speed_kmh: 90.0,
                winding_factor: 1.3,
                toll_rate: 0.0,
            },
            RouteClass::LocalRoad => ClassProfile {
                speed_kmh: 100.0,
                winding_factor: 1.3,
                toll_rate: 0.0,
            },
            RouteClass::Trail => ClassProfile {
                speed_kmh: 60.0,
                winding_factor: 1.5,
                toll_rate: 0.0,
            },
            RouteClass::SeaRoute | RouteClass::Custom => ClassProfile {
                speed_kmh: 80.0,
                winding_factor: 1.3,
                toll_rate: 0.0,
            },
        }
    }
}

/// Multiplier on travel time for moving from `from_height` to `to_height`.
///
/// Climbing costs 30% per 100 units gained, descending saves 10% per 100 units
/// lost, and level ground is exactly `1.0`. The result never drops below
/// [`MIN_ELEVATION_PENALTY`].
pub fn elevation_penalty(from_height: f64, to_height: f64) -> f64 {
    let change = to_height - from_height;
    let penalty = if change > 0.0 {
        1.0 + change / 100.0 * UPHILL_PENALTY_PER_100
    } else if change < 0.0 {
        1.0 + change / 100.0 * DOWNHILL_BONUS_PER_100
    } else {
        1.0
    };
    penalty.max(MIN_ELEVATION_PENALTY)
}

/// Traversal cost of moving from `from` to `to` along a route of `class`.
///
/// The weight is `distance / speed_factor * elevation_penalty`, in map units.
/// It is strictly positive for cells at distinct positions and exactly zero
/// for coincident ones.
pub fn edge_weight(from: &Cell, to: &Cell, class: RouteClass) -> f64 {
    let distance = from.position.distance_to(&to.position);
    let profile = class.profile();
    distance / profile.speed_factor() * elevation_penalty(from.elevation, to.elevation)
}
