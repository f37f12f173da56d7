//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Vehicle and walk parameters for footprint construction.
///
/// All lengths are map units. The defaults describe the standard carrier
/// vehicle on the reference layout scale.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Curve distance the front reference point advances per step.
    #[serde(default = "defaults::step_interval")]
    pub step_interval: f64,

    /// Fixed distance between the front and rear reference points.
    #[serde(default = "defaults::wheelbase")]
    pub wheelbase: f64,

    /// Slack added to the wheelbase when testing rigid coupling.
    #[serde(default = "defaults::coupling_margin")]
    pub coupling_margin: f64,

    /// Half-length of the boundary box placed at path entry and exit.
    #[serde(default = "defaults::straight_half_length")]
    pub straight_half_length: f64,

    /// Half-width of the boundary box placed at path entry and exit.
    #[serde(default = "defaults::straight_half_width")]
    pub straight_half_width: f64,

    /// Slots preallocated per footprint sequence.
    #[serde(default = "defaults::capacity")]
    pub capacity: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            step_interval: defaults::step_interval(),
            wheelbase: defaults::wheelbase(),
            coupling_margin: defaults::coupling_margin(),
            straight_half_length: defaults::straight_half_length(),
            straight_half_width: defaults::straight_half_width(),
            capacity: defaults::capacity(),
        }
    }
}

mod defaults {
    pub fn step_interval() -> f64 {
        10.0
    }

    pub fn wheelbase() -> f64 {
        1200.0
    }

    pub fn coupling_margin() -> f64 {
        10.0
    }

    pub fn straight_half_length() -> f64 {
        850.0
    }

    pub fn straight_half_width() -> f64 {
        170.0
    }

    pub fn capacity() -> usize {
        500
    }
}
