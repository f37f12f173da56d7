//! Headings and coarse travel directions.

use serde::{Deserialize, Serialize};

use super::math::approx_eq;

/// Heading in degrees, normalized to `[0, 360)`. Zero points along +x and
/// angles grow counterclockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bearing(f64);

impl Bearing {
    #[inline]
    pub fn new(degrees: f64) -> Self {
        Self(degrees.rem_euclid(360.0))
    }

    #[inline]
    pub fn degrees(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(&self) -> f64 {
        self.0.to_radians()
    }

    /// Heading of the reflected pose when geometry is mirrored across the
    /// horizontal axis.
    #[inline]
    pub fn mirror_x(&self) -> Bearing {
        Bearing::new(360.0 - self.0)
    }

    #[inline]
    pub fn opposite(&self) -> Bearing {
        Bearing::new(self.0 + 180.0)
    }

    #[inline]
    pub fn approx_eq(&self, other: &Bearing) -> bool {
        approx_eq(self.0, other.0)
    }
}

impl From<TravelDirection> for Bearing {
    fn from(direction: TravelDirection) -> Bearing {
        match direction {
            TravelDirection::XInc => Bearing::new(0.0),
            TravelDirection::XDec => Bearing::new(180.0),
            TravelDirection::YInc => Bearing::new(90.0),
            TravelDirection::YDec => Bearing::new(270.0),
        }
    }
}

/// Coarse axis-aligned travel direction at a path boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelDirection {
    XInc,
    XDec,
    YInc,
    YDec,
}

impl TravelDirection {
    pub fn opposite(&self) -> TravelDirection {
        match self {
            TravelDirection::XInc => TravelDirection::XDec,
            TravelDirection::XDec => TravelDirection::XInc,
            TravelDirection::YInc => TravelDirection::YDec,
            TravelDirection::YDec => TravelDirection::YInc,
        }
    }
}
