//! # Travel Modes
//!
//! The single `TravelMode` enum used across policy configuration, requests,
//! and reporting. One definition, exhaustive `match` everywhere — adding a
//! mode forces every consumer to handle it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of travel modes. Kept in sync with [`TravelMode::ALL`] by test.
pub const TRAVEL_MODE_COUNT: usize = 4;

/// A mode of travel a request can be raised for.
///
/// Serialized in `snake_case` to match the API contract and policy files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// Commercial air travel.
    Flight,
    /// Rail travel.
    Train,
    /// Intercity bus travel.
    Bus,
    /// Anything else (taxi, rental, ferry...). Policy may still set a
    /// notice threshold for it.
    Other,
}

impl TravelMode {
    /// All travel modes, in canonical order.
    pub const ALL: [TravelMode; TRAVEL_MODE_COUNT] =
        [Self::Flight, Self::Train, Self::Bus, Self::Other];

    /// Return the snake_case string representation of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Train => "train",
            Self::Bus => "bus",
            Self::Other => "other",
        }
    }

    /// Parse a mode from its snake_case string form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownTravelMode`] for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "flight" => Ok(Self::Flight),
            "train" => Ok(Self::Train),
            "bus" => Ok(Self::Bus),
            "other" => Ok(Self::Other),
            _ => Err(ValidationError::UnknownTravelMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
