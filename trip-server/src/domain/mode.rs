//! Transport mode type.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// A mode of transport with its own terminals and distance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Air,
    Rail,
    Road,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [TransportMode::Air, TransportMode::Rail, TransportMode::Road];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Rail => "rail",
            Self::Road => "road",
        }
    }

    /// Kilometer range used when a pair has no recorded distance.
    ///
    /// Air is the widest, road the narrowest.
    pub fn fallback_distance_km(self) -> RangeInclusive<u32> {
        match self {
            Self::Air => 500..=2500,
            Self::Rail => 400..=1200,
            Self::Road => 150..=600,
        }
    }

    /// What a terminal of this mode is called in advisories.
    pub fn terminal_noun(self) -> &'static str {
        match self {
            Self::Air => "airport",
            Self::Rail => "railway station",
            Self::Road => "road connection",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_ranges_widen_from_road_to_air() {
        let road = TransportMode::Road.fallback_distance_km();
        let rail = TransportMode::Rail.fallback_distance_km();
        let air = TransportMode::Air.fallback_distance_km();

        assert!(road.end() - road.start() < rail.end() - rail.start());
        assert!(rail.end() - rail.start() < air.end() - air.start());
    }

    #[test]
    fn display() {
        assert_eq!(TransportMode::Rail.to_string(), "rail");
    }
}
