//! Route distances between locations.
//!
//! Each transport mode has its own sparse table of known distances. Pairs
//! are stored once in whatever order they were recorded; lookups try both
//! orders. Unknown pairs fall back to a uniform draw from the mode's range.

use std::collections::HashMap;

use rand::Rng;

use crate::domain::{LocationKey, TransportMode};

/// Known distances for one transport mode, in kilometers.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    facts: HashMap<(String, String), u32>,
}

impl DistanceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the distance between two keys.
    pub fn add(&mut self, a: &LocationKey, b: &LocationKey, km: u32) {
        self.facts
            .insert((a.as_str().to_string(), b.as_str().to_string()), km);
    }

    /// Look up a recorded distance in either order.
    pub fn get(&self, a: &LocationKey, b: &LocationKey) -> Option<u32> {
        let forward = (a.as_str().to_string(), b.as_str().to_string());
        if let Some(km) = self.facts.get(&forward) {
            return Some(*km);
        }
        let reverse = (forward.1, forward.0);
        self.facts.get(&reverse).copied()
    }

    /// Number of recorded pairs.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Distance tables for every mode.
#[derive(Debug, Clone, Default)]
pub struct Distances {
    air: DistanceTable,
    rail: DistanceTable,
    road: DistanceTable,
}

impl Distances {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table for a mode.
    pub fn table(&self, mode: TransportMode) -> &DistanceTable {
        match mode {
            TransportMode::Air => &self.air,
            TransportMode::Rail => &self.rail,
            TransportMode::Road => &self.road,
        }
    }

    fn table_mut(&mut self, mode: TransportMode) -> &mut DistanceTable {
        match mode {
            TransportMode::Air => &mut self.air,
            TransportMode::Rail => &mut self.rail,
            TransportMode::Road => &mut self.road,
        }
    }

    /// Distance between two locations for a mode.
    ///
    /// A recorded pair consumes no randomness. A miss consumes exactly one
    /// draw from the mode's fallback range, so for equal random state the
    /// result does not depend on argument order.
    pub fn distance<R: Rng + ?Sized>(
        &self,
        origin: &LocationKey,
        destination: &LocationKey,
        mode: TransportMode,
        rng: &mut R,
    ) -> u32 {
        match self.table(mode).get(origin, destination) {
            Some(km) => km,
            None => rng.random_range(mode.fallback_distance_km()),
        }
    }
}

/// Builder for [`Distances`].
#[derive(Debug, Default)]
pub struct DistancesBuilder {
    inner: Distances,
}

impl DistancesBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a distance for a mode.
    pub fn add(mut self, mode: TransportMode, a: &str, b: &str, km: u32) -> Self {
        let a = LocationKey::new(a);
        let b = LocationKey::new(b);
        if !a.is_empty() && !b.is_empty() {
            self.inner.table_mut(mode).add(&a, &b, km);
        }
        self
    }

    /// Build the distance tables.
    pub fn build(self) -> Distances {
        self.inner
    }
}

/// Built-in distance tables. Keys are canonical (alias-resolved).
pub fn builtin_distances() -> Distances {
    use TransportMode::{Air, Rail, Road};

    DistancesBuilder::new()
        // Air: great-circle-ish
        .add(Air, "delhi", "mumbai", 1150)
        .add(Air, "delhi", "bangalore", 1740)
        .add(Air, "delhi", "chennai", 1760)
        .add(Air, "delhi", "kolkata", 1300)
        .add(Air, "delhi", "hyderabad", 1250)
        .add(Air, "delhi", "goa", 1500)
        .add(Air, "delhi", "kochi", 2100)
        .add(Air, "delhi", "jaipur", 240)
        .add(Air, "delhi", "srinagar", 640)
        .add(Air, "delhi", "leh", 620)
        .add(Air, "delhi", "coimbatore", 1950)
        .add(Air, "mumbai", "bangalore", 840)
        .add(Air, "mumbai", "chennai", 1030)
        .add(Air, "mumbai", "hyderabad", 620)
        .add(Air, "mumbai", "goa", 440)
        .add(Air, "mumbai", "kolkata", 1660)
        .add(Air, "mumbai", "coimbatore", 960)
        .add(Air, "chennai", "kolkata", 1370)
        .add(Air, "chennai", "hyderabad", 520)
        .add(Air, "chennai", "coimbatore", 420)
        .add(Air, "chennai", "port blair", 1370)
        .add(Air, "bangalore", "kolkata", 1560)
        .add(Air, "bangalore", "hyderabad", 500)
        .add(Air, "bangalore", "kochi", 360)
        .add(Air, "bangalore", "coimbatore", 230)
        .add(Air, "kolkata", "port blair", 1300)
        .add(Air, "new york", "london", 5570)
        .add(Air, "new york", "paris", 5840)
        .add(Air, "new york", "tokyo", 10850)
        .add(Air, "new york", "delhi", 11760)
        .add(Air, "new york", "mumbai", 12550)
        .add(Air, "london", "paris", 344)
        .add(Air, "london", "tokyo", 9560)
        .add(Air, "london", "delhi", 6700)
        .add(Air, "london", "mumbai", 7190)
        .add(Air, "paris", "tokyo", 9710)
        .add(Air, "paris", "delhi", 6590)
        .add(Air, "tokyo", "delhi", 5840)
        // Rail: track distances
        .add(Rail, "delhi", "mumbai", 1384)
        .add(Rail, "delhi", "kolkata", 1530)
        .add(Rail, "delhi", "chennai", 2175)
        .add(Rail, "delhi", "bangalore", 2150)
        .add(Rail, "delhi", "jaipur", 310)
        .add(Rail, "delhi", "agra", 230)
        .add(Rail, "delhi", "varanasi", 820)
        .add(Rail, "delhi", "lucknow", 555)
        .add(Rail, "delhi", "amritsar", 450)
        .add(Rail, "delhi", "chandigarh", 245)
        .add(Rail, "delhi", "dehradun", 255)
        .add(Rail, "delhi", "bhopal", 700)
        .add(Rail, "delhi", "hyderabad", 1550)
        .add(Rail, "delhi", "ahmedabad", 940)
        .add(Rail, "mumbai", "pune", 192)
        .add(Rail, "mumbai", "goa", 588)
        .add(Rail, "mumbai", "ahmedabad", 524)
        .add(Rail, "mumbai", "bangalore", 984)
        .add(Rail, "mumbai", "chennai", 1330)
        .add(Rail, "mumbai", "hyderabad", 711)
        .add(Rail, "mumbai", "nagpur", 840)
        .add(Rail, "chennai", "bangalore", 346)
        .add(Rail, "chennai", "hyderabad", 627)
        .add(Rail, "chennai", "kochi", 690)
        .add(Rail, "chennai", "coimbatore", 507)
        .add(Rail, "chennai", "madurai", 460)
        .add(Rail, "chennai", "trichy", 330)
        .add(Rail, "chennai", "mysore", 480)
        .add(Rail, "chennai", "salem", 340)
        .add(Rail, "bangalore", "hyderabad", 570)
        .add(Rail, "bangalore", "mysore", 145)
        .add(Rail, "bangalore", "goa", 560)
        .add(Rail, "bangalore", "kochi", 540)
        .add(Rail, "bangalore", "coimbatore", 370)
        .add(Rail, "kolkata", "patna", 530)
        .add(Rail, "kolkata", "varanasi", 680)
        .add(Rail, "kolkata", "bhubaneswar", 440)
        .add(Rail, "kolkata", "guwahati", 1080)
        .add(Rail, "jaipur", "udaipur", 395)
        .add(Rail, "jaipur", "jodhpur", 340)
        .add(Rail, "hyderabad", "visakhapatnam", 625)
        .add(Rail, "coimbatore", "madurai", 210)
        .add(Rail, "coimbatore", "kochi", 190)
        .add(Rail, "coimbatore", "mettupalayam", 40)
        .add(Rail, "coimbatore", "salem", 165)
        .add(Rail, "coimbatore", "erode", 105)
        .add(Rail, "coimbatore", "trichy", 210)
        .add(Rail, "kochi", "alleppey", 57)
        .add(Rail, "kochi", "thiruvananthapuram", 220)
        .add(Rail, "madurai", "trichy", 140)
        .add(Rail, "madurai", "rameswaram", 170)
        .add(Rail, "madurai", "kanyakumari", 240)
        // Road: highway distances, South India focus
        .add(Road, "coimbatore", "chennai", 505)
        .add(Road, "coimbatore", "bangalore", 365)
        .add(Road, "coimbatore", "madurai", 218)
        .add(Road, "coimbatore", "trichy", 220)
        .add(Road, "coimbatore", "salem", 165)
        .add(Road, "coimbatore", "erode", 100)
        .add(Road, "coimbatore", "tiruppur", 50)
        .add(Road, "coimbatore", "ooty", 86)
        .add(Road, "coimbatore", "munnar", 160)
        .add(Road, "coimbatore", "kochi", 195)
        .add(Road, "coimbatore", "palakkad", 55)
        .add(Road, "coimbatore", "mysore", 220)
        .add(Road, "coimbatore", "pollachi", 40)
        .add(Road, "coimbatore", "kodaikanal", 175)
        .add(Road, "coimbatore", "thanjavur", 305)
        .add(Road, "coimbatore", "dindigul", 168)
        .add(Road, "coimbatore", "pondicherry", 410)
        .add(Road, "coimbatore", "thiruvananthapuram", 430)
        .add(Road, "coimbatore", "hyderabad", 790)
        .add(Road, "coimbatore", "goa", 870)
        .add(Road, "chennai", "madurai", 462)
        .add(Road, "chennai", "trichy", 330)
        .add(Road, "chennai", "salem", 340)
        .add(Road, "chennai", "pondicherry", 155)
        .add(Road, "chennai", "thanjavur", 340)
        .add(Road, "chennai", "kanchipuram", 72)
        .add(Road, "chennai", "tirupati", 135)
        .add(Road, "chennai", "vellore", 135)
        .add(Road, "chennai", "bangalore", 350)
        .add(Road, "chennai", "mysore", 480)
        .add(Road, "chennai", "kochi", 690)
        .add(Road, "chennai", "hyderabad", 630)
        .add(Road, "madurai", "trichy", 140)
        .add(Road, "madurai", "thanjavur", 185)
        .add(Road, "madurai", "kodaikanal", 120)
        .add(Road, "madurai", "rameswaram", 175)
        .add(Road, "madurai", "kanyakumari", 245)
        .add(Road, "trichy", "thanjavur", 55)
        .add(Road, "bangalore", "mysore", 145)
        .add(Road, "bangalore", "hyderabad", 570)
        .add(Road, "bangalore", "goa", 560)
        .add(Road, "bangalore", "kochi", 540)
        .add(Road, "bangalore", "ooty", 280)
        .add(Road, "bangalore", "pondicherry", 310)
        .add(Road, "kochi", "munnar", 130)
        .add(Road, "kochi", "thiruvananthapuram", 205)
        .add(Road, "kochi", "alleppey", 55)
        .add(Road, "delhi", "jaipur", 280)
        .add(Road, "delhi", "agra", 230)
        .add(Road, "delhi", "chandigarh", 250)
        .add(Road, "delhi", "dehradun", 250)
        .add(Road, "delhi", "haridwar", 230)
        .add(Road, "delhi", "rishikesh", 240)
        .add(Road, "delhi", "lucknow", 555)
        .add(Road, "jaipur", "udaipur", 395)
        .add(Road, "jaipur", "jodhpur", 340)
        .add(Road, "mumbai", "pune", 150)
        .add(Road, "mumbai", "goa", 590)
        .add(Road, "mumbai", "ahmedabad", 530)
        .add(Road, "mumbai", "nashik", 170)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn key(s: &str) -> LocationKey {
        LocationKey::new(s)
    }

    #[test]
    fn empty_table() {
        let t = DistanceTable::new();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert!(t.get(&key("a"), &key("b")).is_none());
    }

    #[test]
    fn lookup_is_symmetric() {
        let d = builtin_distances();
        let rail = d.table(TransportMode::Rail);
        assert_eq!(rail.get(&key("chennai"), &key("coimbatore")), Some(507));
        assert_eq!(rail.get(&key("coimbatore"), &key("chennai")), Some(507));
    }

    #[test]
    fn modes_have_separate_tables() {
        let d = builtin_distances();
        let mut rng = StdRng::seed_from_u64(1);
        let rail = d.distance(&key("coimbatore"), &key("chennai"), TransportMode::Rail, &mut rng);
        let road = d.distance(&key("coimbatore"), &key("chennai"), TransportMode::Road, &mut rng);
        assert_eq!(rail, 507);
        assert_eq!(road, 505);
    }

    #[test]
    fn known_pair_consumes_no_randomness() {
        let d = builtin_distances();
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        d.distance(&key("delhi"), &key("agra"), TransportMode::Rail, &mut a);
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn fallback_stays_in_mode_range() {
        let d = builtin_distances();
        let mut rng = StdRng::seed_from_u64(3);
        for mode in TransportMode::ALL {
            for _ in 0..200 {
                let km = d.distance(&key("nowhere"), &key("elsewhere"), mode, &mut rng);
                assert!(mode.fallback_distance_km().contains(&km), "{mode}: {km}");
            }
        }
    }

    #[test]
    fn builder_ignores_empty_keys() {
        let d = DistancesBuilder::new()
            .add(TransportMode::Road, "  ", "chennai", 10)
            .build();
        assert!(d.table(TransportMode::Road).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn any_mode() -> impl Strategy<Value = TransportMode> {
        prop_oneof![
            Just(TransportMode::Air),
            Just(TransportMode::Rail),
            Just(TransportMode::Road),
        ]
    }

    proptest! {
        /// With equal random state, swapping the endpoints gives the same distance.
        #[test]
        fn distance_is_symmetric(
            a in "[a-z]{3,10}",
            b in "[a-z]{3,10}",
            mode in any_mode(),
            seed in any::<u64>(),
        ) {
            let d = builtin_distances();
            let (a, b) = (LocationKey::new(&a), LocationKey::new(&b));
            let forward = d.distance(&a, &b, mode, &mut StdRng::seed_from_u64(seed));
            let backward = d.distance(&b, &a, mode, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn known_pairs_are_symmetric(
            idx in 0usize..6,
            mode in any_mode(),
            seed in any::<u64>(),
        ) {
            let pairs = [
                ("delhi", "mumbai"),
                ("chennai", "coimbatore"),
                ("coimbatore", "ooty"),
                ("london", "paris"),
                ("delhi", "agra"),
                ("kochi", "alleppey"),
            ];
            let (a, b) = pairs[idx];
            let d = builtin_distances();
            let (a, b) = (LocationKey::new(a), LocationKey::new(b));
            let forward = d.distance(&a, &b, mode, &mut StdRng::seed_from_u64(seed));
            let backward = d.distance(&b, &a, mode, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(forward, backward);
        }
    }
}
