//! Rail route eligibility.
//!
//! Decides which named services may run on a corridor. Premium services
//! are restricted to a hub, a single corridor, or a set of corridors; a
//! generic pool is always eligible. One corridor is served only by a fixed
//! heritage service outside the normal fare model.

use std::collections::HashSet;

use crate::domain::{ClockTime, LocationKey, Terminal};

/// An unordered pair of location keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Corridor(String, String);

impl Corridor {
    pub fn new(a: &LocationKey, b: &LocationKey) -> Self {
        let (a, b) = (a.as_str(), b.as_str());
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    fn from_names(a: &str, b: &str) -> Self {
        Self::new(&LocationKey::new(a), &LocationKey::new(b))
    }

    /// Returns true if either end is `key`.
    pub fn touches(&self, key: &LocationKey) -> bool {
        self.0 == key.as_str() || self.1 == key.as_str()
    }
}

/// Whether a service runs at premium or standard speed and fare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedClass {
    Premium,
    Standard,
}

/// A named train service that may be offered on eligible corridors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTemplate {
    pub name: String,
    pub kind: String,
    pub speed: SpeedClass,
    pub pantry: bool,
}

impl ServiceTemplate {
    pub fn new(name: &str, kind: &str, speed: SpeedClass, pantry: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            speed,
            pantry,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.speed == SpeedClass::Premium
    }
}

/// One direction of the heritage service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeritageRun {
    pub number: String,
    pub departs: ClockTime,
    pub arrives: ClockTime,
}

/// A fixed-schedule, fixed-fare service on a short corridor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeritageService {
    pub name: String,
    pub kind: String,
    pub class_label: String,
    pub class_code: String,
    pub distance_km: u32,
    pub fare_inr: u32,
    /// The hill-side end of the line.
    pub hill: LocationKey,
    /// The hill-side station, which has no mainline terminal.
    pub hill_terminal: Terminal,
    /// Plains-side keys from which the service can be reached.
    pub plains: Vec<LocationKey>,
    /// Plains to hill.
    pub up: HeritageRun,
    /// Hill to plains.
    pub down: HeritageRun,
    pub zone: String,
    pub note: String,
}

impl HeritageService {
    /// Returns true if the pair is a heritage corridor, in either order.
    pub fn serves(&self, origin: &LocationKey, destination: &LocationKey) -> bool {
        (origin == &self.hill && self.plains.contains(destination))
            || (destination == &self.hill && self.plains.contains(origin))
    }
}

/// Outcome of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility<'a> {
    /// Only the heritage service runs here.
    Heritage(&'a HeritageService),
    /// Services that may be drawn for this corridor.
    Pool(Vec<&'a ServiceTemplate>),
}

/// Corridor restrictions for named rail services.
#[derive(Debug, Clone, Default)]
pub struct RouteRules {
    hub_services: Vec<(LocationKey, Vec<ServiceTemplate>)>,
    corridor_services: Vec<(Corridor, ServiceTemplate)>,
    corridor_sets: Vec<(HashSet<Corridor>, Vec<ServiceTemplate>)>,
    generic: Vec<ServiceTemplate>,
    heritage: Option<HeritageService>,
}

impl RouteRules {
    /// Services eligible between two keys.
    pub fn eligible(&self, origin: &LocationKey, destination: &LocationKey) -> Eligibility<'_> {
        if let Some(heritage) = &self.heritage {
            if heritage.serves(origin, destination) {
                return Eligibility::Heritage(heritage);
            }
        }

        let corridor = Corridor::new(origin, destination);
        let mut pool = Vec::new();

        for (hub, services) in &self.hub_services {
            if corridor.touches(hub) {
                pool.extend(services.iter());
            }
        }

        for (only, service) in &self.corridor_services {
            if *only == corridor {
                pool.push(service);
            }
        }

        for (set, services) in &self.corridor_sets {
            if set.contains(&corridor) {
                pool.extend(services.iter());
            }
        }

        pool.extend(self.generic.iter());
        Eligibility::Pool(pool)
    }

    pub fn heritage(&self) -> Option<&HeritageService> {
        self.heritage.as_ref()
    }
}

/// Builder for [`RouteRules`].
#[derive(Debug, Default)]
pub struct RouteRulesBuilder {
    inner: RouteRules,
}

impl RouteRulesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Services that run only when one endpoint is `hub`.
    pub fn hub(mut self, hub: &str, services: Vec<ServiceTemplate>) -> Self {
        self.inner
            .hub_services
            .push((LocationKey::new(hub), services));
        self
    }

    /// A service that runs only between `a` and `b`.
    pub fn corridor(mut self, a: &str, b: &str, service: ServiceTemplate) -> Self {
        self.inner
            .corridor_services
            .push((Corridor::from_names(a, b), service));
        self
    }

    /// Services that run on any corridor in `pairs`.
    pub fn corridor_set(mut self, pairs: &[(&str, &str)], services: Vec<ServiceTemplate>) -> Self {
        let set = pairs
            .iter()
            .map(|(a, b)| Corridor::from_names(a, b))
            .collect();
        self.inner.corridor_sets.push((set, services));
        self
    }

    /// Services eligible everywhere.
    pub fn generic(mut self, services: Vec<ServiceTemplate>) -> Self {
        self.inner.generic.extend(services);
        self
    }

    pub fn heritage(mut self, service: HeritageService) -> Self {
        self.inner.heritage = Some(service);
        self
    }

    pub fn build(self) -> RouteRules {
        self.inner
    }
}

/// Built-in Indian Railways corridor rules.
pub fn builtin_routes() -> RouteRules {
    use SpeedClass::{Premium, Standard};

    let t = ServiceTemplate::new;

    RouteRulesBuilder::new()
        .hub(
            "delhi",
            vec![
                t("Rajdhani Express", "Superfast", Premium, true),
                t("Duronto Express", "Non-Stop", Premium, true),
                t("Sampark Kranti Express", "Superfast", Standard, true),
                t("Garib Rath Express", "Superfast", Standard, false),
            ],
        )
        .corridor(
            "delhi",
            "agra",
            t("Gatimaan Express", "Semi-High Speed", Premium, true),
        )
        .corridor_set(
            &[
                ("delhi", "chandigarh"),
                ("delhi", "amritsar"),
                ("delhi", "lucknow"),
                ("delhi", "varanasi"),
                ("delhi", "dehradun"),
                ("delhi", "jaipur"),
                ("delhi", "agra"),
                ("delhi", "bhopal"),
                ("chennai", "bangalore"),
                ("chennai", "mysore"),
                ("chennai", "coimbatore"),
                ("mumbai", "ahmedabad"),
                ("mumbai", "goa"),
                ("kolkata", "patna"),
                ("bangalore", "mysore"),
                ("hyderabad", "visakhapatnam"),
            ],
            vec![
                t("Shatabdi Express", "Superfast", Premium, true),
                t("Vande Bharat Express", "Semi-High Speed", Premium, true),
                t("Jan Shatabdi Express", "Superfast", Standard, false),
            ],
        )
        .corridor_set(
            &[
                ("mumbai", "goa"),
                ("mumbai", "ahmedabad"),
                ("delhi", "lucknow"),
                ("chennai", "madurai"),
            ],
            vec![t("Tejas Express", "Premium", Premium, true)],
        )
        .generic(vec![
            t("Superfast Express", "Superfast", Standard, true),
            t("Express", "Mail/Express", Standard, false),
            t("Mail Express", "Mail/Express", Standard, false),
            t("Intercity Express", "Intercity", Standard, false),
            t("Humsafar Express", "Superfast", Standard, true),
            t("Weekly Express", "Mail/Express", Standard, true),
        ])
        .heritage(nilgiri_mountain_railway())
        .build()
}

fn nilgiri_mountain_railway() -> HeritageService {
    // Fixed timetable; the values are valid clock times.
    let at = |h, m| ClockTime::new(h, m).unwrap_or_default();

    HeritageService {
        name: "Nilgiri Mountain Railway".to_string(),
        kind: "Heritage / Narrow Gauge".to_string(),
        class_label: "First Class / Second Class".to_string(),
        class_code: "FC".to_string(),
        distance_km: 46,
        fare_inr: 250,
        hill: LocationKey::new("ooty"),
        hill_terminal: Terminal::new("UAM", "Udagamandalam (Ooty)", "Southern"),
        plains: vec![LocationKey::new("mettupalayam"), LocationKey::new("coimbatore")],
        up: HeritageRun {
            number: "56136".to_string(),
            departs: at(7, 10),
            arrives: at(12, 15),
        },
        down: HeritageRun {
            number: "56137".to_string(),
            departs: at(14, 0),
            arrives: at(17, 35),
        },
        zone: "Southern".to_string(),
        note: "UNESCO World Heritage rack railway. Scenic journey through tea plantations and 16 tunnels."
            .to_string(),
    }
}
