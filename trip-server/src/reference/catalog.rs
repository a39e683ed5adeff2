//! Operators, properties and service classes offered by the synthesizers.

use std::ops::RangeInclusive;

use crate::domain::BudgetTier;

/// One value per budget tier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TierTable<T> {
    pub budget: T,
    pub moderate: T,
    pub luxury: T,
}

impl<T> TierTable<T> {
    pub fn new(budget: T, moderate: T, luxury: T) -> Self {
        Self {
            budget,
            moderate,
            luxury,
        }
    }

    pub fn get(&self, tier: BudgetTier) -> &T {
        match tier {
            BudgetTier::Budget => &self.budget,
            BudgetTier::Moderate => &self.moderate,
            BudgetTier::Luxury => &self.luxury,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Airline {
    pub name: String,
    pub code: String,
    pub rating: f64,
    pub low_cost: bool,
}

/// A flight cabin with its fare multiplier and cruise speeds (km/h).
#[derive(Debug, Clone, PartialEq)]
pub struct Cabin {
    pub label: String,
    pub multiplier: f64,
    pub speeds_kmh: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelChain {
    pub name: String,
    pub kind: String,
    pub stars: u8,
}

/// Nightly price range and star band for a tier.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelBand {
    pub nightly_inr: (f64, f64),
    pub stars: RangeInclusive<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainClass {
    pub code: String,
    pub name: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusOperator {
    pub name: String,
    pub full_name: String,
    pub government: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusType {
    pub label: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CabProvider {
    pub name: String,
    pub self_drive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleClass {
    pub label: String,
    pub seats: u32,
    pub multiplier: f64,
}

/// Everything the synthesizers draw operators and classes from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub airlines: Vec<Airline>,
    pub cabins: TierTable<Cabin>,
    pub hotel_chains: Vec<HotelChain>,
    pub hotel_bands: TierTable<HotelBand>,
    pub hotel_amenities: Vec<String>,
    pub train_classes: TierTable<Vec<TrainClass>>,
    pub bus_operators: Vec<BusOperator>,
    pub bus_types: TierTable<Vec<BusType>>,
    pub cab_providers: Vec<CabProvider>,
    pub cab_vehicles: TierTable<Vec<VehicleClass>>,
    pub self_drive_vehicles: TierTable<Vec<VehicleClass>>,
}

impl Default for Cabin {
    fn default() -> Self {
        Self {
            label: "Economy".to_string(),
            multiplier: 1.0,
            speeds_kmh: vec![700, 740, 780],
        }
    }
}

impl Default for HotelBand {
    fn default() -> Self {
        Self {
            nightly_inr: (8000.0, 25000.0),
            stars: 3..=4,
        }
    }
}

impl Catalog {
    /// Airlines a tier may fly. Luxury travelers skip low-cost carriers.
    pub fn airlines_for(&self, tier: BudgetTier) -> Vec<&Airline> {
        self.airlines
            .iter()
            .filter(|a| tier != BudgetTier::Luxury || !a.low_cost)
            .collect()
    }

    /// Hotel chains whose star rating falls in the tier's band.
    pub fn hotel_chains_for(&self, tier: BudgetTier) -> Vec<&HotelChain> {
        let band = &self.hotel_bands.get(tier).stars;
        self.hotel_chains
            .iter()
            .filter(|c| band.contains(&c.stars))
            .collect()
    }

    /// Bus operators, government or private.
    pub fn bus_operators(&self, government: bool) -> Vec<&BusOperator> {
        self.bus_operators
            .iter()
            .filter(|o| o.government == government)
            .collect()
    }
}

fn airline(name: &str, code: &str, rating: f64, low_cost: bool) -> Airline {
    Airline {
        name: name.to_string(),
        code: code.to_string(),
        rating,
        low_cost,
    }
}

fn chain(name: &str, kind: &str, stars: u8) -> HotelChain {
    HotelChain {
        name: name.to_string(),
        kind: kind.to_string(),
        stars,
    }
}

fn class(code: &str, name: &str, multiplier: f64) -> TrainClass {
    TrainClass {
        code: code.to_string(),
        name: name.to_string(),
        multiplier,
    }
}

fn bus_operator(name: &str, full_name: &str, government: bool) -> BusOperator {
    BusOperator {
        name: name.to_string(),
        full_name: full_name.to_string(),
        government,
    }
}

fn bus_type(label: &str, multiplier: f64) -> BusType {
    BusType {
        label: label.to_string(),
        multiplier,
    }
}

fn vehicle(label: &str, seats: u32, multiplier: f64) -> VehicleClass {
    VehicleClass {
        label: label.to_string(),
        seats,
        multiplier,
    }
}

fn cab(name: &str, self_drive: bool) -> CabProvider {
    CabProvider {
        name: name.to_string(),
        self_drive,
    }
}

/// The built-in catalog.
pub fn builtin_catalog() -> Catalog {
    Catalog {
        airlines: vec![
            airline("SkyVista Airways", "SVA", 4.5, false),
            airline("AeroConnect", "ACN", 4.2, true),
            airline("GlobalWing Airlines", "GWA", 4.7, false),
            airline("PacificStar", "PST", 4.0, true),
            airline("TransWorld Express", "TWE", 4.3, false),
            airline("NorthSky Aviation", "NSA", 4.6, false),
        ],
        cabins: TierTable::new(
            Cabin {
                label: "Economy".to_string(),
                multiplier: 1.0,
                speeds_kmh: vec![700, 740, 780],
            },
            Cabin {
                label: "Premium Economy".to_string(),
                multiplier: 1.8,
                speeds_kmh: vec![700, 740, 780],
            },
            Cabin {
                label: "Business".to_string(),
                multiplier: 3.5,
                speeds_kmh: vec![780, 820, 860],
            },
        ),
        hotel_chains: vec![
            chain("Taj", "Luxury Hotel", 5),
            chain("ITC Hotels", "Luxury Hotel", 5),
            chain("The Leela", "Luxury Hotel", 5),
            chain("Lemon Tree", "Business Hotel", 4),
            chain("FabHotel", "Budget Hotel", 3),
            chain("Treebo", "Budget Hotel", 3),
            chain("OYO Rooms", "Budget Hotel", 2),
            chain("Radisson", "Premium Hotel", 4),
            chain("Novotel", "Business Hotel", 4),
            chain("The Residency", "Business Hotel", 3),
            chain("Fortune Hotel", "Business Hotel", 4),
            chain("Zostel", "Hostel", 2),
        ],
        hotel_bands: TierTable::new(
            HotelBand {
                nightly_inr: (3000.0, 10000.0),
                stars: 2..=3,
            },
            HotelBand {
                nightly_inr: (8000.0, 25000.0),
                stars: 3..=4,
            },
            HotelBand {
                nightly_inr: (20000.0, 65000.0),
                stars: 4..=5,
            },
        ),
        hotel_amenities: [
            "Free WiFi",
            "Swimming Pool",
            "Spa & Wellness",
            "Fitness Center",
            "Restaurant",
            "Room Service",
            "Airport Shuttle",
            "Parking",
            "Business Center",
            "Concierge",
            "Rooftop Bar",
            "Laundry Service",
            "Pet Friendly",
            "EV Charging",
            "Kids Club",
            "Beach Access",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        train_classes: TierTable::new(
            vec![
                class("SL", "Sleeper Class", 1.0),
                class("3A", "AC 3-Tier", 2.5),
            ],
            vec![
                class("3A", "AC 3-Tier", 2.5),
                class("2A", "AC 2-Tier", 3.8),
                class("CC", "AC Chair Car", 2.0),
            ],
            vec![
                class("2A", "AC 2-Tier", 3.8),
                class("1A", "AC First Class", 6.0),
                class("EC", "Executive Chair Car", 4.5),
            ],
        ),
        bus_operators: vec![
            bus_operator("TNSTC", "Tamil Nadu State Transport", true),
            bus_operator("SETC", "State Express Transport", true),
            bus_operator("KSRTC", "Kerala State RTC", true),
            bus_operator("KSRTC-KA", "Karnataka State RTC", true),
            bus_operator("APSRTC", "Andhra Pradesh State RTC", true),
            bus_operator("TSRTC", "Telangana State RTC", true),
            bus_operator("KPN Travels", "KPN Travels", false),
            bus_operator("SRS Travels", "SRS Travels", false),
            bus_operator("Parveen Travels", "Parveen Travels", false),
            bus_operator("SRM Travels", "SRM Travels", false),
            bus_operator("Kallada Travels", "Kallada Travels", false),
            bus_operator("Orange Tours", "Orange Tours", false),
            bus_operator("VRL Travels", "VRL Travels", false),
            bus_operator("IntrCity SmartBus", "IntrCity SmartBus", false),
            bus_operator("Jabbar Travels", "Jabbar Travels", false),
            bus_operator("Rajesh Transports", "Rajesh Transports", false),
        ],
        bus_types: TierTable::new(
            vec![
                bus_type("Non-AC Seater", 1.0),
                bus_type("AC Seater", 1.6),
                bus_type("Non-AC Sleeper", 1.3),
            ],
            vec![
                bus_type("AC Seater", 1.6),
                bus_type("AC Sleeper", 2.2),
                bus_type("Multi-Axle AC Semi-Sleeper", 2.5),
            ],
            vec![
                bus_type("Volvo AC Multi-Axle", 3.0),
                bus_type("Mercedes AC Sleeper", 3.5),
                bus_type("Scania AC Multi-Axle", 3.8),
            ],
        ),
        cab_providers: vec![
            cab("Ola Outstation", false),
            cab("Uber Intercity", false),
            cab("Savaari Car Rental", false),
            cab("IntrCity Ryde", false),
            cab("Zoomcar", true),
        ],
        cab_vehicles: TierTable::new(
            vec![
                vehicle("Hatchback (WagonR)", 3, 0.85),
                vehicle("Sedan (Swift Dzire)", 3, 1.0),
            ],
            vec![
                vehicle("Sedan (Honda Amaze)", 3, 1.0),
                vehicle("SUV (Toyota Innova)", 6, 1.3),
            ],
            vec![
                vehicle("Premium (Toyota Innova Crysta)", 6, 1.6),
                vehicle("SUV (Mahindra XUV700)", 6, 1.5),
            ],
        ),
        self_drive_vehicles: TierTable::new(
            vec![
                vehicle("Hyundai i20", 4, 0.9),
                vehicle("Swift Dzire", 4, 1.0),
            ],
            vec![
                vehicle("Maruti Baleno", 4, 1.0),
                vehicle("Tata Nexon", 4, 1.15),
            ],
            vec![
                vehicle("Mahindra XUV700", 6, 1.5),
                vehicle("Toyota Fortuner", 6, 1.8),
            ],
        ),
    }
}
