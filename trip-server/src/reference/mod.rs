//! Read-only reference data for the synthesizers.
//!
//! Built once at startup and shared behind an `Arc`; nothing here is
//! mutated after construction.

mod attractions;
mod catalog;
mod distance;
mod locations;
mod routes;

pub use attractions::{Attractions, AttractionsBuilder, DiningKind, DiningStyle, builtin_attractions};
pub use catalog::{
    Airline, BusOperator, BusType, Cabin, CabProvider, Catalog, HotelBand, HotelChain, TierTable,
    TrainClass, VehicleClass, builtin_catalog,
};
pub use distance::{DistanceTable, Distances, DistancesBuilder, builtin_distances};
pub use locations::{LocationRegistry, LocationRegistryBuilder, builtin_locations};
pub use routes::{
    Corridor, Eligibility, HeritageRun, HeritageService, RouteRules, RouteRulesBuilder,
    ServiceTemplate, SpeedClass, builtin_routes,
};

/// All lookup tables used by one planner.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub locations: LocationRegistry,
    pub distances: Distances,
    pub routes: RouteRules,
    pub catalog: Catalog,
    pub attractions: Attractions,
}

impl ReferenceData {
    /// The built-in tables.
    pub fn builtin() -> Self {
        Self {
            locations: builtin_locations(),
            distances: builtin_distances(),
            routes: builtin_routes(),
            catalog: builtin_catalog(),
            attractions: builtin_attractions(),
        }
    }
}
