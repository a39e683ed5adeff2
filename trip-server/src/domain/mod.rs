//! Domain types for the trip planner.
//!
//! This module contains the small value types shared by the reference
//! tables, the synthesizers and the pipeline. Types normalize or validate
//! their input at construction time, so code that receives them can trust
//! their form.

mod location;
mod mode;
mod tier;
mod time;

pub use location::{Location, LocationKey, Terminal, Unserved, title_case};
pub use mode::TransportMode;
pub use tier::BudgetTier;
pub use time::{ClockTime, TimeError, TravelDuration};
