//! Multi-modal trip planner server.
//!
//! Turns one trip request into flight, hotel, train and road options plus a
//! day-by-day itinerary, all synthesized from built-in reference tables.

pub mod domain;
pub mod pipeline;
pub mod reference;
pub mod synth;
pub mod web;
