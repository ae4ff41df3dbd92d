//! itinerary-planner
//!
//! Save geographic places per user and turn them into multi-day itineraries
//! ordered by a greedy nearest-neighbor walk.

pub mod traits;
pub mod haversine;
pub mod models;
pub mod planner;
pub mod store;
pub mod service;
pub mod config;
pub mod http;
