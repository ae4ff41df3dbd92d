//! Test fixtures for itinerary-planner.
//!
//! Provides real landmark coordinates in two cities far enough apart that a
//! proximity walk never mixes them.

#![allow(dead_code)]

pub mod landmarks;

pub use landmarks::*;
