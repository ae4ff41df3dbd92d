//! Core traits for the itinerary planner.
//!
//! The planner only needs to know where a stop is and how to measure the gap
//! between two stops. Storage is reached through a document-store seam so
//! handlers can run against an in-memory fake.

use std::hash::Hash;

use serde_json::Value;

use crate::store::{Filter, StoreError, StoredDocument};

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A single place the planner can put on a route.
pub trait Stop {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Location coordinates (lat, lng) in degrees.
    fn location(&self) -> (f64, f64);
}

/// Measures distance between two (lat, lng) points in kilometers.
pub trait DistanceMetric {
    fn distance_km(&self, from: (f64, f64), to: (f64, f64)) -> f64;
}

/// Minimal document storage used by the HTTP layer.
///
/// Records are untyped JSON at this seam; typed validation happens in
/// [`crate::models::find_documents`] and [`crate::models::insert_document`].
pub trait DocumentStore: Send + Sync {
    /// Returns every document in `collection` matching all fields of
    /// `filter`, in insertion order.
    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<StoredDocument>, StoreError>;

    /// Stores `document` and returns its assigned identifier.
    fn insert(&self, collection: &str, document: Value) -> Result<String, StoreError>;

    /// Names of the collections that currently hold documents.
    fn collections(&self) -> Result<Vec<String>, StoreError>;

    /// Human-readable backend name for diagnostics.
    fn backend_name(&self) -> &str;
}
