//! Place and itinerary operations on top of a [`DocumentStore`].

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::haversine::Haversine;
use crate::models::{
    DEFAULT_ITINERARY_TITLE, Document, Itinerary, Place, Stored, ValidationError, find_documents,
    insert_document,
};
use crate::planner::{plan, round_km};
use crate::store::{Filter, StoreError};
use crate::traits::DocumentStore;

pub const MIN_DAYS: i64 = 1;
pub const MAX_DAYS: i64 = 14;

/// Collections listed in a health report.
const HEALTH_COLLECTION_LIMIT: usize = 10;

/// Environment variables a database-backed store is configured from.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller sent something we will not act on.
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::InvalidRequest(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavePlaceRequest {
    pub user_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<SavePlaceRequest> for Place {
    fn from(req: SavePlaceRequest) -> Self {
        Place {
            user_id: req.user_id,
            name: req.name,
            latitude: req.latitude,
            longitude: req.longitude,
            category: req.category,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// User or session whose saved places are planned.
    pub user_id: String,
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub title: Option<String>,
}

fn default_days() -> i64 {
    MIN_DAYS
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated {
    pub id: String,
    pub itinerary: Itinerary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub backend: String,
    pub database: String,
    pub storage_backend: String,
    /// "Set" or "Not Set"; the value itself is never reported.
    pub database_url: String,
    pub database_name: String,
    pub collections: Vec<String>,
}

#[derive(Clone)]
pub struct ItineraryService {
    store: Arc<dyn DocumentStore>,
}

impl ItineraryService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn save_place(&self, req: SavePlaceRequest) -> Result<String, ServiceError> {
        let place = Place::from(req);
        place.validate()?;
        let id = insert_document(self.store.as_ref(), &place)?;
        info!(place_id = %id, user_id = %place.user_id, "saved place");
        Ok(id)
    }

    pub fn list_places(&self, user_id: &str) -> Result<Vec<Stored<Place>>, ServiceError> {
        Ok(find_documents(self.store.as_ref(), &user_filter(user_id))?)
    }

    /// Plans the user's saved places over `req.days` and stores the result.
    pub fn generate(&self, req: GenerateRequest) -> Result<Generated, ServiceError> {
        if !(MIN_DAYS..=MAX_DAYS).contains(&req.days) {
            return Err(ServiceError::InvalidRequest(format!(
                "days must be between {} and {}",
                MIN_DAYS, MAX_DAYS
            )));
        }

        let places: Vec<Stored<Place>> =
            find_documents(self.store.as_ref(), &user_filter(&req.user_id))?;
        if places.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "No saved places found for this user".to_string(),
            ));
        }

        let route = plan(&places, req.days as usize, &Haversine);

        let title = req
            .title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_ITINERARY_TITLE.to_string());

        let itinerary = Itinerary {
            user_id: req.user_id,
            title,
            start_date: req.start_date,
            days: route.day_plans(),
            total_distance_km: Some(round_km(route.total_distance_km)),
        };

        let id = insert_document(self.store.as_ref(), &itinerary)?;
        info!(
            itinerary_id = %id,
            user_id = %itinerary.user_id,
            places = places.len(),
            days = itinerary.days.len(),
            "generated itinerary"
        );

        Ok(Generated { id, itinerary })
    }

    pub fn list_itineraries(&self, user_id: &str) -> Result<Vec<Stored<Itinerary>>, ServiceError> {
        Ok(find_documents(self.store.as_ref(), &user_filter(user_id))?)
    }

    pub fn health(&self) -> HealthReport {
        let storage_backend = self.store.backend_name().to_string();
        match self.store.collections() {
            Ok(mut collections) => {
                collections.truncate(HEALTH_COLLECTION_LIMIT);
                HealthReport {
                    backend: "running".to_string(),
                    database: "connected".to_string(),
                    storage_backend,
                    database_url: env_status(DATABASE_URL_VAR),
                    database_name: env_status(DATABASE_NAME_VAR),
                    collections,
                }
            }
            Err(err) => {
                warn!(error = %err, "storage health check failed");
                HealthReport {
                    backend: "running".to_string(),
                    database: format!("error: {}", err),
                    storage_backend,
                    database_url: env_status(DATABASE_URL_VAR),
                    database_name: env_status(DATABASE_NAME_VAR),
                    collections: Vec::new(),
                }
            }
        }
    }
}

fn env_status(var: &str) -> String {
    set_status(std::env::var_os(var).is_some_and(|value| !value.is_empty())).to_string()
}

fn set_status(present: bool) -> &'static str {
    if present { "Set" } else { "Not Set" }
}

fn user_filter(user_id: &str) -> Filter {
    Filter::new().field("user_id", user_id)
}
