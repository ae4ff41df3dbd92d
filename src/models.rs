//! Stored entities and their typed storage boundary.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{Filter, StoreError};
use crate::traits::{DocumentStore, Stop};

pub const DEFAULT_ITINERARY_TITLE: &str = "Smart Itinerary";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// An entity persisted in its own collection.
///
/// The collection name is fixed per type.
pub trait Document: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A place saved by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Groups places per user or session.
    pub user_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Free-form category such as museum, cafe or park.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Document for Place {
    const COLLECTION: &'static str = "place";

    fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("user_id"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        // NaN fails both range checks.
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

/// Places visited on one day, in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number.
    pub day: u32,
    pub place_ids: Vec<String>,
}

/// A generated itinerary. Never updated after it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub days: Vec<DayPlan>,
    /// Sum of travel within each day; transitions between days are excluded.
    #[serde(default)]
    pub total_distance_km: Option<f64>,
}

impl Document for Itinerary {
    const COLLECTION: &'static str = "itinerary";

    fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("user_id"));
        }
        Ok(())
    }
}

/// A record together with the identifier the store assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub record: T,
}

impl Stop for Stored<Place> {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn location(&self) -> (f64, f64) {
        (self.record.latitude, self.record.longitude)
    }
}

/// Fetches and validates every `D` matching `filter`.
///
/// A record that fails to decode or validate fails the whole query.
pub fn find_documents<D, S>(store: &S, filter: &Filter) -> Result<Vec<Stored<D>>, StoreError>
where
    D: Document,
    S: DocumentStore + ?Sized,
{
    store
        .find(D::COLLECTION, filter)?
        .into_iter()
        .map(|raw| {
            let invalid = |reason: String| StoreError::InvalidRecord {
                collection: D::COLLECTION.to_string(),
                id: raw.id.clone(),
                reason,
            };
            let record: D =
                serde_json::from_value(raw.body).map_err(|err| invalid(err.to_string()))?;
            record.validate().map_err(|err| invalid(err.to_string()))?;
            Ok(Stored { id: raw.id, record })
        })
        .collect()
}

/// Serializes `document` into its collection and returns the new id.
pub fn insert_document<D, S>(store: &S, document: &D) -> Result<String, StoreError>
where
    D: Document,
    S: DocumentStore + ?Sized,
{
    let body = serde_json::to_value(document)?;
    store.insert(D::COLLECTION, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn louvre() -> Place {
        Place {
            user_id: "u1".to_string(),
            name: "Louvre".to_string(),
            latitude: 48.8606,
            longitude: 2.3376,
            category: Some("museum".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_place_validation_bounds() {
        assert!(louvre().validate().is_ok());

        let edge = Place { latitude: -90.0, longitude: 180.0, ..louvre() };
        assert!(edge.validate().is_ok());

        let bad_lat = Place { latitude: 90.5, ..louvre() };
        assert_eq!(bad_lat.validate(), Err(ValidationError::LatitudeOutOfRange(90.5)));

        let bad_lng = Place { longitude: -180.01, ..louvre() };
        assert_eq!(bad_lng.validate(), Err(ValidationError::LongitudeOutOfRange(-180.01)));

        let nan = Place { latitude: f64::NAN, ..louvre() };
        assert!(nan.validate().is_err());

        let unnamed = Place { name: "  ".to_string(), ..louvre() };
        assert_eq!(unnamed.validate(), Err(ValidationError::EmptyField("name")));
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Place::COLLECTION, "place");
        assert_eq!(Itinerary::COLLECTION, "itinerary");
    }

    #[test]
    fn test_stored_serializes_id_alongside_fields() {
        let stored = Stored { id: "abc".to_string(), record: louvre() };
        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["_id"], "abc");
        assert_eq!(value["name"], "Louvre");
        assert_eq!(value["category"], "museum");
        assert!(value.get("record").is_none());
    }

    #[test]
    fn test_itinerary_start_date_format() {
        let itinerary = Itinerary {
            user_id: "u1".to_string(),
            title: DEFAULT_ITINERARY_TITLE.to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1),
            days: vec![DayPlan { day: 1, place_ids: vec!["a".to_string()] }],
            total_distance_km: Some(0.0),
        };
        let value = serde_json::to_value(&itinerary).unwrap();
        assert_eq!(value["start_date"], "2026-05-01");
        assert_eq!(value["days"][0]["place_ids"][0], "a");
    }

    #[test]
    fn test_round_trip_through_store() {
        let store = MemoryStore::new();
        let id = insert_document(&store, &louvre()).unwrap();

        let found: Vec<Stored<Place>> =
            find_documents(&store, &Filter::new().field("user_id", "u1")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        assert_eq!(found[0].record, louvre());
        assert_eq!(found[0].location(), (48.8606, 2.3376));
    }

    #[test]
    fn test_invalid_stored_record_is_rejected() {
        let store = MemoryStore::new();
        store
            .insert("place", json!({"user_id": "u1", "name": "Nowhere", "latitude": 123.0, "longitude": 0.0}))
            .unwrap();

        let err = find_documents::<Place, _>(&store, &Filter::new()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord { ref collection, .. } if collection == "place"));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let store = MemoryStore::new();
        store.insert("place", json!({"user_id": "u1", "name": "No coords"})).unwrap();
        assert!(find_documents::<Place, _>(&store, &Filter::new()).is_err());
    }
}
