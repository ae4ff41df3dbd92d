//! JSON HTTP API.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::models::{Itinerary, Place, Stored};
use crate::service::{
    Generated, GenerateRequest, HealthReport, ItineraryService, SavePlaceRequest, ServiceError,
};

pub const API_BANNER: &str = "AI Route Itinerary Creator API";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("request task failed: {0}")]
    Task(#[from] JoinError),
    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),
    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Service(ServiceError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Query(rejection) => rejection.status(),
            ApiError::Service(ServiceError::Store(_)) | ApiError::Task(_) => {
                error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

pub fn router(service: ItineraryService) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(health))
        .route("/api/places", post(save_place).get(list_places))
        .route("/api/itineraries/generate", post(generate_itinerary))
        .route("/api/itineraries", get(list_itineraries))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serves the API on `listener` until the future is dropped or fails.
pub async fn serve(listener: TcpListener, service: ItineraryService) -> std::io::Result<()> {
    axum::serve(listener, router(service)).await
}

/// Storage calls are synchronous; keep them off the async workers.
async fn blocking<T, F>(call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(call).await??)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": API_BANNER }))
}

async fn health(State(service): State<ItineraryService>) -> Result<Json<HealthReport>, ApiError> {
    let report = blocking(move || Ok(service.health())).await?;
    Ok(Json(report))
}

async fn save_place(
    State(service): State<ItineraryService>,
    payload: Result<Json<SavePlaceRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload?;
    let id = blocking(move || service.save_place(req)).await?;
    Ok(Json(json!({ "id": id })))
}

async fn list_places(
    State(service): State<ItineraryService>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Vec<Stored<Place>>>, ApiError> {
    let Query(query) = query?;
    let places = blocking(move || service.list_places(&query.user_id)).await?;
    Ok(Json(places))
}

async fn generate_itinerary(
    State(service): State<ItineraryService>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Generated>, ApiError> {
    let Json(req) = payload?;
    let generated = blocking(move || service.generate(req)).await?;
    Ok(Json(generated))
}

async fn list_itineraries(
    State(service): State<ItineraryService>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Vec<Stored<Itinerary>>>, ApiError> {
    let Query(query) = query?;
    let itineraries = blocking(move || service.list_itineraries(&query.user_id)).await?;
    Ok(Json(itineraries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_invalid_request_maps_to_bad_request() {
        let err = ApiError::from(ServiceError::InvalidRequest("nope".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_failure_maps_to_server_error() {
        let err = ApiError::from(ServiceError::Store(StoreError::Backend("down".to_string())));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
