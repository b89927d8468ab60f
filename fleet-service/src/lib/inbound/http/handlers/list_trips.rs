use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::trip::ports::TripServicePort;
use crate::inbound::http::messages::TripData;
use crate::inbound::http::router::AppState;

pub async fn list_trips(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<TripData>>, ApiError> {
    state
        .trip_service
        .list_trips()
        .await
        .map_err(ApiError::from)
        .map(|trips| ApiSuccess::new(StatusCode::OK, TripData::from_trips(&trips)))
}
