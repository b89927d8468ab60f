use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::trip::errors::TripError;
use crate::domain::trip::models::TripId;
use crate::domain::trip::ports::TripServicePort;
use crate::inbound::http::messages::TripData;
use crate::inbound::http::router::AppState;

pub async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<ApiSuccess<TripData>, ApiError> {
    let trip_id = TripId::from_string(&trip_id).map_err(TripError::from)?;

    state
        .trip_service
        .get_trip(&trip_id)
        .await
        .map_err(ApiError::from)
        .map(|ref trip| ApiSuccess::new(StatusCode::OK, trip.into()))
}
