use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::SessionIdentity;
use crate::domain::trip::ports::TripServicePort;
use crate::inbound::http::messages::TripData;
use crate::inbound::http::router::AppState;

pub async fn list_my_trips(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> Result<ApiSuccess<Vec<TripData>>, ApiError> {
    state
        .trip_service
        .list_trips_for_account(&identity.account_id)
        .await
        .map_err(ApiError::from)
        .map(|trips| ApiSuccess::new(StatusCode::OK, TripData::from_trips(&trips)))
}
