use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::SessionIdentity;
use crate::domain::trip::errors::TripError;
use crate::domain::trip::models::TripId;
use crate::domain::trip::models::UpdateTripStatusCommand;
use crate::domain::trip::ports::TripServicePort;
use crate::inbound::http::messages::TripData;
use crate::inbound::http::router::AppState;

pub async fn update_trip_status(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Path(trip_id): Path<String>,
    payload: Result<Json<UpdateTripStatusRequest>, JsonRejection>,
) -> Result<ApiSuccess<TripData>, ApiError> {
    let trip_id = TripId::from_string(&trip_id).map_err(TripError::from)?;
    let Json(body) = payload?;

    let command = UpdateTripStatusCommand::parse(
        body.status.as_deref(),
        body.mileage_end,
        body.fuel_consumption,
    )?;

    state
        .trip_service
        .update_trip_status(&trip_id, command, &identity)
        .await
        .map_err(ApiError::from)
        .map(|ref trip| ApiSuccess::new(StatusCode::OK, trip.into()))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTripStatusRequest {
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "mileageEnd")]
    mileage_end: Option<u32>,
    #[serde(default, alias = "fuelConsumption")]
    fuel_consumption: Option<f64>,
}
