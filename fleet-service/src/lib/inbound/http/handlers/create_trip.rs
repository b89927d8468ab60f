use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::fleet::models::DriverId;
use crate::domain::fleet::models::TrailerId;
use crate::domain::fleet::models::TruckId;
use crate::domain::trip::errors::TripError;
use crate::domain::trip::models::CreateTripCommand;
use crate::domain::trip::models::TripStatus;
use crate::domain::trip::ports::TripServicePort;
use crate::inbound::http::messages::TripData;
use crate::inbound::http::router::AppState;

pub async fn create_trip(
    State(state): State<AppState>,
    payload: Result<Json<CreateTripRequest>, JsonRejection>,
) -> Result<ApiSuccess<TripData>, ApiError> {
    let Json(body) = payload?;

    state
        .trip_service
        .create_trip(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref trip| ApiSuccess::new(StatusCode::CREATED, trip.into()))
}

/// HTTP request body for creating a trip. Accepts camelCase aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateTripRequest {
    #[serde(alias = "driverId")]
    driver_id: String,
    #[serde(alias = "truckId")]
    truck_id: String,
    #[serde(default, alias = "trailerId")]
    trailer_id: Option<String>,
    origin: String,
    destination: String,
    #[serde(alias = "departureDate")]
    departure_date: DateTime<Utc>,
    #[serde(alias = "mileageStart")]
    mileage_start: u32,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "mileageEnd")]
    mileage_end: Option<u32>,
    #[serde(default, alias = "fuelConsumption")]
    fuel_consumption: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
}

impl CreateTripRequest {
    fn try_into_command(self) -> Result<CreateTripCommand, TripError> {
        Ok(CreateTripCommand {
            driver_id: DriverId::from_string(&self.driver_id)?,
            truck_id: TruckId::from_string(&self.truck_id)?,
            trailer_id: self
                .trailer_id
                .as_deref()
                .map(TrailerId::from_string)
                .transpose()?,
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            departure_date: self.departure_date,
            mileage_start: self.mileage_start,
            status: self
                .status
                .as_deref()
                .map(str::parse::<TripStatus>)
                .transpose()?,
            mileage_end: self.mileage_end,
            fuel_consumption: self.fuel_consumption,
            notes: self.notes,
        })
    }
}
