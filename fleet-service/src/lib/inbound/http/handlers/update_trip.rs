use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
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
use crate::domain::trip::models::TripId;
use crate::domain::trip::models::TripPatch;
use crate::domain::trip::models::TripStatus;
use crate::domain::trip::ports::TripServicePort;
use crate::inbound::http::messages::TripData;
use crate::inbound::http::router::AppState;

pub async fn update_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    payload: Result<Json<UpdateTripRequest>, JsonRejection>,
) -> Result<ApiSuccess<TripData>, ApiError> {
    let trip_id = TripId::from_string(&trip_id).map_err(TripError::from)?;
    let Json(body) = payload?;

    state
        .trip_service
        .update_trip(&trip_id, body.try_into_patch()?)
        .await
        .map_err(ApiError::from)
        .map(|ref trip| ApiSuccess::new(StatusCode::OK, trip.into()))
}

/// HTTP request body for a partial trip update.
///
/// Lists every mutable field; anything else (including `trip_number`) is
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTripRequest {
    #[serde(default, alias = "driverId")]
    driver_id: Option<String>,
    #[serde(default, alias = "truckId")]
    truck_id: Option<String>,
    #[serde(default, alias = "trailerId")]
    trailer_id: Option<String>,
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    destination: Option<String>,
    #[serde(default, alias = "departureDate")]
    departure_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "arrivalDate")]
    arrival_date: Option<DateTime<Utc>>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "mileageStart")]
    mileage_start: Option<u32>,
    #[serde(default, alias = "mileageEnd")]
    mileage_end: Option<u32>,
    #[serde(default, alias = "fuelConsumption")]
    fuel_consumption: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
}

impl UpdateTripRequest {
    fn try_into_patch(self) -> Result<TripPatch, TripError> {
        Ok(TripPatch {
            driver_id: self
                .driver_id
                .as_deref()
                .map(DriverId::from_string)
                .transpose()?,
            truck_id: self
                .truck_id
                .as_deref()
                .map(TruckId::from_string)
                .transpose()?,
            trailer_id: self
                .trailer_id
                .as_deref()
                .map(TrailerId::from_string)
                .transpose()?,
            origin: self.origin.map(|origin| origin.trim().to_string()),
            destination: self
                .destination
                .map(|destination| destination.trim().to_string()),
            departure_date: self.departure_date,
            arrival_date: self.arrival_date,
            status: self
                .status
                .as_deref()
                .map(str::parse::<TripStatus>)
                .transpose()?,
            mileage_start: self.mileage_start,
            mileage_end: self.mileage_end,
            fuel_consumption: self.fuel_consumption,
            notes: self.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_fields() {
        let result = serde_json::from_str::<UpdateTripRequest>(r#"{"trip_number":"TRIP-000009"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_accepts_camel_case_aliases() {
        let request: UpdateTripRequest =
            serde_json::from_str(r#"{"status":"completed","mileageEnd":50000}"#).unwrap();
        let patch = request.try_into_patch().unwrap();

        assert_eq!(patch.status, Some(TripStatus::Completed));
        assert_eq!(patch.completion_mileage(), Some(50_000));
    }

    #[test]
    fn test_rejects_bad_references() {
        let request = UpdateTripRequest {
            truck_id: Some("not-a-uuid".to_string()),
            ..UpdateTripRequest::default()
        };
        assert!(matches!(
            request.try_into_patch(),
            Err(TripError::InvalidId(_))
        ));
    }
}
