/// Serializable views of domain entities for HTTP responses.
///
/// Domain models stay free of serde; handlers convert through these.
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::account::models::AccountProfile;
use crate::domain::trip::models::Trip;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AccountProfile> for AccountData {
    fn from(account: &AccountProfile) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.as_str().to_string(),
            name: account.name.clone(),
            role: account.role.as_str().to_string(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripData {
    pub id: String,
    pub trip_number: String,
    pub driver_id: String,
    pub truck_id: String,
    pub trailer_id: Option<String>,
    pub origin: String,
    pub destination: String,
    pub departure_date: DateTime<Utc>,
    pub arrival_date: Option<DateTime<Utc>>,
    pub status: String,
    pub mileage_start: u32,
    pub mileage_end: Option<u32>,
    pub fuel_consumption: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Trip> for TripData {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id.to_string(),
            trip_number: trip.trip_number.as_str().to_string(),
            driver_id: trip.driver_id.to_string(),
            truck_id: trip.truck_id.to_string(),
            trailer_id: trip.trailer_id.map(|id| id.to_string()),
            origin: trip.origin.clone(),
            destination: trip.destination.clone(),
            departure_date: trip.departure_date,
            arrival_date: trip.arrival_date,
            status: trip.status.as_str().to_string(),
            mileage_start: trip.mileage_start,
            mileage_end: trip.mileage_end,
            fuel_consumption: trip.fuel_consumption,
            notes: trip.notes.clone(),
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        }
    }
}

impl TripData {
    pub fn from_trips(trips: &[Trip]) -> Vec<Self> {
        trips.iter().map(TripData::from).collect()
    }
}
