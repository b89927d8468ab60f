use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::IdError;
use crate::domain::fleet::models::DriverId;
use crate::domain::fleet::models::TrailerId;
use crate::domain::fleet::models::TruckId;
use crate::domain::trip::errors::TripError;
use crate::domain::trip::errors::TripStatusError;

/// Trip aggregate entity.
///
/// Holds references to a driver, a truck and optionally a trailer by id
/// only. Status changes may carry a side effect on the truck, computed by
/// the service and applied by the store together with the trip write.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub trip_number: TripNumber,
    pub driver_id: DriverId,
    pub truck_id: TruckId,
    pub trailer_id: Option<TrailerId>,
    pub origin: String,
    pub destination: String,
    pub departure_date: DateTime<Utc>,
    pub arrival_date: Option<DateTime<Utc>>,
    pub status: TripStatus,
    pub mileage_start: u32,
    pub mileage_end: Option<u32>,
    pub fuel_consumption: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Build a new trip from a validated command and its allocated number.
    pub fn new(command: CreateTripCommand, trip_number: TripNumber) -> Self {
        let now = Utc::now();
        Self {
            id: TripId::new(),
            trip_number,
            driver_id: command.driver_id,
            truck_id: command.truck_id,
            trailer_id: command.trailer_id,
            origin: command.origin,
            destination: command.destination,
            departure_date: command.departure_date,
            arrival_date: None,
            status: command.status.unwrap_or_default(),
            mileage_start: command.mileage_start,
            mileage_end: command.mileage_end,
            fuel_consumption: command.fuel_consumption,
            notes: command.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the field-level invariants of a trip.
    ///
    /// # Errors
    /// * `Validation` - Blank route, ending mileage below start, or bad fuel figure
    pub fn validate(&self) -> Result<(), TripError> {
        check_fields(
            &self.origin,
            &self.destination,
            self.mileage_start,
            self.mileage_end,
            self.fuel_consumption,
        )
    }
}

fn check_fields(
    origin: &str,
    destination: &str,
    mileage_start: u32,
    mileage_end: Option<u32>,
    fuel_consumption: Option<f64>,
) -> Result<(), TripError> {
    if origin.trim().is_empty() {
        return Err(TripError::Validation("Origin is required".to_string()));
    }
    if destination.trim().is_empty() {
        return Err(TripError::Validation("Destination is required".to_string()));
    }
    if let Some(end) = mileage_end {
        if end < mileage_start {
            return Err(TripError::Validation(format!(
                "Mileage end ({}) must be greater than or equal to mileage start ({})",
                end, mileage_start
            )));
        }
    }
    if let Some(fuel) = fuel_consumption {
        if !fuel.is_finite() || fuel < 0.0 {
            return Err(TripError::Validation(
                "Fuel consumption must be a non-negative number".to_string(),
            ));
        }
    }
    Ok(())
}

/// Trip unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TripId(pub Uuid);

impl TripId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s).map(TripId).map_err(|_| IdError::InvalidFormat {
            kind: "trip",
            value: s.to_string(),
        })
    }
}

impl Default for TripId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human-facing trip reference, `TRIP-` followed by a six digit sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripNumber(String);

impl TripNumber {
    /// Number for the n-th trip (1-based).
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("TRIP-{:06}", sequence))
    }

    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trip lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TripStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Pending => "pending",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Cancelled)
    }

    /// Transition table: `pending -> in_progress -> completed`, and
    /// `cancelled` from any non-terminal state. Staying put is always allowed.
    pub fn can_transition_to(&self, next: TripStatus) -> bool {
        if *self == next {
            return true;
        }
        match (self, next) {
            (TripStatus::Pending, TripStatus::InProgress) => true,
            (TripStatus::InProgress, TripStatus::Completed) => true,
            (current, TripStatus::Cancelled) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl FromStr for TripStatus {
    type Err = TripStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TripStatus::Pending),
            "in_progress" => Ok(TripStatus::InProgress),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" => Ok(TripStatus::Cancelled),
            other => Err(TripStatusError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to create a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTripCommand {
    pub driver_id: DriverId,
    pub truck_id: TruckId,
    pub trailer_id: Option<TrailerId>,
    pub origin: String,
    pub destination: String,
    pub departure_date: DateTime<Utc>,
    pub mileage_start: u32,
    pub status: Option<TripStatus>,
    pub mileage_end: Option<u32>,
    pub fuel_consumption: Option<f64>,
    pub notes: Option<String>,
}

impl CreateTripCommand {
    /// # Errors
    /// * `Validation` - Same field rules as [`Trip::validate`]
    pub fn validate(&self) -> Result<(), TripError> {
        check_fields(
            &self.origin,
            &self.destination,
            self.mileage_start,
            self.mileage_end,
            self.fuel_consumption,
        )
    }
}

/// Partial trip update. Every field is optional; `None` leaves the stored
/// value untouched. The trip number is not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPatch {
    pub driver_id: Option<DriverId>,
    pub truck_id: Option<TruckId>,
    pub trailer_id: Option<TrailerId>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<DateTime<Utc>>,
    pub arrival_date: Option<DateTime<Utc>>,
    pub status: Option<TripStatus>,
    pub mileage_start: Option<u32>,
    pub mileage_end: Option<u32>,
    pub fuel_consumption: Option<f64>,
    pub notes: Option<String>,
}

impl TripPatch {
    /// Ending mileage to push onto the truck, if this patch completes the
    /// trip and carries the reading in the same call.
    pub fn completion_mileage(&self) -> Option<u32> {
        match self.status {
            Some(TripStatus::Completed) => self.mileage_end,
            _ => None,
        }
    }

    pub fn apply_to(self, trip: &mut Trip) {
        if let Some(driver_id) = self.driver_id {
            trip.driver_id = driver_id;
        }
        if let Some(truck_id) = self.truck_id {
            trip.truck_id = truck_id;
        }
        if let Some(trailer_id) = self.trailer_id {
            trip.trailer_id = Some(trailer_id);
        }
        if let Some(origin) = self.origin {
            trip.origin = origin;
        }
        if let Some(destination) = self.destination {
            trip.destination = destination;
        }
        if let Some(departure_date) = self.departure_date {
            trip.departure_date = departure_date;
        }
        if let Some(arrival_date) = self.arrival_date {
            trip.arrival_date = Some(arrival_date);
        }
        if let Some(status) = self.status {
            trip.status = status;
        }
        if let Some(mileage_start) = self.mileage_start {
            trip.mileage_start = mileage_start;
        }
        if let Some(mileage_end) = self.mileage_end {
            trip.mileage_end = Some(mileage_end);
        }
        if let Some(fuel_consumption) = self.fuel_consumption {
            trip.fuel_consumption = Some(fuel_consumption);
        }
        if let Some(notes) = self.notes {
            trip.notes = Some(notes);
        }
        trip.updated_at = Utc::now();
    }
}

/// Command for the status endpoint: a required status plus the readings a
/// driver reports when closing a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTripStatusCommand {
    pub status: TripStatus,
    pub mileage_end: Option<u32>,
    pub fuel_consumption: Option<f64>,
}

impl UpdateTripStatusCommand {
    /// # Errors
    /// * `MissingStatus` - Status absent or blank
    /// * `InvalidStatus` - Not one of the known statuses
    pub fn parse(
        status: Option<&str>,
        mileage_end: Option<u32>,
        fuel_consumption: Option<f64>,
    ) -> Result<Self, TripError> {
        let status = match status.map(str::trim) {
            None | Some("") => return Err(TripError::MissingStatus),
            Some(raw) => raw.parse::<TripStatus>()?,
        };

        Ok(Self {
            status,
            mileage_end,
            fuel_consumption,
        })
    }

    /// Turn the command into a patch against the current trip. Completing
    /// stamps the arrival date unless one is already recorded.
    pub fn into_patch(self, current: &Trip, now: DateTime<Utc>) -> TripPatch {
        let arrival_date = (self.status == TripStatus::Completed
            && current.arrival_date.is_none())
        .then_some(now);

        TripPatch {
            status: Some(self.status),
            mileage_end: self.mileage_end,
            fuel_consumption: self.fuel_consumption,
            arrival_date,
            ..TripPatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> CreateTripCommand {
        CreateTripCommand {
            driver_id: DriverId::new(),
            truck_id: TruckId::new(),
            trailer_id: None,
            origin: "Rotterdam".to_string(),
            destination: "Lyon".to_string(),
            departure_date: Utc::now(),
            mileage_start: 42_000,
            status: None,
            mileage_end: None,
            fuel_consumption: None,
            notes: None,
        }
    }

    #[test]
    fn test_trip_number_format() {
        assert_eq!(TripNumber::from_sequence(1).as_str(), "TRIP-000001");
        assert_eq!(TripNumber::from_sequence(42).as_str(), "TRIP-000042");
        assert_eq!(TripNumber::from_sequence(1_234_567).as_str(), "TRIP-1234567");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("in_progress".parse::<TripStatus>(), Ok(TripStatus::InProgress));
        assert_eq!(
            "finished".parse::<TripStatus>(),
            Err(TripStatusError::Unknown("finished".to_string()))
        );
    }

    #[test]
    fn test_transition_table() {
        use TripStatus::*;

        assert!(Pending.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(Completed.can_transition_to(Completed));

        assert!(!Completed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(InProgress));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn test_new_trip_defaults_to_pending() {
        let trip = Trip::new(command(), TripNumber::from_sequence(1));
        assert_eq!(trip.status, TripStatus::Pending);
        assert_eq!(trip.arrival_date, None);
        assert!(trip.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_mileage_below_start() {
        let mut cmd = command();
        cmd.mileage_end = Some(41_999);
        assert!(matches!(cmd.validate(), Err(TripError::Validation(_))));

        cmd.mileage_end = Some(42_000);
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_blank_route_and_bad_fuel() {
        let mut cmd = command();
        cmd.origin = "  ".to_string();
        assert!(matches!(cmd.validate(), Err(TripError::Validation(_))));

        let mut cmd = command();
        cmd.fuel_consumption = Some(-1.0);
        assert!(matches!(cmd.validate(), Err(TripError::Validation(_))));

        cmd.fuel_consumption = Some(f64::NAN);
        assert!(matches!(cmd.validate(), Err(TripError::Validation(_))));
    }

    #[test]
    fn test_completion_mileage_requires_both_fields() {
        let patch = TripPatch {
            status: Some(TripStatus::Completed),
            mileage_end: Some(50_000),
            ..TripPatch::default()
        };
        assert_eq!(patch.completion_mileage(), Some(50_000));

        let patch = TripPatch {
            status: Some(TripStatus::Completed),
            ..TripPatch::default()
        };
        assert_eq!(patch.completion_mileage(), None);

        let patch = TripPatch {
            mileage_end: Some(50_000),
            ..TripPatch::default()
        };
        assert_eq!(patch.completion_mileage(), None);
    }

    #[test]
    fn test_status_command_parsing() {
        assert!(matches!(
            UpdateTripStatusCommand::parse(None, None, None),
            Err(TripError::MissingStatus)
        ));
        assert!(matches!(
            UpdateTripStatusCommand::parse(Some(" "), None, None),
            Err(TripError::MissingStatus)
        ));
        assert!(matches!(
            UpdateTripStatusCommand::parse(Some("done"), None, None),
            Err(TripError::InvalidStatus(_))
        ));
    }

    #[test]
    fn test_completing_stamps_arrival_once() {
        let now = Utc::now();
        let mut trip = Trip::new(command(), TripNumber::from_sequence(1));

        let cmd = UpdateTripStatusCommand::parse(Some("completed"), Some(50_000), None).unwrap();
        let patch = cmd.clone().into_patch(&trip, now);
        assert_eq!(patch.arrival_date, Some(now));

        let earlier = now - chrono::Duration::hours(3);
        trip.arrival_date = Some(earlier);
        let patch = cmd.into_patch(&trip, now);
        assert_eq!(patch.arrival_date, None);
    }

    #[test]
    fn test_patch_leaves_absent_fields() {
        let mut trip = Trip::new(command(), TripNumber::from_sequence(7));
        let before = trip.clone();

        TripPatch {
            notes: Some("Border delay".to_string()),
            ..TripPatch::default()
        }
        .apply_to(&mut trip);

        assert_eq!(trip.notes.as_deref(), Some("Border delay"));
        assert_eq!(trip.origin, before.origin);
        assert_eq!(trip.trip_number, before.trip_number);
        assert_eq!(trip.status, before.status);
    }
}
