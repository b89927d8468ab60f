use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::errors::IdError;
use crate::domain::fleet::errors::StatusError;

/// Truck unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TruckId(pub Uuid);

impl TruckId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s).map(TruckId).map_err(|_| IdError::InvalidFormat {
            kind: "truck",
            value: s.to_string(),
        })
    }
}

impl Default for TruckId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TruckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Driver profile unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriverId(pub Uuid);

impl DriverId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s).map(DriverId).map_err(|_| IdError::InvalidFormat {
            kind: "driver",
            value: s.to_string(),
        })
    }
}

impl Default for DriverId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trailer identifier. Trips reference trailers without resolving them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrailerId(pub Uuid);

impl TrailerId {
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s).map(TrailerId).map_err(|_| IdError::InvalidFormat {
            kind: "trailer",
            value: s.to_string(),
        })
    }
}

impl fmt::Display for TrailerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Truck availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TruckStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    OutOfService,
}

impl TruckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TruckStatus::Available => "available",
            TruckStatus::InUse => "in_use",
            TruckStatus::Maintenance => "maintenance",
            TruckStatus::OutOfService => "out_of_service",
        }
    }
}

impl FromStr for TruckStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(TruckStatus::Available),
            "in_use" => Ok(TruckStatus::InUse),
            "maintenance" => Ok(TruckStatus::Maintenance),
            "out_of_service" => Ok(TruckStatus::OutOfService),
            other => Err(StatusError::Truck(other.to_string())),
        }
    }
}

impl fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Truck directory record.
#[derive(Debug, Clone, PartialEq)]
pub struct Truck {
    pub id: TruckId,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub mileage: u32,
    pub status: TruckStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Truck {
    /// New available truck; the plate is stored uppercased.
    pub fn new(license_plate: &str, brand: &str, model: &str, year: i32, mileage: u32) -> Self {
        let now = Utc::now();
        Self {
            id: TruckId::new(),
            license_plate: license_plate.trim().to_uppercase(),
            brand: brand.trim().to_string(),
            model: model.trim().to_string(),
            year,
            mileage,
            status: TruckStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a trip side effect to this truck.
    pub fn apply(&mut self, update: &TruckUpdate) {
        self.status = update.status;
        if let Some(mileage) = update.mileage {
            self.mileage = mileage;
        }
        self.updated_at = Utc::now();
    }
}

/// Employment status of a driver profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DriverStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Active => "active",
            DriverStatus::Inactive => "inactive",
            DriverStatus::Suspended => "suspended",
        }
    }
}

impl FromStr for DriverStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(DriverStatus::Active),
            "inactive" => Ok(DriverStatus::Inactive),
            "suspended" => Ok(DriverStatus::Suspended),
            other => Err(StatusError::Driver(other.to_string())),
        }
    }
}

/// Driver profile: license and contact data linked to one driver account.
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub id: DriverId,
    pub account_id: AccountId,
    pub license_number: String,
    pub license_expiry_date: NaiveDate,
    pub phone_number: String,
    pub address: Option<String>,
    pub hire_date: NaiveDate,
    pub status: DriverStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    /// New active driver profile hired today.
    pub fn new(
        account_id: AccountId,
        license_number: &str,
        license_expiry_date: NaiveDate,
        phone_number: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: DriverId::new(),
            account_id,
            license_number: license_number.trim().to_string(),
            license_expiry_date,
            phone_number: phone_number.trim().to_string(),
            address: None,
            hire_date: now.date_naive(),
            status: DriverStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Truck mutation triggered by a trip transition.
///
/// Applied by the trip store in the same unit of work as the trip write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruckUpdate {
    pub truck_id: TruckId,
    pub status: TruckStatus,
    pub mileage: Option<u32>,
}

impl TruckUpdate {
    /// Mark the truck as taken by a new trip.
    pub fn reserve(truck_id: TruckId) -> Self {
        Self {
            truck_id,
            status: TruckStatus::InUse,
            mileage: None,
        }
    }

    /// Free the truck at trip completion and advance its odometer.
    pub fn release(truck_id: TruckId, mileage: u32) -> Self {
        Self {
            truck_id,
            status: TruckStatus::Available,
            mileage: Some(mileage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truck_status_round_trip() {
        for status in [
            TruckStatus::Available,
            TruckStatus::InUse,
            TruckStatus::Maintenance,
            TruckStatus::OutOfService,
        ] {
            assert_eq!(status.as_str().parse::<TruckStatus>(), Ok(status));
        }
        assert!("parked".parse::<TruckStatus>().is_err());
    }

    #[test]
    fn test_truck_apply_updates() {
        let mut truck = Truck::new(" ab-123-cd ", "Volvo", "FH16", 2021, 42_000);
        assert_eq!(truck.license_plate, "AB-123-CD");

        truck.apply(&TruckUpdate::reserve(truck.id));
        assert_eq!(truck.status, TruckStatus::InUse);
        assert_eq!(truck.mileage, 42_000);

        truck.apply(&TruckUpdate::release(truck.id, 50_000));
        assert_eq!(truck.status, TruckStatus::Available);
        assert_eq!(truck.mileage, 50_000);
    }

    #[test]
    fn test_id_parsing_names_the_kind() {
        let err = TruckId::from_string("nope").unwrap_err();
        assert_eq!(err.to_string(), "Invalid truck id: nope");
        assert!(DriverId::from_string(&Uuid::new_v4().to_string()).is_ok());
    }
}
