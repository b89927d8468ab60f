use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::SessionIdentity;
use crate::domain::fleet::models::DriverId;
use crate::domain::fleet::models::TruckUpdate;
use crate::domain::trip::errors::TripError;
use crate::domain::trip::models::CreateTripCommand;
use crate::domain::trip::models::Trip;
use crate::domain::trip::models::TripId;
use crate::domain::trip::models::TripPatch;
use crate::domain::trip::models::UpdateTripStatusCommand;

/// Port for trip lifecycle operations.
#[async_trait]
pub trait TripServicePort: Send + Sync + 'static {
    /// Create a trip and reserve its truck.
    ///
    /// # Arguments
    /// * `command` - Trip fields; status defaults to pending
    ///
    /// # Returns
    /// Created trip with its generated trip number
    ///
    /// # Errors
    /// * `Validation` - Field invariants violated
    /// * `TruckNotFound` / `DriverNotFound` - Reference does not resolve
    /// * `DuplicateTripNumber` - Concurrent creation took the same number
    /// * `DatabaseError` - Store operation failed
    async fn create_trip(&self, command: CreateTripCommand) -> Result<Trip, TripError>;

    /// Retrieve a trip by identifier.
    ///
    /// # Errors
    /// * `TripNotFound` - Trip does not exist
    async fn get_trip(&self, id: &TripId) -> Result<Trip, TripError>;

    /// Every trip, newest first.
    async fn list_trips(&self) -> Result<Vec<Trip>, TripError>;

    /// Trips assigned to the driver profile of an account, newest first.
    ///
    /// # Errors
    /// * `DriverProfileNotFound` - Account has no driver profile
    async fn list_trips_for_account(&self, account_id: &AccountId) -> Result<Vec<Trip>, TripError>;

    /// Apply a partial update to a trip.
    ///
    /// Completing the trip with an ending mileage in the same patch frees
    /// the truck and advances its odometer.
    ///
    /// # Errors
    /// * `TripNotFound` - Trip does not exist
    /// * `TruckNotFound` / `DriverNotFound` - Changed reference does not resolve
    /// * `Validation` - Resulting trip violates field invariants
    /// * `InvalidTransition` - Off-table status change while enforcement is on
    async fn update_trip(&self, id: &TripId, patch: TripPatch) -> Result<Trip, TripError>;

    /// Change a trip's status on behalf of a caller.
    ///
    /// # Arguments
    /// * `id` - Trip to update
    /// * `command` - New status plus optional closing readings
    /// * `caller` - Identity from the session token
    ///
    /// # Errors
    /// * `NotTripOwner` - Caller is a driver and the trip is not theirs
    /// * Any error of [`TripServicePort::update_trip`]
    async fn update_trip_status(
        &self,
        id: &TripId,
        command: UpdateTripStatusCommand,
        caller: &SessionIdentity,
    ) -> Result<Trip, TripError>;
}

/// Trip store operations.
///
/// Writes that carry a [`TruckUpdate`] apply it in the same unit of work as
/// the trip write: either both land or neither does.
#[async_trait]
pub trait TripRepository: Send + Sync + 'static {
    /// Total number of trips ever stored.
    async fn count(&self) -> Result<u64, TripError>;

    /// Insert a trip and apply the truck reservation.
    ///
    /// # Errors
    /// * `DuplicateTripNumber` - Trip number already taken
    /// * `TruckNotFound` - Truck vanished before the write
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, trip: Trip, truck_update: TruckUpdate) -> Result<Trip, TripError>;

    /// Retrieve trip by identifier.
    ///
    /// # Returns
    /// Optional trip (None if not found)
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, TripError>;

    async fn list_all(&self) -> Result<Vec<Trip>, TripError>;

    async fn list_by_driver(&self, driver_id: &DriverId) -> Result<Vec<Trip>, TripError>;

    /// Replace a stored trip, applying the truck update if one is given.
    ///
    /// # Errors
    /// * `TripNotFound` - Trip does not exist
    /// * `TruckNotFound` - Truck vanished before the write
    /// * `DatabaseError` - Store operation failed
    async fn update(
        &self,
        trip: Trip,
        truck_update: Option<TruckUpdate>,
    ) -> Result<Trip, TripError>;
}
