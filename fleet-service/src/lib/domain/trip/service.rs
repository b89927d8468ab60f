use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::SessionIdentity;
use crate::domain::fleet::models::DriverId;
use crate::domain::fleet::models::TruckId;
use crate::domain::fleet::models::TruckUpdate;
use crate::domain::fleet::ports::DriverRepository;
use crate::domain::fleet::ports::TruckRepository;
use crate::domain::trip::errors::TripError;
use crate::domain::trip::models::CreateTripCommand;
use crate::domain::trip::models::Trip;
use crate::domain::trip::models::TripId;
use crate::domain::trip::models::TripNumber;
use crate::domain::trip::models::TripPatch;
use crate::domain::trip::models::UpdateTripStatusCommand;
use crate::domain::trip::ports::TripRepository;
use crate::domain::trip::ports::TripServicePort;

/// Trip lifecycle service.
///
/// Owns trip creation and status changes, and decides which truck update
/// accompanies each write. The trip store applies that update atomically
/// with the trip itself.
pub struct TripService<TR, TK, DR>
where
    TR: TripRepository,
    TK: TruckRepository,
    DR: DriverRepository,
{
    trips: Arc<TR>,
    trucks: Arc<TK>,
    drivers: Arc<DR>,
    enforce_transitions: bool,
}

impl<TR, TK, DR> TripService<TR, TK, DR>
where
    TR: TripRepository,
    TK: TruckRepository,
    DR: DriverRepository,
{
    /// Create a new trip service with injected dependencies.
    ///
    /// Status transitions are unchecked until
    /// [`with_transition_enforcement`](Self::with_transition_enforcement)
    /// turns the table on.
    pub fn new(trips: Arc<TR>, trucks: Arc<TK>, drivers: Arc<DR>) -> Self {
        Self {
            trips,
            trucks,
            drivers,
            enforce_transitions: false,
        }
    }

    pub fn with_transition_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_transitions = enforce;
        self
    }

    async fn ensure_truck(&self, truck_id: &TruckId) -> Result<(), TripError> {
        match self.trucks.find_by_id(truck_id).await? {
            Some(_) => Ok(()),
            None => Err(TripError::TruckNotFound(truck_id.to_string())),
        }
    }

    async fn ensure_driver(&self, driver_id: &DriverId) -> Result<(), TripError> {
        match self.drivers.find_by_id(driver_id).await? {
            Some(_) => Ok(()),
            None => Err(TripError::DriverNotFound(driver_id.to_string())),
        }
    }

    async fn find_trip(&self, id: &TripId) -> Result<Trip, TripError> {
        self.trips
            .find_by_id(id)
            .await?
            .ok_or_else(|| TripError::TripNotFound(id.to_string()))
    }

    /// Shared write path for the admin update and the status endpoint.
    async fn apply_patch(&self, current: Trip, patch: TripPatch) -> Result<Trip, TripError> {
        if let Some(truck_id) = patch.truck_id.filter(|id| *id != current.truck_id) {
            self.ensure_truck(&truck_id).await?;
        }
        if let Some(driver_id) = patch.driver_id.filter(|id| *id != current.driver_id) {
            self.ensure_driver(&driver_id).await?;
        }

        if let Some(next) = patch.status {
            if !current.status.can_transition_to(next) {
                if self.enforce_transitions {
                    return Err(TripError::InvalidTransition {
                        from: current.status,
                        to: next,
                    });
                }
                tracing::warn!(
                    trip_id = %current.id,
                    from = %current.status,
                    to = %next,
                    "Trip status moved outside the transition table"
                );
            }
        }

        let completion_mileage = patch.completion_mileage();
        let previous_status = current.status;

        let mut updated = current;
        patch.apply_to(&mut updated);
        updated.validate()?;

        let truck_update =
            completion_mileage.map(|mileage| TruckUpdate::release(updated.truck_id, mileage));

        let saved = self.trips.update(updated, truck_update).await?;

        if previous_status != saved.status {
            tracing::info!(
                trip_id = %saved.id,
                trip_number = %saved.trip_number,
                from = %previous_status,
                to = %saved.status,
                "Trip status changed"
            );
        }
        if let Some(update) = truck_update {
            tracing::info!(
                truck_id = %update.truck_id,
                mileage = update.mileage,
                "Truck released after trip completion"
            );
        }

        Ok(saved)
    }
}

#[async_trait]
impl<TR, TK, DR> TripServicePort for TripService<TR, TK, DR>
where
    TR: TripRepository,
    TK: TruckRepository,
    DR: DriverRepository,
{
    async fn create_trip(&self, command: CreateTripCommand) -> Result<Trip, TripError> {
        command.validate()?;

        self.ensure_truck(&command.truck_id).await?;
        self.ensure_driver(&command.driver_id).await?;

        let sequence = self.trips.count().await? + 1;
        let trip = Trip::new(command, TripNumber::from_sequence(sequence));
        let reservation = TruckUpdate::reserve(trip.truck_id);

        let created = self.trips.create(trip, reservation).await?;

        tracing::info!(
            trip_id = %created.id,
            trip_number = %created.trip_number,
            truck_id = %created.truck_id,
            driver_id = %created.driver_id,
            status = %created.status,
            "Trip created, truck reserved"
        );

        Ok(created)
    }

    async fn get_trip(&self, id: &TripId) -> Result<Trip, TripError> {
        self.find_trip(id).await
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, TripError> {
        self.trips.list_all().await
    }

    async fn list_trips_for_account(&self, account_id: &AccountId) -> Result<Vec<Trip>, TripError> {
        let driver = self
            .drivers
            .find_by_account_id(account_id)
            .await?
            .ok_or_else(|| TripError::DriverProfileNotFound(account_id.to_string()))?;

        self.trips.list_by_driver(&driver.id).await
    }

    async fn update_trip(&self, id: &TripId, patch: TripPatch) -> Result<Trip, TripError> {
        let current = self.find_trip(id).await?;
        self.apply_patch(current, patch).await
    }

    async fn update_trip_status(
        &self,
        id: &TripId,
        command: UpdateTripStatusCommand,
        caller: &SessionIdentity,
    ) -> Result<Trip, TripError> {
        let current = self.find_trip(id).await?;

        if !caller.is_admin() {
            let owns_trip = self
                .drivers
                .find_by_account_id(&caller.account_id)
                .await?
                .map_or(false, |driver| driver.id == current.driver_id);

            if !owns_trip {
                tracing::warn!(
                    trip_id = %current.id,
                    account_id = %caller.account_id,
                    "Status update rejected: caller does not own the trip"
                );
                return Err(TripError::NotTripOwner);
            }
        }

        let patch = command.into_patch(&current, Utc::now());
        self.apply_patch(current, patch).await
    }
}
