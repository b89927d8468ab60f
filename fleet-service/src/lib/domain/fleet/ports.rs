use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::fleet::errors::FleetError;
use crate::domain::fleet::models::Driver;
use crate::domain::fleet::models::DriverId;
use crate::domain::fleet::models::Truck;
use crate::domain::fleet::models::TruckId;

/// Truck directory lookups.
///
/// Truck status and mileage are written only through the trip store, so
/// this port has no update operation.
#[async_trait]
pub trait TruckRepository: Send + Sync + 'static {
    /// Persist a new truck.
    ///
    /// # Errors
    /// * `DuplicateResource` - License plate already registered
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, truck: Truck) -> Result<Truck, FleetError>;

    /// Retrieve truck by identifier.
    ///
    /// # Returns
    /// Optional truck (None if not found)
    async fn find_by_id(&self, id: &TruckId) -> Result<Option<Truck>, FleetError>;
}

/// Driver profile lookups.
#[async_trait]
pub trait DriverRepository: Send + Sync + 'static {
    /// Persist a new driver profile.
    ///
    /// # Errors
    /// * `DuplicateResource` - Account already has a profile, or license number taken
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, driver: Driver) -> Result<Driver, FleetError>;

    /// Retrieve driver profile by identifier.
    async fn find_by_id(&self, id: &DriverId) -> Result<Option<Driver>, FleetError>;

    /// Retrieve the driver profile linked to an account.
    async fn find_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Driver>, FleetError>;
}
