//! In-memory storage backend.
//!
//! Implements every repository port over hash maps behind one lock, so a
//! trip write and its truck update land together. Data is lost on restart.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountRepository;
use crate::domain::fleet::errors::FleetError;
use crate::domain::fleet::models::Driver;
use crate::domain::fleet::models::DriverId;
use crate::domain::fleet::models::Truck;
use crate::domain::fleet::models::TruckId;
use crate::domain::fleet::models::TruckUpdate;
use crate::domain::fleet::ports::DriverRepository;
use crate::domain::fleet::ports::TruckRepository;
use crate::domain::trip::errors::TripError;
use crate::domain::trip::models::Trip;
use crate::domain::trip::models::TripId;
use crate::domain::trip::ports::TripRepository;

const POISONED: &str = "memory store lock poisoned";

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<AccountId, Account>,
    trucks: HashMap<TruckId, Truck>,
    drivers: HashMap<DriverId, Driver>,
    trips: HashMap<TripId, Trip>,
}

impl Tables {
    fn apply_truck_update(&mut self, update: &TruckUpdate) -> Result<(), TripError> {
        let truck = self
            .trucks
            .get_mut(&update.truck_id)
            .ok_or_else(|| TripError::TruckNotFound(update.truck_id.to_string()))?;
        truck.apply(update);
        Ok(())
    }
}

/// In-memory store backing all four repository ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, String> {
        self.tables.read().map_err(|_| POISONED.to_string())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, String> {
        self.tables.write().map_err(|_| POISONED.to_string())
    }
}

fn newest_first(mut trips: Vec<Trip>) -> Vec<Trip> {
    trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    trips
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut tables = self.write().map_err(AccountError::DatabaseError)?;

        if tables
            .accounts
            .values()
            .any(|existing| existing.email == account.email)
        {
            return Err(AccountError::DuplicateAccount(account.email.to_string()));
        }

        tables.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let tables = self.read().map_err(AccountError::DatabaseError)?;
        Ok(tables.accounts.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let tables = self.read().map_err(AccountError::DatabaseError)?;
        Ok(tables
            .accounts
            .values()
            .find(|account| account.email.as_str() == email)
            .cloned())
    }
}

#[async_trait]
impl TruckRepository for MemoryStore {
    async fn create(&self, truck: Truck) -> Result<Truck, FleetError> {
        let mut tables = self.write().map_err(FleetError::DatabaseError)?;

        if tables
            .trucks
            .values()
            .any(|existing| existing.license_plate == truck.license_plate)
        {
            return Err(FleetError::DuplicateResource(format!(
                "Truck with license plate {}",
                truck.license_plate
            )));
        }

        tables.trucks.insert(truck.id, truck.clone());
        Ok(truck)
    }

    async fn find_by_id(&self, id: &TruckId) -> Result<Option<Truck>, FleetError> {
        let tables = self.read().map_err(FleetError::DatabaseError)?;
        Ok(tables.trucks.get(id).cloned())
    }
}

#[async_trait]
impl DriverRepository for MemoryStore {
    async fn create(&self, driver: Driver) -> Result<Driver, FleetError> {
        let mut tables = self.write().map_err(FleetError::DatabaseError)?;

        if tables
            .drivers
            .values()
            .any(|existing| existing.account_id == driver.account_id)
        {
            return Err(FleetError::DuplicateResource(format!(
                "Driver profile for account {}",
                driver.account_id
            )));
        }
        if tables
            .drivers
            .values()
            .any(|existing| existing.license_number == driver.license_number)
        {
            return Err(FleetError::DuplicateResource(format!(
                "Driver with license number {}",
                driver.license_number
            )));
        }

        tables.drivers.insert(driver.id, driver.clone());
        Ok(driver)
    }

    async fn find_by_id(&self, id: &DriverId) -> Result<Option<Driver>, FleetError> {
        let tables = self.read().map_err(FleetError::DatabaseError)?;
        Ok(tables.drivers.get(id).cloned())
    }

    async fn find_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Driver>, FleetError> {
        let tables = self.read().map_err(FleetError::DatabaseError)?;
        Ok(tables
            .drivers
            .values()
            .find(|driver| driver.account_id == *account_id)
            .cloned())
    }
}

#[async_trait]
impl TripRepository for MemoryStore {
    async fn count(&self) -> Result<u64, TripError> {
        let tables = self.read().map_err(TripError::DatabaseError)?;
        Ok(tables.trips.len() as u64)
    }

    async fn create(&self, trip: Trip, truck_update: TruckUpdate) -> Result<Trip, TripError> {
        let mut tables = self.write().map_err(TripError::DatabaseError)?;

        if tables
            .trips
            .values()
            .any(|existing| existing.trip_number == trip.trip_number)
        {
            return Err(TripError::DuplicateTripNumber(trip.trip_number.to_string()));
        }

        tables.apply_truck_update(&truck_update)?;
        tables.trips.insert(trip.id, trip.clone());
        Ok(trip)
    }

    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, TripError> {
        let tables = self.read().map_err(TripError::DatabaseError)?;
        Ok(tables.trips.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Trip>, TripError> {
        let tables = self.read().map_err(TripError::DatabaseError)?;
        Ok(newest_first(tables.trips.values().cloned().collect()))
    }

    async fn list_by_driver(&self, driver_id: &DriverId) -> Result<Vec<Trip>, TripError> {
        let tables = self.read().map_err(TripError::DatabaseError)?;
        Ok(newest_first(
            tables
                .trips
                .values()
                .filter(|trip| trip.driver_id == *driver_id)
                .cloned()
                .collect(),
        ))
    }

    async fn update(
        &self,
        trip: Trip,
        truck_update: Option<TruckUpdate>,
    ) -> Result<Trip, TripError> {
        let mut tables = self.write().map_err(TripError::DatabaseError)?;

        if !tables.trips.contains_key(&trip.id) {
            return Err(TripError::TripNotFound(trip.id.to_string()));
        }
        if let Some(update) = truck_update {
            tables.apply_truck_update(&update)?;
        }

        tables.trips.insert(trip.id, trip.clone());
        Ok(trip)
    }
}
