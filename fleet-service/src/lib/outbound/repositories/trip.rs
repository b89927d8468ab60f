use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgConnection;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::fleet::models::DriverId;
use crate::domain::fleet::models::TrailerId;
use crate::domain::fleet::models::TruckId;
use crate::domain::fleet::models::TruckUpdate;
use crate::domain::trip::errors::TripError;
use crate::domain::trip::models::Trip;
use crate::domain::trip::models::TripId;
use crate::domain::trip::models::TripNumber;
use crate::domain::trip::ports::TripRepository;

/// Trip store. Every write runs in a transaction that also applies the
/// accompanying truck update.
pub struct PostgresTripRepository {
    pool: PgPool,
}

impl PostgresTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TripRow {
    id: Uuid,
    trip_number: String,
    driver_id: Uuid,
    truck_id: Uuid,
    trailer_id: Option<Uuid>,
    origin: String,
    destination: String,
    departure_date: DateTime<Utc>,
    arrival_date: Option<DateTime<Utc>>,
    status: String,
    mileage_start: i64,
    mileage_end: Option<i64>,
    fuel_consumption: Option<f64>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn stored_mileage(value: i64) -> Result<u32, TripError> {
    u32::try_from(value)
        .map_err(|_| TripError::DatabaseError(format!("trip mileage out of range: {}", value)))
}

impl TryFrom<TripRow> for Trip {
    type Error = TripError;

    fn try_from(row: TripRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TripId(row.id),
            trip_number: TripNumber::from_stored(row.trip_number),
            driver_id: DriverId(row.driver_id),
            truck_id: TruckId(row.truck_id),
            trailer_id: row.trailer_id.map(TrailerId),
            origin: row.origin,
            destination: row.destination,
            departure_date: row.departure_date,
            arrival_date: row.arrival_date,
            status: row
                .status
                .parse()
                .map_err(|e| TripError::DatabaseError(format!("stored trip: {}", e)))?,
            mileage_start: stored_mileage(row.mileage_start)?,
            mileage_end: row.mileage_end.map(stored_mileage).transpose()?,
            fuel_consumption: row.fuel_consumption,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_TRIP: &str = r#"
    SELECT id, trip_number, driver_id, truck_id, trailer_id, origin, destination,
           departure_date, arrival_date, status, mileage_start, mileage_end,
           fuel_consumption, notes, created_at, updated_at
    FROM trips
"#;

fn database_error(e: sqlx::Error) -> TripError {
    TripError::DatabaseError(e.to_string())
}

async fn apply_truck_update(
    conn: &mut PgConnection,
    update: &TruckUpdate,
) -> Result<(), TripError> {
    let result = sqlx::query(
        r#"
        UPDATE trucks
        SET status = $2, mileage = COALESCE($3, mileage), updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(update.truck_id.0)
    .bind(update.status.as_str())
    .bind(update.mileage.map(i64::from))
    .execute(conn)
    .await
    .map_err(database_error)?;

    if result.rows_affected() == 0 {
        return Err(TripError::TruckNotFound(update.truck_id.to_string()));
    }

    Ok(())
}

#[async_trait]
impl TripRepository for PostgresTripRepository {
    async fn count(&self) -> Result<u64, TripError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trips")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(count.max(0) as u64)
    }

    async fn create(&self, trip: Trip, truck_update: TruckUpdate) -> Result<Trip, TripError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO trips (id, trip_number, driver_id, truck_id, trailer_id, origin, destination,
                               departure_date, arrival_date, status, mileage_start, mileage_end,
                               fuel_consumption, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(trip.id.0)
        .bind(trip.trip_number.as_str())
        .bind(trip.driver_id.0)
        .bind(trip.truck_id.0)
        .bind(trip.trailer_id.map(|id| id.0))
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(trip.departure_date)
        .bind(trip.arrival_date)
        .bind(trip.status.as_str())
        .bind(i64::from(trip.mileage_start))
        .bind(trip.mileage_end.map(i64::from))
        .bind(trip.fuel_consumption)
        .bind(&trip.notes)
        .bind(trip.created_at)
        .bind(trip.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("trips_trip_number_key")
                {
                    return TripError::DuplicateTripNumber(trip.trip_number.to_string());
                }
            }
            database_error(e)
        })?;

        apply_truck_update(&mut tx, &truck_update).await?;

        tx.commit().await.map_err(database_error)?;

        Ok(trip)
    }

    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, TripError> {
        sqlx::query_as::<_, TripRow>(&format!("{} WHERE id = $1", SELECT_TRIP))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Trip::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Trip>, TripError> {
        sqlx::query_as::<_, TripRow>(&format!("{} ORDER BY created_at DESC", SELECT_TRIP))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Trip::try_from)
            .collect()
    }

    async fn list_by_driver(&self, driver_id: &DriverId) -> Result<Vec<Trip>, TripError> {
        sqlx::query_as::<_, TripRow>(&format!(
            "{} WHERE driver_id = $1 ORDER BY created_at DESC",
            SELECT_TRIP
        ))
        .bind(driver_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?
        .into_iter()
        .map(Trip::try_from)
        .collect()
    }

    async fn update(
        &self,
        trip: Trip,
        truck_update: Option<TruckUpdate>,
    ) -> Result<Trip, TripError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let result = sqlx::query(
            r#"
            UPDATE trips
            SET driver_id = $2, truck_id = $3, trailer_id = $4, origin = $5, destination = $6,
                departure_date = $7, arrival_date = $8, status = $9, mileage_start = $10,
                mileage_end = $11, fuel_consumption = $12, notes = $13, updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(trip.id.0)
        .bind(trip.driver_id.0)
        .bind(trip.truck_id.0)
        .bind(trip.trailer_id.map(|id| id.0))
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(trip.departure_date)
        .bind(trip.arrival_date)
        .bind(trip.status.as_str())
        .bind(i64::from(trip.mileage_start))
        .bind(trip.mileage_end.map(i64::from))
        .bind(trip.fuel_consumption)
        .bind(&trip.notes)
        .bind(trip.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TripError::TripNotFound(trip.id.to_string()));
        }

        if let Some(update) = truck_update {
            apply_truck_update(&mut tx, &update).await?;
        }

        tx.commit().await.map_err(database_error)?;

        Ok(trip)
    }
}
