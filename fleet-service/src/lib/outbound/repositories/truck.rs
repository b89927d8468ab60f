use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::fleet::errors::FleetError;
use crate::domain::fleet::models::Truck;
use crate::domain::fleet::models::TruckId;
use crate::domain::fleet::ports::TruckRepository;

pub struct PostgresTruckRepository {
    pool: PgPool,
}

impl PostgresTruckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TruckRow {
    id: Uuid,
    license_plate: String,
    brand: String,
    model: String,
    year: i32,
    mileage: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TruckRow> for Truck {
    type Error = FleetError;

    fn try_from(row: TruckRow) -> Result<Self, Self::Error> {
        let mileage = u32::try_from(row.mileage).map_err(|_| {
            FleetError::DatabaseError(format!("truck mileage out of range: {}", row.mileage))
        })?;

        Ok(Self {
            id: TruckId(row.id),
            license_plate: row.license_plate,
            brand: row.brand,
            model: row.model,
            year: row.year,
            mileage,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TruckRepository for PostgresTruckRepository {
    async fn create(&self, truck: Truck) -> Result<Truck, FleetError> {
        sqlx::query(
            r#"
            INSERT INTO trucks (id, license_plate, brand, model, year, mileage, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(truck.id.0)
        .bind(&truck.license_plate)
        .bind(&truck.brand)
        .bind(&truck.model)
        .bind(truck.year)
        .bind(i64::from(truck.mileage))
        .bind(truck.status.as_str())
        .bind(truck.created_at)
        .bind(truck.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return FleetError::DuplicateResource(format!(
                        "Truck with license plate {}",
                        truck.license_plate
                    ));
                }
            }
            FleetError::DatabaseError(e.to_string())
        })?;

        Ok(truck)
    }

    async fn find_by_id(&self, id: &TruckId) -> Result<Option<Truck>, FleetError> {
        sqlx::query_as::<_, TruckRow>(
            r#"
            SELECT id, license_plate, brand, model, year, mileage, status, created_at, updated_at
            FROM trucks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FleetError::DatabaseError(e.to_string()))?
        .map(Truck::try_from)
        .transpose()
    }
}
