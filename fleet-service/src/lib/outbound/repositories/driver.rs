use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::fleet::errors::FleetError;
use crate::domain::fleet::models::Driver;
use crate::domain::fleet::models::DriverId;
use crate::domain::fleet::ports::DriverRepository;

pub struct PostgresDriverRepository {
    pool: PgPool,
}

impl PostgresDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DriverRow {
    id: Uuid,
    account_id: Uuid,
    license_number: String,
    license_expiry_date: NaiveDate,
    phone_number: String,
    address: Option<String>,
    hire_date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DriverRow> for Driver {
    type Error = FleetError;

    fn try_from(row: DriverRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DriverId(row.id),
            account_id: AccountId(row.account_id),
            license_number: row.license_number,
            license_expiry_date: row.license_expiry_date,
            phone_number: row.phone_number,
            address: row.address,
            hire_date: row.hire_date,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_DRIVER: &str = r#"
    SELECT id, account_id, license_number, license_expiry_date, phone_number,
           address, hire_date, status, created_at, updated_at
    FROM drivers
"#;

#[async_trait]
impl DriverRepository for PostgresDriverRepository {
    async fn create(&self, driver: Driver) -> Result<Driver, FleetError> {
        sqlx::query(
            r#"
            INSERT INTO drivers (id, account_id, license_number, license_expiry_date, phone_number,
                                 address, hire_date, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(driver.id.0)
        .bind(driver.account_id.0)
        .bind(&driver.license_number)
        .bind(driver.license_expiry_date)
        .bind(&driver.phone_number)
        .bind(&driver.address)
        .bind(driver.hire_date)
        .bind(driver.status.as_str())
        .bind(driver.created_at)
        .bind(driver.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("drivers_account_id_key") {
                        return FleetError::DuplicateResource(format!(
                            "Driver profile for account {}",
                            driver.account_id
                        ));
                    }
                    if db_err.constraint() == Some("drivers_license_number_key") {
                        return FleetError::DuplicateResource(format!(
                            "Driver with license number {}",
                            driver.license_number
                        ));
                    }
                }
            }
            FleetError::DatabaseError(e.to_string())
        })?;

        Ok(driver)
    }

    async fn find_by_id(&self, id: &DriverId) -> Result<Option<Driver>, FleetError> {
        sqlx::query_as::<_, DriverRow>(&format!("{} WHERE id = $1", SELECT_DRIVER))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| FleetError::DatabaseError(e.to_string()))?
            .map(Driver::try_from)
            .transpose()
    }

    async fn find_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Driver>, FleetError> {
        sqlx::query_as::<_, DriverRow>(&format!("{} WHERE account_id = $1", SELECT_DRIVER))
            .bind(account_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| FleetError::DatabaseError(e.to_string()))?
            .map(Driver::try_from)
            .transpose()
    }
}
