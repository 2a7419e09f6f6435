use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::{Drone, DroneFilter, DroneInput};
use crate::database::store::DroneStore;

const SELECT_DRONES: &str = r#"
    SELECT id_drone, name, "type", image, description, price, brand, stock
    FROM drones
    WHERE ($1::text IS NULL OR name ILIKE $1 OR brand ILIKE $1 OR "type" ILIKE $1)
      AND ($2::text IS NULL OR "type" = $2)
    ORDER BY id_drone DESC
"#;

const SELECT_TYPES: &str = r#"SELECT DISTINCT "type" FROM drones ORDER BY "type" ASC"#;

const INSERT_DRONE: &str = r#"
    INSERT INTO drones (name, "type", image, description, price, brand, stock)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    RETURNING id_drone
"#;

const UPDATE_DRONE: &str = r#"
    UPDATE drones
    SET name = $1,
        "type" = $2,
        image = $3,
        description = $4,
        price = $5,
        brand = $6,
        stock = $7
    WHERE id_drone = $8
"#;

const DELETE_DRONE: &str = "DELETE FROM drones WHERE id_drone = $1";

/// `DroneStore` over the shared `drones` table in Postgres.
#[derive(Clone)]
pub struct PgDroneStore {
    pool: PgPool,
}

impl PgDroneStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool that opens connections on first use.
    pub fn connect_lazy(url: &str, config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = PgConnectOptions::from_str(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy_with(options);
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DroneStore for PgDroneStore {
    async fn list(&self, filter: &DroneFilter) -> Result<Vec<Drone>, DatabaseError> {
        let drones = sqlx::query_as::<_, Drone>(SELECT_DRONES)
            .bind(filter.like_pattern())
            .bind(filter.drone_type.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(drones)
    }

    async fn types(&self) -> Result<Vec<String>, DatabaseError> {
        let types = sqlx::query_scalar::<_, String>(SELECT_TYPES)
            .fetch_all(&self.pool)
            .await?;
        Ok(types)
    }

    async fn create(&self, input: &DroneInput) -> Result<i64, DatabaseError> {
        let id = sqlx::query_scalar::<_, i64>(INSERT_DRONE)
            .bind(&input.name)
            .bind(&input.drone_type)
            .bind(&input.image)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.brand)
            .bind(input.stock)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, id_drone: i64, input: &DroneInput) -> Result<u64, DatabaseError> {
        let result = sqlx::query(UPDATE_DRONE)
            .bind(&input.name)
            .bind(&input.drone_type)
            .bind(&input.image)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.brand)
            .bind(input.stock)
            .bind(id_drone)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id_drone: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query(DELETE_DRONE)
            .bind(id_drone)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
