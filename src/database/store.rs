use std::sync::Arc;

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Drone, DroneFilter, DroneInput};

/// Persistence seam for the drones catalog. Each method issues exactly one
/// statement against the backing store.
#[async_trait]
pub trait DroneStore: Send + Sync {
    /// Drones matching `filter`, newest identifier first.
    async fn list(&self, filter: &DroneFilter) -> Result<Vec<Drone>, DatabaseError>;

    /// Distinct type values across the whole table, ascending.
    async fn types(&self) -> Result<Vec<String>, DatabaseError>;

    /// Insert a drone and return its assigned identifier.
    async fn create(&self, input: &DroneInput) -> Result<i64, DatabaseError>;

    /// Overwrite every mutable column of `id_drone`. Returns rows affected.
    async fn update(&self, id_drone: i64, input: &DroneInput) -> Result<u64, DatabaseError>;

    /// Remove `id_drone`. Returns rows affected.
    async fn delete(&self, id_drone: i64) -> Result<u64, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

pub type SharedStore = Arc<dyn DroneStore>;
