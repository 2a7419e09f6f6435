use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Drone, DroneFilter, DroneInput};
use crate::database::store::DroneStore;

/// In-memory `DroneStore` for tests and local runs without a database.
#[derive(Debug, Default)]
pub struct MemoryDroneStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    drones: BTreeMap<i64, Drone>,
}

impl MemoryDroneStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A panic while holding the lock cannot leave a half-written row.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DroneStore for MemoryDroneStore {
    async fn list(&self, filter: &DroneFilter) -> Result<Vec<Drone>, DatabaseError> {
        let state = self.state();
        Ok(state
            .drones
            .values()
            .rev()
            .filter(|drone| filter.matches(drone))
            .cloned()
            .collect())
    }

    async fn types(&self) -> Result<Vec<String>, DatabaseError> {
        let state = self.state();
        let types: BTreeSet<&str> = state.drones.values().map(|d| d.drone_type.as_str()).collect();
        Ok(types.into_iter().map(str::to_string).collect())
    }

    async fn create(&self, input: &DroneInput) -> Result<i64, DatabaseError> {
        let mut state = self.state();
        state.last_id += 1;
        let id = state.last_id;
        state.drones.insert(id, Drone::from_input(id, input.clone()));
        Ok(id)
    }

    async fn update(&self, id_drone: i64, input: &DroneInput) -> Result<u64, DatabaseError> {
        let mut state = self.state();
        match state.drones.get_mut(&id_drone) {
            Some(row) => {
                *row = Drone::from_input(id_drone, input.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id_drone: i64) -> Result<u64, DatabaseError> {
        let mut state = self.state();
        Ok(state.drones.remove(&id_drone).map_or(0, |_| 1))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
