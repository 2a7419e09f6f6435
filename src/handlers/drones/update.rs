// handlers/drones/update.rs - POST ?action=update

use tracing::info;

use crate::database::store::DroneStore;
use crate::middleware::{ApiResponse, ApiResult};

use super::params::DroneParams;

/// Full-row overwrite. An identifier that matches nothing still succeeds.
pub async fn update(store: &dyn DroneStore, params: &DroneParams) -> ApiResult {
    let id_drone = params.drone_id()?;
    let input = params.drone_input()?;
    let rows = store.update(id_drone, &input).await?;

    info!(id_drone, rows, "Updated drone");
    Ok(ApiResponse::message("Drone updated successfully."))
}
