// handlers/drones/delete.rs - POST ?action=delete

use tracing::info;

use crate::database::store::DroneStore;
use crate::middleware::{ApiResponse, ApiResult};

use super::params::DroneParams;

pub async fn delete(store: &dyn DroneStore, params: &DroneParams) -> ApiResult {
    let id_drone = params.drone_id()?;
    let rows = store.delete(id_drone).await?;

    info!(id_drone, rows, "Deleted drone");
    Ok(ApiResponse::message("Drone deleted successfully."))
}
