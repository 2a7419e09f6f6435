// handlers/drones/create.rs - POST ?action=create

use tracing::info;

use crate::database::store::DroneStore;
use crate::middleware::{ApiResponse, ApiResult};

use super::params::DroneParams;

pub async fn create(store: &dyn DroneStore, params: &DroneParams) -> ApiResult {
    let input = params.drone_input()?;
    let id_drone = store.create(&input).await?;

    info!(id_drone, name = %input.name, "Created drone");
    Ok(ApiResponse::created(id_drone))
}
