// handlers/drones/list.rs - GET ?action=list

use tracing::debug;

use crate::database::store::DroneStore;
use crate::middleware::{ApiResponse, ApiResult};

use super::params::DroneParams;

/// Matching drones newest first, plus every distinct type for the filter
/// control. Unpaginated.
pub async fn list(store: &dyn DroneStore, params: &DroneParams) -> ApiResult {
    let filter = params.filter();
    let drones = store.list(&filter).await?;
    let types = store.types().await?;

    debug!(
        search = ?filter.search,
        drone_type = ?filter.drone_type,
        count = drones.len(),
        "Listed drones"
    );
    Ok(ApiResponse::listing(drones, types))
}
