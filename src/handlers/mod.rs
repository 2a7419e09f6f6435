// handlers/mod.rs - Catalog endpoint handlers
//
// The drones endpoint is a single route; `drones::dispatch` maps each
// (method, action) pair onto one handler module.
pub mod drones;

pub use drones::dispatch as drones_dispatch;
