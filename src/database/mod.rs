pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryDroneStore;
pub use postgres::PgDroneStore;
pub use store::{DroneStore, SharedStore};
