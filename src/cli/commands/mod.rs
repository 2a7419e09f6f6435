pub mod drones;
