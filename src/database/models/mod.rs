pub mod drone;

pub use drone::{Drone, DroneFilter, DroneInput};
