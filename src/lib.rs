//! Skysail drones catalog: the admin CRUD endpoint (native builds) and the
//! browser session gate (every target).

pub mod session;

#[cfg(not(target_arch = "wasm32"))]
pub mod app;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod database;
#[cfg(not(target_arch = "wasm32"))]
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod handlers;
#[cfg(not(target_arch = "wasm32"))]
pub mod middleware;

#[cfg(test)]
pub mod testing;

#[cfg(not(target_arch = "wasm32"))]
pub use app::{app, AppState};
