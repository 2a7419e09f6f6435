//! Page-side session gate.
//!
//! Reads the user object the login page cached in local storage and uses it
//! to redirect anonymous or unauthorized visitors and to hide elements
//! marked with `data-role-visible`. The cached object is trusted on read;
//! nothing here verifies it, and the catalog API does not check it either.

pub mod gate;
pub mod memory;
pub mod user;
pub mod visibility;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use gate::{AllowedRoles, GateOptions, Navigator, SessionGate, SessionStorage};
pub use memory::{MemoryDocument, MemoryStorage, RecordingNavigator};
pub use user::{SessionUser, DEFAULT_ROLE, SESSION_USER_KEY};
pub use visibility::{apply_role_visibility, role_allowed, PageDocument, ROLE_VISIBLE_ATTRIBUTE};
