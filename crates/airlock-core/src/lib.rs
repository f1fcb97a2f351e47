//! Shared types for the Airlock login gate.
//!
//! This crate is the bottom of the stack: identity, geometry, and
//! interaction-mode types used by every other Airlock crate, plus the
//! catalog of user-facing message copy.
//!
//! ```text
//! airlock (orchestration, commands)
//!     ↕
//! airlock-session / airlock-store
//!     ↕
//! airlock-core (this crate)
//! ```

pub mod notice;
mod types;

pub use types::{GameMode, PlayerUuid, SpawnAnchor, Vec3};
