//! # Airlock
//!
//! Password login gate for shared game worlds.
//!
//! A freshly connected player is snapshotted and confined at the spawn
//! anchor in spectator mode, with commands and world interaction blocked,
//! until they prove ownership of their identity with `/login` (or register
//! with `/setpassword`). On success the snapshot is restored exactly:
//! position, facing, game mode, and any elevated privilege that was
//! temporarily revoked. Disconnecting mid-hold restores best-effort and
//! never leaks privilege.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use airlock::{Airlock, AirlockConfig, spawn_enforcer};
//!
//! // Implement Players and WorldView for your host, then:
//! // let gate = Arc::new(Airlock::new(AirlockConfig::default(), players, world));
//! // spawn_enforcer(gate.clone(), Duration::from_millis(50));
//! //
//! // Forward host events:
//! //   join     -> gate.on_join(id, mode, position, elevated)
//! //   leave    -> gate.on_disconnect(id)
//! //   command  -> gate.allow_command(id, line) / gate.dispatch(id, cmd)
//! //   interact -> gate.allow_interaction(id)
//! ```

mod commands;
mod config;
mod driver;
mod error;
mod service;

pub use commands::AuthCommand;
pub use config::AirlockConfig;
pub use driver::spawn_enforcer;
pub use error::AirlockError;
pub use service::Airlock;

// Re-export the sub-crate surface so embedders depend on one crate.
pub use airlock_core::{GameMode, PlayerUuid, SpawnAnchor, Vec3, notice};
pub use airlock_session::{
    ActionGate, BOOTSTRAP_VERBS, Confinement, HOLD_MODE, Hold, HoldManager, PlayerOffline,
    Players, WorldView,
};
pub use airlock_store::{CredentialStore, PasswordHasher, Sha256Hasher, StoreError};
