//! Authentication hold state machine.
//!
//! A freshly connected identity is *held*: its pre-join state is
//! snapshotted into a [`Hold`], the caller confines it at a safe anchor in
//! spectator mode, and [`ActionGate`] rejects everything except the
//! commands needed to log in. A periodic [`HoldManager::enforce`] sweep
//! pins held identities in place until [`HoldManager::complete`] (login
//! succeeded) or [`HoldManager::abort_on_disconnect`] (connection lost)
//! consumes the record and restores the snapshot.
//!
//! The crate is deliberately host-agnostic: all contact with the game
//! server goes through the [`Players`] and [`WorldView`] traits.

mod gate;
mod hold;
mod manager;
#[cfg(test)]
pub(crate) mod testutil;
mod world;

pub use gate::{ActionGate, BOOTSTRAP_VERBS};
pub use hold::{Confinement, HOLD_MODE, Hold};
pub use manager::HoldManager;
pub use world::{PlayerOffline, Players, WorldView};
