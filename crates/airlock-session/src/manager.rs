//! Hold lifecycle: begin, enforce, restore, abort.
//!
//! [`HoldManager`] owns the one map of pending authentications. Every
//! question about an identity's auth state is answered from that map, and
//! every transition happens by inserting or removing its [`Hold`] record,
//! so confinement and restoration can never disagree about who is held.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use airlock_core::{GameMode, PlayerUuid, Vec3};

use crate::hold::{Confinement, HOLD_MODE, Hold};
use crate::world::{Players, WorldView};

/// Offset from a block corner to its center on the horizontal axes.
const CENTER_OFFSET: f64 = 0.5;

/// Vertical clearance above the top solid block at the anchor column.
const CLEARANCE: f64 = 1.0;

/// Hold height used when the anchor column's terrain cannot be queried.
const FALLBACK_Y: f64 = 65.0;

/// Tracks which identities are waiting at the gate and restores them when
/// they pass it (or leave).
pub struct HoldManager {
    holds: RwLock<HashMap<PlayerUuid, Hold>>,
    players: Arc<dyn Players>,
    world: Arc<dyn WorldView>,
}

impl HoldManager {
    pub fn new(players: Arc<dyn Players>, world: Arc<dyn WorldView>) -> Self {
        Self {
            holds: RwLock::new(HashMap::new()),
            players,
            world,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Whether `id` is currently pending authentication.
    pub fn is_held(&self, id: PlayerUuid) -> bool {
        self.read_holds().contains_key(&id)
    }

    /// Snapshot of the hold record for `id`, if one exists.
    pub fn get(&self, id: PlayerUuid) -> Option<Hold> {
        self.read_holds().get(&id).copied()
    }

    /// Identities currently pending authentication.
    pub fn held_ids(&self) -> Vec<PlayerUuid> {
        self.read_holds().keys().copied().collect()
    }

    /// Number of identities currently held.
    pub fn len(&self) -> usize {
        self.read_holds().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_holds().is_empty()
    }

    // ------------------------------------------------------------------
    // Entering the hold
    // ------------------------------------------------------------------

    /// Place `id` into the authentication hold.
    ///
    /// Snapshots the supplied pre-hold state, strips elevated privilege,
    /// and returns the confinement directives the caller must apply to the
    /// live session. Returns `None` when `id` is already held: the first
    /// snapshot stays authoritative and no state is touched again.
    pub fn begin(
        &self,
        id: PlayerUuid,
        current_mode: GameMode,
        current_position: Vec3,
        currently_elevated: bool,
        hold_at: Vec3,
    ) -> Option<Confinement> {
        {
            let mut holds = self.write_holds();
            if holds.contains_key(&id) {
                tracing::debug!(%id, "already awaiting login; keeping the first snapshot");
                return None;
            }
            holds.insert(
                id,
                Hold {
                    original_mode: current_mode,
                    original_position: current_position,
                    hold_at,
                    was_elevated: currently_elevated,
                },
            );
        }

        if currently_elevated {
            tracing::warn!(%id, "elevated privilege revoked until login completes");
            if let Err(error) = self.players.set_elevated(id, false) {
                tracing::error!(%id, %error, "failed to strip elevated privilege");
            }
        }

        tracing::info!(
            %id,
            mode = %current_mode,
            position = %current_position,
            "authentication hold created"
        );
        Some(Confinement {
            hold_at,
            hold_mode: HOLD_MODE,
        })
    }

    /// Put an already-authenticated identity back into the hold.
    ///
    /// Used after an administrative credential reset. Same contract as
    /// [`HoldManager::begin`]; an identity that is somehow still held keeps
    /// its existing snapshot.
    pub fn force_reauth(
        &self,
        id: PlayerUuid,
        current_mode: GameMode,
        current_position: Vec3,
        currently_elevated: bool,
        hold_at: Vec3,
    ) -> Option<Confinement> {
        let confinement =
            self.begin(id, current_mode, current_position, currently_elevated, hold_at);
        if confinement.is_some() {
            tracing::info!(%id, "forced back into the authentication hold");
        }
        confinement
    }

    /// Where holds anchor: the center of the spawn anchor column, one block
    /// above its top solid block, or [`FALLBACK_Y`] when the terrain there
    /// cannot be queried.
    pub fn safe_anchor_position(&self) -> Vec3 {
        let anchor = self.world.spawn_anchor();
        let y = match self.world.top_solid_y(anchor.x, anchor.z) {
            Some(top) => f64::from(top) + CLEARANCE,
            None => {
                tracing::warn!(
                    x = anchor.x,
                    z = anchor.z,
                    "terrain not queryable at the spawn anchor; using fallback height"
                );
                FALLBACK_Y
            }
        };
        Vec3::new(
            f64::from(anchor.x) + CENTER_OFFSET,
            y,
            f64::from(anchor.z) + CENTER_OFFSET,
        )
    }

    // ------------------------------------------------------------------
    // Leaving the hold
    // ------------------------------------------------------------------

    /// Release `id` after successful authentication and restore their
    /// pre-hold state.
    ///
    /// Returns `true` when every restoration sub-step succeeded. A missing
    /// record (never held, or already released) and a vanished session
    /// handle both return `false`; partial failures are logged per step and
    /// the remaining steps still run.
    pub fn complete(&self, id: PlayerUuid) -> bool {
        let Some(hold) = self.take(id) else {
            tracing::debug!(%id, "complete without a hold record; nothing to restore");
            return false;
        };
        if !self.players.is_online(id) {
            tracing::info!(%id, "hold cleared for an identity that already left");
            return false;
        }

        let clean = self.restore(id, &hold);
        if clean {
            tracing::info!(%id, mode = %hold.original_mode, "pre-hold state restored");
        } else {
            tracing::warn!(%id, "restoration finished with failed sub-steps");
        }
        clean
    }

    /// Drop the hold for an identity whose connection is going away,
    /// restoring whatever the live handle still accepts.
    ///
    /// Disconnect callbacks on most hosts fire while the handle is still
    /// usable; restoring at that point means the host persists the player's
    /// original state instead of the confined one. Never raises.
    pub fn abort_on_disconnect(&self, id: PlayerUuid) {
        let Some(hold) = self.take(id) else {
            return;
        };
        tracing::warn!(%id, "disconnected while awaiting login; restoring state");
        if self.players.is_online(id) {
            self.restore(id, &hold);
        } else {
            tracing::info!(%id, "session handle already gone; hold dropped without restore");
        }
    }

    /// Remove the hold record for `id` without any restoration.
    ///
    /// Recovery hatch for records whose live session has vanished; returns
    /// whether a record existed.
    pub fn purge(&self, id: PlayerUuid) -> bool {
        self.write_holds().remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Enforcement sweep
    // ------------------------------------------------------------------

    /// Re-assert confinement for every held identity.
    ///
    /// Runs once per host tick. Identities that drifted off their hold
    /// position (through host-side spawn logic, other plugins, or client
    /// tricks) are moved back with their facing preserved; held identities
    /// with no live session handle are purged.
    pub fn enforce(&self) {
        for id in self.held_ids() {
            // Re-read per identity: a login or disconnect may have removed
            // the record since the sweep snapshot was taken.
            let Some(hold) = self.get(id) else {
                continue;
            };
            let Some(position) = self.players.position(id) else {
                self.purge(id);
                tracing::warn!(%id, "held identity has no live session; hold purged");
                continue;
            };
            if position == hold.hold_at {
                continue;
            }
            if let Err(error) = self.players.move_keep_facing(id, hold.hold_at) {
                self.purge(id);
                tracing::warn!(%id, %error, "could not re-confine; hold purged");
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Remove and return the hold record for `id`.
    ///
    /// Removal under the write lock is what makes restore and abort
    /// mutually exclusive: exactly one caller gets the record.
    fn take(&self, id: PlayerUuid) -> Option<Hold> {
        self.write_holds().remove(&id)
    }

    /// Run every restoration sub-step, logging failures individually.
    fn restore(&self, id: PlayerUuid, hold: &Hold) -> bool {
        let mut clean = true;

        // Position is restored first, while movement is still unrestricted
        // by whatever mode the player ends up in.
        if let Err(error) = self.players.move_keep_facing(id, hold.original_position) {
            tracing::warn!(%id, %error, "failed to move player back");
            clean = false;
        }

        let target_mode = self.restore_mode(id, hold);
        match self.players.mode(id) {
            Some(current) if current == target_mode => {}
            _ => {
                if let Err(error) = self.players.set_mode(id, target_mode) {
                    tracing::warn!(%id, %error, "failed to restore game mode");
                    clean = false;
                }
            }
        }

        if self.players.has_hold_effect(id) {
            if let Err(error) = self.players.clear_hold_effect(id) {
                tracing::warn!(%id, %error, "failed to clear the hold effect");
                clean = false;
            }
        }

        if hold.was_elevated && !self.players.is_elevated(id) {
            if let Err(error) = self.players.set_elevated(id, true) {
                tracing::warn!(%id, %error, "failed to restore elevated privilege");
                clean = false;
            } else {
                tracing::info!(%id, "elevated privilege restored");
            }
        }

        clean
    }

    /// Decide which mode to put the player back into.
    ///
    /// A snapshot equal to the hold mode itself is ambiguous: it cannot
    /// distinguish "joined mid-hold state from a crash" from "legitimately
    /// plays in that mode". The world default wins for that case.
    fn restore_mode(&self, id: PlayerUuid, hold: &Hold) -> GameMode {
        if hold.original_mode == HOLD_MODE {
            let substitute = self.world.default_mode();
            tracing::info!(
                %id,
                original = %hold.original_mode,
                substitute = %substitute,
                "snapshot mode equals the hold mode; restoring the world default"
            );
            substitute
        } else {
            hold.original_mode
        }
    }

    fn read_holds(&self) -> RwLockReadGuard<'_, HashMap<PlayerUuid, Hold>> {
        // The critical sections are plain map operations and cannot panic,
        // so a poisoned lock still carries consistent data.
        self.holds.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_holds(&self) -> RwLockWriteGuard<'_, HashMap<PlayerUuid, Hold>> {
        self.holds.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for HoldManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldManager")
            .field("held", &self.len())
            .finish_non_exhaustive()
    }
}
