//! `Airlock` service: lifecycle wiring and credential operations.
//!
//! This is the entry point for embedding the gate in a host. It ties
//! together all the layers: credential store, hold manager, action gate.
//! The host forwards join/leave/tick events and command invocations; the
//! service decides, confines, verifies, and restores.

use std::sync::Arc;

use airlock_core::{GameMode, PlayerUuid, Vec3, notice};
use airlock_session::{ActionGate, Confinement, HoldManager, Players, WorldView};
use airlock_store::CredentialStore;

use crate::AirlockError;
use crate::config::AirlockConfig;

/// A running login gate.
///
/// One instance per host. All methods take `&self`; the service is meant
/// to live in an `Arc` and be called from whichever executor context the
/// host delivers events on.
pub struct Airlock {
    pub(crate) config: AirlockConfig,
    pub(crate) store: CredentialStore,
    pub(crate) holds: Arc<HoldManager>,
    pub(crate) gate: ActionGate,
    pub(crate) players: Arc<dyn Players>,
}

impl Airlock {
    /// Opens the credential store at the configured path and wires up the
    /// gate.
    ///
    /// Must be called from within a tokio runtime: the store's background
    /// save worker is spawned here. The credential file is loaded
    /// synchronously; a missing or unreadable file starts the store empty.
    pub fn new(
        config: AirlockConfig,
        players: Arc<dyn Players>,
        world: Arc<dyn WorldView>,
    ) -> Self {
        let store = CredentialStore::open(config.credentials_path.clone());
        Self::with_store(config, store, players, world)
    }

    /// Wires the gate around an already-opened store.
    ///
    /// Lets embedders supply a store with a custom hashing backend.
    pub fn with_store(
        config: AirlockConfig,
        store: CredentialStore,
        players: Arc<dyn Players>,
        world: Arc<dyn WorldView>,
    ) -> Self {
        tracing::info!(
            registered = store.len(),
            path = %store.path().display(),
            "airlock ready"
        );
        let holds = Arc::new(HoldManager::new(players.clone(), world));
        let gate = ActionGate::new(holds.clone(), players.clone());
        Self {
            config,
            store,
            holds,
            gate,
            players,
        }
    }

    pub fn config(&self) -> &AirlockConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Lifecycle events
    // ------------------------------------------------------------------

    /// A player finished connecting. The host passes the join-time state
    /// it already has in hand; the gate snapshots it, confines the player,
    /// and greets them with the appropriate prompt.
    ///
    /// Calling this twice for the same connected identity is safe: the
    /// second call finds the hold already present and applies nothing.
    pub fn on_join(&self, id: PlayerUuid, mode: GameMode, position: Vec3, elevated: bool) {
        let hold_at = self.holds.safe_anchor_position();
        let Some(confinement) = self.holds.begin(id, mode, position, elevated, hold_at) else {
            return;
        };
        self.apply_confinement(id, confinement);

        if self.store.has(id) {
            self.players.send_chat(id, notice::WELCOME_REGISTERED);
        } else {
            self.players.send_chat(id, notice::WELCOME_UNREGISTERED);
            self.players.send_chat(id, notice::SET_PASSWORD_PROMPT);
        }
    }

    /// A player's connection is going away.
    pub fn on_disconnect(&self, id: PlayerUuid) {
        self.holds.abort_on_disconnect(id);
    }

    /// One enforcement sweep. Call once per host tick, or let
    /// [`spawn_enforcer`](crate::spawn_enforcer) drive it.
    pub fn tick(&self) {
        self.holds.enforce();
    }

    // ------------------------------------------------------------------
    // Credential operations
    // ------------------------------------------------------------------

    /// Whether `id` is currently confined awaiting login.
    pub fn is_held(&self, id: PlayerUuid) -> bool {
        self.holds.is_held(id)
    }

    /// Whether a credential exists for `id`.
    pub fn has_password(&self, id: PlayerUuid) -> bool {
        self.store.has(id)
    }

    /// Number of identities with a stored credential.
    pub fn registered_count(&self) -> usize {
        self.store.len()
    }

    /// First-time registration. A held player is logged straight in.
    pub fn register(&self, id: PlayerUuid, password: &str) -> Result<(), AirlockError> {
        if self.store.has(id) {
            return Err(AirlockError::AlreadyRegistered);
        }
        self.store.set_or_replace(id, password)?;
        tracing::info!(%id, name = %self.display_name(id), "password registered");
        if self.holds.is_held(id) && !self.holds.complete(id) {
            tracing::warn!(%id, "registered, but restoration was incomplete");
        }
        Ok(())
    }

    /// Verify a held player's password and release them on success.
    pub fn authenticate(&self, id: PlayerUuid, password: &str) -> Result<(), AirlockError> {
        if !self.holds.is_held(id) {
            return Err(AirlockError::NotHeld);
        }
        if !self.store.has(id) {
            return Err(AirlockError::NotRegistered);
        }
        if !self.store.verify(id, password) {
            tracing::warn!(%id, name = %self.display_name(id), "failed login attempt");
            return Err(AirlockError::WrongPassword);
        }
        tracing::info!(%id, name = %self.display_name(id), "login successful");
        if !self.holds.complete(id) {
            tracing::warn!(%id, "logged in, but restoration was incomplete");
        }
        Ok(())
    }

    /// Replace the password of an authenticated player, verifying the old
    /// one first.
    pub fn change_password(
        &self,
        id: PlayerUuid,
        old: &str,
        new: &str,
    ) -> Result<(), AirlockError> {
        if self.holds.is_held(id) {
            return Err(AirlockError::StillHeld);
        }
        if !self.store.has(id) {
            return Err(AirlockError::NotRegistered);
        }
        if !self.store.verify(id, old) {
            return Err(AirlockError::WrongPassword);
        }
        self.store.set_or_replace(id, new)?;
        tracing::info!(%id, name = %self.display_name(id), "password changed");
        Ok(())
    }

    /// Replace the password of an authenticated player without the old
    /// one. Being logged in is the proof of ownership here.
    pub fn reset_and_set_password(&self, id: PlayerUuid, new: &str) -> Result<(), AirlockError> {
        if self.holds.is_held(id) {
            return Err(AirlockError::StillHeld);
        }
        if !self.store.has(id) {
            return Err(AirlockError::NotRegistered);
        }
        self.store.set_or_replace(id, new)?;
        tracing::info!(%id, name = %self.display_name(id), "password reset by owner");
        Ok(())
    }

    /// Remove a player's credential on an administrator's behalf.
    ///
    /// An online, authenticated target is pushed back into the hold on the
    /// spot and told to choose a new password; an offline target simply
    /// registers anew on their next join.
    pub fn admin_reset_password(&self, target: PlayerUuid) -> Result<(), AirlockError> {
        if !self.store.remove(target) {
            return Err(AirlockError::NotRegistered);
        }
        tracing::info!(
            %target,
            name = %self.display_name(target),
            "credential removed by administrator"
        );

        if self.players.is_online(target) && !self.holds.is_held(target) {
            let (Some(mode), Some(position)) =
                (self.players.mode(target), self.players.position(target))
            else {
                tracing::info!(%target, "target vanished mid-reset; will register on next join");
                return Ok(());
            };
            let elevated = self.players.is_elevated(target);
            let hold_at = self.holds.safe_anchor_position();
            if let Some(confinement) =
                self.holds
                    .force_reauth(target, mode, position, elevated, hold_at)
            {
                self.apply_confinement(target, confinement);
            }
            self.players.send_chat(target, notice::RESET_BY_ADMIN);
            self.players.send_chat(target, notice::RESET_CHOOSE_NEW);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Gate passthroughs
    // ------------------------------------------------------------------

    /// Whether `id` may run the given command line right now.
    pub fn allow_command(&self, id: PlayerUuid, line: &str) -> bool {
        self.gate.allow_command(id, line)
    }

    /// Whether `id` may interact with the world right now.
    pub fn allow_interaction(&self, id: PlayerUuid) -> bool {
        self.gate.allow_interaction(id)
    }

    // ------------------------------------------------------------------
    // Shutdown
    // ------------------------------------------------------------------

    /// Wait until every queued credential save has reached disk.
    pub async fn flush(&self) {
        self.store.flush().await;
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Apply hold directives to the live session. Mode switches first so
    /// the teleport happens in the hold mode; each step is independently
    /// best-effort, with the enforcement sweep backstopping position.
    fn apply_confinement(&self, id: PlayerUuid, confinement: Confinement) {
        if let Err(error) = self.players.set_mode(id, confinement.hold_mode) {
            tracing::warn!(%id, %error, "failed to apply the hold mode");
        }
        if let Err(error) = self.players.move_facing(id, confinement.hold_at, 0.0, 0.0) {
            tracing::warn!(%id, %error, "failed to move player to the hold position");
        }
        if let Err(error) = self.players.apply_hold_effect(id) {
            tracing::warn!(%id, %error, "failed to apply the hold effect");
        }
    }

    /// Display name for log lines, falling back to the UUID when the
    /// identity is offline.
    fn display_name(&self, id: PlayerUuid) -> String {
        self.players.name(id).unwrap_or_else(|| id.to_string())
    }
}

impl std::fmt::Debug for Airlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Airlock")
            .field("registered", &self.store.len())
            .field("held", &self.holds.len())
            .finish_non_exhaustive()
    }
}
