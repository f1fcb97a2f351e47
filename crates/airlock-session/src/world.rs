//! Host-facing trait seams.
//!
//! The hold machinery never talks to a concrete game host. Everything it
//! needs from the outside world comes in through [`Players`] (live session
//! handles) and [`WorldView`] (terrain and defaults), so the same state
//! machine runs unchanged against a real server adapter or the in-memory
//! fixtures used in tests.

use airlock_core::{GameMode, PlayerUuid, SpawnAnchor, Vec3};

/// A player action was attempted against an identity with no live session.
///
/// Queries degrade to `None`/`false` instead; only state-changing actions
/// surface this error, so callers decide per call site whether a vanished
/// handle is a warning or routine churn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("player {0} has no live session")]
pub struct PlayerOffline(pub PlayerUuid);

/// Live-session access to connected players.
///
/// Queries are snapshots and may race with disconnects; actions return
/// [`PlayerOffline`] when the handle is gone rather than panicking.
pub trait Players: Send + Sync + 'static {
    /// Whether a live session handle currently exists for `id`.
    fn is_online(&self, id: PlayerUuid) -> bool;

    /// Display name, if the identity is connected.
    fn name(&self, id: PlayerUuid) -> Option<String>;

    /// Current position, if the identity is connected.
    fn position(&self, id: PlayerUuid) -> Option<Vec3>;

    /// Current game mode, if the identity is connected.
    fn mode(&self, id: PlayerUuid) -> Option<GameMode>;

    /// Whether the identity currently carries elevated (operator) privilege.
    fn is_elevated(&self, id: PlayerUuid) -> bool;

    /// Whether the confinement status effect is currently applied.
    fn has_hold_effect(&self, id: PlayerUuid) -> bool;

    /// Move the player while preserving their current yaw and pitch.
    fn move_keep_facing(&self, id: PlayerUuid, to: Vec3) -> Result<(), PlayerOffline>;

    /// Move the player and set an explicit yaw and pitch.
    fn move_facing(
        &self,
        id: PlayerUuid,
        to: Vec3,
        yaw: f32,
        pitch: f32,
    ) -> Result<(), PlayerOffline>;

    /// Switch the player's game mode.
    fn set_mode(&self, id: PlayerUuid, mode: GameMode) -> Result<(), PlayerOffline>;

    /// Grant or revoke elevated privilege.
    fn set_elevated(&self, id: PlayerUuid, elevated: bool) -> Result<(), PlayerOffline>;

    /// Apply the long-lived confinement status effect.
    fn apply_hold_effect(&self, id: PlayerUuid) -> Result<(), PlayerOffline>;

    /// Remove the confinement status effect.
    fn clear_hold_effect(&self, id: PlayerUuid) -> Result<(), PlayerOffline>;

    /// Deliver a chat line. Silently dropped for offline identities.
    fn send_chat(&self, id: PlayerUuid, message: &str);

    /// Deliver an action-bar overlay line. Silently dropped when offline.
    fn send_action_bar(&self, id: PlayerUuid, message: &str);
}

/// Read-only view of the world the hold anchors into.
pub trait WorldView: Send + Sync + 'static {
    /// Y coordinate of the highest solid block at the given column, or
    /// `None` when the terrain there cannot be queried yet.
    fn top_solid_y(&self, x: i32, z: i32) -> Option<i32>;

    /// The mode newly spawned players receive in this world.
    fn default_mode(&self) -> GameMode;

    /// The configured spawn anchor holds are centered on.
    fn spawn_anchor(&self) -> SpawnAnchor;
}
