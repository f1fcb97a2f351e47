//! The hold record and the confinement directives derived from it.

use airlock_core::{GameMode, Vec3};

/// Game mode applied while an identity waits at the gate.
///
/// Spectator prevents block interaction, item use, and damage without
/// needing per-action patches in the host.
pub const HOLD_MODE: GameMode = GameMode::Spectator;

/// Everything needed to put a player back exactly as they were before the
/// gate took over.
///
/// One record per held identity, created atomically when the hold begins
/// and consumed exactly once by whichever of restore or abort wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hold {
    /// Mode the player was in when the hold began.
    pub original_mode: GameMode,
    /// Position the player stood at when the hold began.
    pub original_position: Vec3,
    /// Where the enforcement sweep pins the player while held.
    pub hold_at: Vec3,
    /// Whether elevated privilege was revoked and must come back on login.
    pub was_elevated: bool,
}

/// Instructions for the caller that owns the live session handle: where to
/// put the player and which mode to apply for the duration of the hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confinement {
    pub hold_at: Vec3,
    pub hold_mode: GameMode,
}
