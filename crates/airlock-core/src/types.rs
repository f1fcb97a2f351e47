//! Core identity and geometry types shared by every Airlock crate.
//!
//! These are the vocabulary of the whole system: who a participant is
//! ([`PlayerUuid`]), where they stand ([`Vec3`]), how they may interact
//! with the world ([`GameMode`]), and where the world spawns new players
//! ([`SpawnAnchor`]).

// Serde is the ecosystem's serialization framework. Deriving its two
// traits is what lets these types flow into the credential file:
//   - `Serialize`:   the value can be turned INTO JSON
//   - `Deserialize`: the value can be rebuilt FROM JSON
use serde::{Deserialize, Serialize};

// `fmt` for implementing Display (human-readable printing in logs).
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A stable, unique identifier for a participant.
///
/// The host environment assigns it once per account, and it survives
/// disconnects and reconnects.
///
/// This is a "newtype wrapper" — a plain `Uuid` wrapped in a named
/// struct. Why bother wrapping?
///
/// 1. **Type safety**: a player identity cannot be confused with any
///    other UUID the host throws around (world ids, entity ids, ...).
/// 2. **Readability**: `fn is_held(id: PlayerUuid)` says more than
///    `fn is_held(id: Uuid)`.
///
/// The derives keep it cheap and usable everywhere: `Copy` because it is
/// just 16 bytes, `Hash` + `Eq` so it can key the hold and credential
/// maps, `Serialize`/`Deserialize` so it can live in the credential file.
///
/// `#[serde(transparent)]` tells serde to serialize the inner value
/// directly: a bare UUID string (`"3c9e0f…"`), not a one-field object.
/// That is exactly the key format of the credential file, a flat JSON
/// object mapping UUID strings to password hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerUuid(pub Uuid);

impl PlayerUuid {
    /// Generates a fresh random identity. Intended for tests and demos;
    /// real identities come from the host environment.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for PlayerUuid {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// `Display` is what lets `{}` format strings and tracing's `%id` sigil
/// print the identity. Output is the hyphenated UUID form, matching the
/// persisted key format.
impl fmt::Display for PlayerUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A position in the world, in absolute coordinates.
///
/// Equality is exact per axis. The enforcement loop deliberately compares
/// positions with `==` rather than a distance threshold: any drift at all,
/// including sub-block nudges from the environment's own physics, must
/// trigger a correction.
///
/// Note the derive list has `PartialEq` but no `Eq` — floats cannot offer
/// full equivalence (`NaN != NaN`), and Rust makes that visible in the
/// trait system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// The world's spawn anchor: the column new players appear at, plus the
/// facing angle the world assigns them.
///
/// Only the horizontal column is anchored; the safe height is computed
/// from the terrain at that column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnAnchor {
    pub x: i32,
    pub z: i32,
    pub yaw: f32,
}

// ---------------------------------------------------------------------------
// Interaction mode
// ---------------------------------------------------------------------------

/// How a participant may interact with the world.
///
/// A fieldless Rust enum: exactly these four modes are representable, so
/// no code anywhere needs an "unknown mode" branch.
///
/// `Spectator` doubles as the hold mode: while a player is awaiting
/// login they are switched into it so they cannot touch anything, and
/// their real mode is restored afterwards.
///
/// `#[serde(rename_all = "snake_case")]` makes the JSON form lowercase
/// (`"survival"` instead of `"Survival"`), matching how hosts
/// conventionally spell modes in their own configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Normal play under the world's full rules.
    Survival,
    /// Unrestricted building and flight.
    Creative,
    /// Exploration with map-defined interaction limits.
    Adventure,
    /// Free-floating observer that cannot touch the world at all.
    /// This is what makes it usable as the hold mode.
    Spectator,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameMode::Survival => "survival",
            GameMode::Creative => "creative",
            GameMode::Adventure => "adventure",
            GameMode::Spectator => "spectator",
        };
        write!(f, "{name}")
    }
}

// =========================================================================
// Tests
// =========================================================================
