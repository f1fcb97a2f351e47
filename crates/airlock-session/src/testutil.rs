//! In-memory [`Players`] and [`WorldView`] fixtures shared by the unit
//! tests in this crate.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use airlock_core::{GameMode, PlayerUuid, SpawnAnchor, Vec3};

use crate::world::{PlayerOffline, Players, WorldView};

/// State of one simulated player, plus counters the tests assert on.
#[derive(Debug, Clone)]
pub(crate) struct FakePlayer {
    pub name: String,
    pub online: bool,
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub mode: GameMode,
    pub elevated: bool,
    pub hold_effect: bool,
    /// When set, `set_elevated` fails as if the handle were gone.
    pub refuse_elevation: bool,
    pub chat: Vec<String>,
    pub action_bar: Vec<String>,
    pub moves: usize,
    pub mode_changes: usize,
}

impl Default for FakePlayer {
    fn default() -> Self {
        Self {
            name: "steve".to_owned(),
            online: true,
            position: Vec3::new(0.0, 64.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            mode: GameMode::Survival,
            elevated: false,
            hold_effect: false,
            refuse_elevation: false,
            chat: Vec::new(),
            action_bar: Vec::new(),
            moves: 0,
            mode_changes: 0,
        }
    }
}

#[derive(Default)]
pub(crate) struct FakePlayers {
    players: Mutex<HashMap<PlayerUuid, FakePlayer>>,
}

impl FakePlayers {
    pub fn join(&self, id: PlayerUuid, player: FakePlayer) {
        self.lock().insert(id, player);
    }

    /// Copy of the player's state, including delivery logs and counters.
    pub fn snapshot(&self, id: PlayerUuid) -> FakePlayer {
        self.lock().get(&id).cloned().unwrap()
    }

    pub fn set_online(&self, id: PlayerUuid, online: bool) {
        if let Some(player) = self.lock().get_mut(&id) {
            player.online = online;
        }
    }

    /// Move the player without going through the [`Players`] trait, as the
    /// host would when spawn logic or another plugin relocates them.
    pub fn displace(&self, id: PlayerUuid, to: Vec3) {
        if let Some(player) = self.lock().get_mut(&id) {
            player.position = to;
        }
    }

    /// Set the elevation flag directly, bypassing `refuse_elevation`.
    pub fn force_elevation(&self, id: PlayerUuid, elevated: bool) {
        if let Some(player) = self.lock().get_mut(&id) {
            player.elevated = elevated;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PlayerUuid, FakePlayer>> {
        self.players.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn act<R>(
        &self,
        id: PlayerUuid,
        f: impl FnOnce(&mut FakePlayer) -> R,
    ) -> Result<R, PlayerOffline> {
        let mut players = self.lock();
        match players.get_mut(&id) {
            Some(player) if player.online => Ok(f(player)),
            _ => Err(PlayerOffline(id)),
        }
    }

    fn query<R>(&self, id: PlayerUuid, f: impl FnOnce(&FakePlayer) -> R) -> Option<R> {
        let players = self.lock();
        players.get(&id).filter(|p| p.online).map(f)
    }
}

impl Players for FakePlayers {
    fn is_online(&self, id: PlayerUuid) -> bool {
        self.query(id, |_| ()).is_some()
    }

    fn name(&self, id: PlayerUuid) -> Option<String> {
        self.query(id, |p| p.name.clone())
    }

    fn position(&self, id: PlayerUuid) -> Option<Vec3> {
        self.query(id, |p| p.position)
    }

    fn mode(&self, id: PlayerUuid) -> Option<GameMode> {
        self.query(id, |p| p.mode)
    }

    fn is_elevated(&self, id: PlayerUuid) -> bool {
        self.query(id, |p| p.elevated).unwrap_or(false)
    }

    fn has_hold_effect(&self, id: PlayerUuid) -> bool {
        self.query(id, |p| p.hold_effect).unwrap_or(false)
    }

    fn move_keep_facing(&self, id: PlayerUuid, to: Vec3) -> Result<(), PlayerOffline> {
        self.act(id, |p| {
            p.position = to;
            p.moves += 1;
        })
    }

    fn move_facing(
        &self,
        id: PlayerUuid,
        to: Vec3,
        yaw: f32,
        pitch: f32,
    ) -> Result<(), PlayerOffline> {
        self.act(id, |p| {
            p.position = to;
            p.yaw = yaw;
            p.pitch = pitch;
            p.moves += 1;
        })
    }

    fn set_mode(&self, id: PlayerUuid, mode: GameMode) -> Result<(), PlayerOffline> {
        self.act(id, |p| {
            p.mode = mode;
            p.mode_changes += 1;
        })
    }

    fn set_elevated(&self, id: PlayerUuid, elevated: bool) -> Result<(), PlayerOffline> {
        let refused = self.act(id, |p| {
            if p.refuse_elevation {
                return true;
            }
            p.elevated = elevated;
            false
        })?;
        if refused {
            Err(PlayerOffline(id))
        } else {
            Ok(())
        }
    }

    fn apply_hold_effect(&self, id: PlayerUuid) -> Result<(), PlayerOffline> {
        self.act(id, |p| p.hold_effect = true)
    }

    fn clear_hold_effect(&self, id: PlayerUuid) -> Result<(), PlayerOffline> {
        self.act(id, |p| p.hold_effect = false)
    }

    fn send_chat(&self, id: PlayerUuid, message: &str) {
        let _ = self.act(id, |p| p.chat.push(message.to_owned()));
    }

    fn send_action_bar(&self, id: PlayerUuid, message: &str) {
        let _ = self.act(id, |p| p.action_bar.push(message.to_owned()));
    }
}

/// A world with one flat surface height everywhere.
#[derive(Debug, Clone)]
pub(crate) struct FlatWorld {
    pub anchor: SpawnAnchor,
    pub surface_y: Option<i32>,
    pub default_mode: GameMode,
}

impl Default for FlatWorld {
    fn default() -> Self {
        Self {
            anchor: SpawnAnchor {
                x: 8,
                z: -8,
                yaw: 0.0,
            },
            surface_y: Some(63),
            default_mode: GameMode::Survival,
        }
    }
}

impl WorldView for FlatWorld {
    fn top_solid_y(&self, _x: i32, _z: i32) -> Option<i32> {
        self.surface_y
    }

    fn default_mode(&self) -> GameMode {
        self.default_mode
    }

    fn spawn_anchor(&self) -> SpawnAnchor {
        self.anchor
    }
}
