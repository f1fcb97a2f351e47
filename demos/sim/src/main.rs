//! Scripted round trip through the login gate against an in-memory host.
//!
//! Plays out the full lifecycle: an unregistered join gets confined and
//! denied, registers, is released, leaves, comes back, fails a login, is
//! snapped back by the enforcement driver while trying to wander off, logs
//! in, and finally gets their password reset by an administrator.
//!
//! Run with `cargo run -p airlock-sim`; set `RUST_LOG` to adjust verbosity.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use airlock::{
    Airlock, AirlockConfig, AuthCommand, GameMode, PlayerOffline, PlayerUuid, Players,
    SpawnAnchor, Vec3, WorldView, spawn_enforcer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ---------------------------------------------------------------------------
// In-memory host
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct SimPlayer {
    name: String,
    online: bool,
    position: Vec3,
    yaw: f32,
    pitch: f32,
    mode: GameMode,
    elevated: bool,
    hold_effect: bool,
}

#[derive(Default)]
struct SimHost {
    players: Mutex<HashMap<PlayerUuid, SimPlayer>>,
}

impl SimHost {
    fn add(&self, id: PlayerUuid, player: SimPlayer) {
        self.lock().insert(id, player);
    }

    fn set_online(&self, id: PlayerUuid, online: bool) {
        if let Some(player) = self.lock().get_mut(&id) {
            player.online = online;
        }
    }

    /// Relocation outside the gate's control, like a client teleport hack.
    fn displace(&self, id: PlayerUuid, to: Vec3) {
        if let Some(player) = self.lock().get_mut(&id) {
            player.position = to;
        }
    }

    fn describe(&self, id: PlayerUuid) -> String {
        match self.lock().get(&id) {
            Some(p) => format!("{} at {} in {} mode", p.name, p.position, p.mode),
            None => "unknown player".to_owned(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PlayerUuid, SimPlayer>> {
        self.players.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn act<R>(
        &self,
        id: PlayerUuid,
        f: impl FnOnce(&mut SimPlayer) -> R,
    ) -> Result<R, PlayerOffline> {
        let mut players = self.lock();
        match players.get_mut(&id) {
            Some(player) if player.online => Ok(f(player)),
            _ => Err(PlayerOffline(id)),
        }
    }

    fn query<R>(&self, id: PlayerUuid, f: impl FnOnce(&SimPlayer) -> R) -> Option<R> {
        self.lock().get(&id).filter(|p| p.online).map(f)
    }
}

impl Players for SimHost {
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
        self.act(id, |p| p.position = to)
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
        })
    }

    fn set_mode(&self, id: PlayerUuid, mode: GameMode) -> Result<(), PlayerOffline> {
        self.act(id, |p| p.mode = mode)
    }

    fn set_elevated(&self, id: PlayerUuid, elevated: bool) -> Result<(), PlayerOffline> {
        self.act(id, |p| p.elevated = elevated)
    }

    fn apply_hold_effect(&self, id: PlayerUuid) -> Result<(), PlayerOffline> {
        self.act(id, |p| p.hold_effect = true)
    }

    fn clear_hold_effect(&self, id: PlayerUuid) -> Result<(), PlayerOffline> {
        self.act(id, |p| p.hold_effect = false)
    }

    fn send_chat(&self, id: PlayerUuid, message: &str) {
        if let Some(name) = self.name(id) {
            tracing::info!(player = %name, "[chat] {message}");
        }
    }

    fn send_action_bar(&self, id: PlayerUuid, message: &str) {
        if let Some(name) = self.name(id) {
            tracing::info!(player = %name, "[action bar] {message}");
        }
    }
}

/// Flat world with a surface at y = 64 and spawn at (0, 0).
struct SimWorld;

impl WorldView for SimWorld {
    fn top_solid_y(&self, _x: i32, _z: i32) -> Option<i32> {
        Some(64)
    }

    fn default_mode(&self) -> GameMode {
        GameMode::Survival
    }

    fn spawn_anchor(&self) -> SpawnAnchor {
        SpawnAnchor {
            x: 0,
            z: 0,
            yaw: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

fn scene(title: &str) {
    tracing::info!("---- {title} ----");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let dir = tempfile::tempdir()?;
    let host = Arc::new(SimHost::default());
    let config = AirlockConfig {
        credentials_path: dir.path().join("passwords.json"),
        min_password_len: 4,
    };
    let gate = Arc::new(Airlock::new(config, host.clone(), Arc::new(SimWorld)));
    let driver = spawn_enforcer(gate.clone(), Duration::from_millis(50));

    let alice = PlayerUuid::random();
    let home = Vec3::new(137.5, 72.0, -220.5);

    scene("an unregistered player joins and is confined");
    host.add(
        alice,
        SimPlayer {
            name: "alice".to_owned(),
            online: true,
            position: home,
            yaw: 90.0,
            pitch: 0.0,
            mode: GameMode::Survival,
            elevated: false,
            hold_effect: false,
        },
    );
    gate.on_join(alice, GameMode::Survival, home, false);
    tracing::info!("{}", host.describe(alice));

    scene("everything except the bootstrap commands is denied");
    gate.allow_command(alice, "/home");
    gate.allow_interaction(alice);

    scene("a typo in the confirm field is caught");
    gate.dispatch(
        alice,
        AuthCommand::SetPassword {
            password: "hunter2".into(),
            confirm: "hunter3".into(),
        },
    );

    scene("registration releases the player");
    gate.dispatch(
        alice,
        AuthCommand::SetPassword {
            password: "hunter2".into(),
            confirm: "hunter2".into(),
        },
    );
    tracing::info!("{}", host.describe(alice));

    scene("the player leaves and comes back");
    gate.on_disconnect(alice);
    host.set_online(alice, false);
    host.set_online(alice, true);
    gate.on_join(alice, GameMode::Survival, home, false);

    scene("a wrong password keeps the hold in place");
    gate.dispatch(
        alice,
        AuthCommand::Login {
            password: "letmein".into(),
        },
    );

    scene("wandering off is corrected by the enforcement sweep");
    host.displace(alice, Vec3::new(30.0, 65.0, 30.0));
    tokio::time::sleep(Duration::from_millis(120)).await;
    tracing::info!("{}", host.describe(alice));

    scene("the right password restores the original state");
    gate.dispatch(
        alice,
        AuthCommand::Login {
            password: "hunter2".into(),
        },
    );
    tracing::info!("{}", host.describe(alice));

    scene("an administrator resets the password");
    let admin = PlayerUuid::random();
    host.add(
        admin,
        SimPlayer {
            name: "admin".to_owned(),
            online: true,
            position: Vec3::new(0.0, 65.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            mode: GameMode::Creative,
            elevated: true,
            hold_effect: false,
        },
    );
    gate.dispatch(admin, AuthCommand::ResetPassword { target: alice });
    tracing::info!("{}", host.describe(alice));

    scene("the player registers again and is released");
    gate.dispatch(
        alice,
        AuthCommand::SetPassword {
            password: "correct-horse".into(),
            confirm: "correct-horse".into(),
        },
    );
    tracing::info!("{}", host.describe(alice));

    scene("shutdown");
    driver.abort();
    gate.flush().await;
    tracing::info!(registered = gate.registered_count(), "credentials on disk");
    Ok(())
}
