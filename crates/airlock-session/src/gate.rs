//! Pre-action filter for held identities.

use std::sync::Arc;

use airlock_core::{PlayerUuid, notice};

use crate::manager::HoldManager;
use crate::world::Players;

/// Command verbs an unauthenticated identity may still run. Everything an
/// identity needs to get through the gate, and nothing else.
pub const BOOTSTRAP_VERBS: [&str; 2] = ["login", "setpassword"];

/// Decides, per command and per interaction, whether a held identity may
/// proceed, and tells them why not when the answer is no.
#[derive(Clone)]
pub struct ActionGate {
    holds: Arc<HoldManager>,
    players: Arc<dyn Players>,
}

impl ActionGate {
    pub fn new(holds: Arc<HoldManager>, players: Arc<dyn Players>) -> Self {
        Self { holds, players }
    }

    /// Whether `id` may run the given command line.
    ///
    /// Accepts a full line (`"/login hunter2"`) or a bare verb; the leading
    /// slash and any arguments are ignored and the verb is matched
    /// case-insensitively. Denials push an explanatory chat line.
    pub fn allow_command(&self, id: PlayerUuid, line: &str) -> bool {
        if !self.holds.is_held(id) {
            return true;
        }
        let verb = command_verb(line);
        if BOOTSTRAP_VERBS
            .iter()
            .any(|allowed| verb.eq_ignore_ascii_case(allowed))
        {
            return true;
        }
        tracing::debug!(%id, verb, "command blocked while awaiting login");
        self.players.send_chat(id, notice::COMMANDS_BLOCKED);
        false
    }

    /// Whether `id` may interact with the world (blocks, items, entities).
    ///
    /// Denials push a short action-bar overlay rather than a chat line so
    /// repeated attempts do not flood the chat log.
    pub fn allow_interaction(&self, id: PlayerUuid) -> bool {
        if !self.holds.is_held(id) {
            return true;
        }
        self.players.send_action_bar(id, notice::INTERACTION_BLOCKED);
        false
    }
}

impl std::fmt::Debug for ActionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionGate").finish_non_exhaustive()
    }
}

/// First whitespace-delimited token of the line, minus any leading slash.
fn command_verb(line: &str) -> &str {
    let trimmed = line.trim_start().trim_start_matches('/');
    trimmed.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakePlayer, FakePlayers, FlatWorld};
    use airlock_core::{GameMode, Vec3};

    fn fixture() -> (Arc<FakePlayers>, Arc<HoldManager>, ActionGate) {
        let players = Arc::new(FakePlayers::default());
        let world = Arc::new(FlatWorld::default());
        let holds = Arc::new(HoldManager::new(players.clone(), world));
        let gate = ActionGate::new(holds.clone(), players.clone());
        (players, holds, gate)
    }

    fn held_player(players: &FakePlayers, holds: &HoldManager) -> PlayerUuid {
        let id = PlayerUuid::random();
        players.join(id, FakePlayer::default());
        holds.begin(
            id,
            GameMode::Survival,
            Vec3::new(0.0, 64.0, 0.0),
            false,
            Vec3::new(8.5, 64.0, -7.5),
        );
        id
    }

    #[test]
    fn test_allow_command_passes_everything_for_unheld_identity() {
        let (players, _, gate) = fixture();
        let id = PlayerUuid::random();
        players.join(id, FakePlayer::default());

        assert!(gate.allow_command(id, "/home"));
        assert!(gate.allow_command(id, "give diamond 64"));
        assert!(players.snapshot(id).chat.is_empty());
    }

    #[test]
    fn test_allow_command_blocks_ordinary_commands_while_held() {
        let (players, holds, gate) = fixture();
        let id = held_player(&players, &holds);

        assert!(!gate.allow_command(id, "/home"));

        let chat = players.snapshot(id).chat;
        assert_eq!(chat.len(), 1);
        assert!(chat[0].contains("/login"));
    }

    #[test]
    fn test_allow_command_permits_bootstrap_verbs_while_held() {
        let (players, holds, gate) = fixture();
        let id = held_player(&players, &holds);

        assert!(gate.allow_command(id, "/login hunter2"));
        assert!(gate.allow_command(id, "setpassword hunter2 hunter2"));
        assert!(gate.allow_command(id, "/LOGIN hunter2"));
        assert!(gate.allow_command(id, "  /Login"));
        assert!(players.snapshot(id).chat.is_empty());
    }

    #[test]
    fn test_allow_command_matches_the_verb_not_the_arguments() {
        let (players, holds, gate) = fixture();
        let id = held_player(&players, &holds);

        // A blocked verb does not sneak through by mentioning an allowed one.
        assert!(!gate.allow_command(id, "/msg admin login please"));
    }

    #[test]
    fn test_allow_interaction_blocks_and_uses_the_action_bar() {
        let (players, holds, gate) = fixture();
        let id = held_player(&players, &holds);

        assert!(!gate.allow_interaction(id));
        assert!(!gate.allow_interaction(id));

        let after = players.snapshot(id);
        assert_eq!(after.action_bar.len(), 2);
        assert!(after.chat.is_empty());
    }

    #[test]
    fn test_gate_opens_after_hold_is_released() {
        let (players, holds, gate) = fixture();
        let id = held_player(&players, &holds);
        assert!(!gate.allow_interaction(id));

        holds.complete(id);

        assert!(gate.allow_command(id, "/home"));
        assert!(gate.allow_interaction(id));
    }

    #[test]
    fn test_command_verb_extraction() {
        assert_eq!(command_verb("/login hunter2"), "login");
        assert_eq!(command_verb("login"), "login");
        assert_eq!(command_verb("  /setpassword a b"), "setpassword");
        assert_eq!(command_verb(""), "");
        assert_eq!(command_verb("/"), "");
    }
}
