//! Command-layer routing: validation, the credential operations, and the
//! chat feedback for every outcome.
//!
//! Parsing stays with the host's command tree; it hands over an
//! [`AuthCommand`] plus the issuing identity and relays the boolean
//! verdict back into its own result code. `ResetPassword` is assumed to
//! already sit behind the host's admin-permission check.

use airlock_core::{PlayerUuid, notice};

use crate::AirlockError;
use crate::service::Airlock;

/// A parsed invocation of one of the four gate commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    /// `/setpassword <password> <confirm>`
    SetPassword { password: String, confirm: String },
    /// `/login <password>`
    Login { password: String },
    /// `/changepassword <old> <new> <confirm>`
    ChangePassword {
        old: String,
        new: String,
        confirm: String,
    },
    /// `/resetpassword <target>` (admin only, enforced by the host)
    ResetPassword { target: PlayerUuid },
}

impl Airlock {
    /// Execute a command for `source`, sending feedback for every outcome.
    ///
    /// Returns whether the command succeeded.
    pub fn dispatch(&self, source: PlayerUuid, command: AuthCommand) -> bool {
        match command {
            AuthCommand::SetPassword { password, confirm } => {
                self.handle_set_password(source, &password, &confirm)
            }
            AuthCommand::Login { password } => self.handle_login(source, &password),
            AuthCommand::ChangePassword { old, new, confirm } => {
                self.handle_change_password(source, &old, &new, &confirm)
            }
            AuthCommand::ResetPassword { target } => self.handle_reset_password(source, target),
        }
    }

    /// The set-password verb serves two situations: first-time registration
    /// for a held player, and an authenticated player replacing their own
    /// credential. The remaining two combinations are told what to do
    /// instead.
    fn handle_set_password(&self, source: PlayerUuid, password: &str, confirm: &str) -> bool {
        if !self.validate_new_password(source, password, confirm) {
            return false;
        }
        match (self.is_held(source), self.has_password(source)) {
            (true, false) => match self.register(source, password) {
                Ok(()) => {
                    self.players
                        .send_chat(source, notice::REGISTERED_AND_LOGGED_IN);
                    true
                }
                Err(error) => self.report_unexpected(source, &error),
            },
            (false, true) => match self.reset_and_set_password(source, password) {
                Ok(()) => {
                    self.players.send_chat(source, notice::PASSWORD_RESET_OWN);
                    true
                }
                Err(error) => self.report_unexpected(source, &error),
            },
            (true, true) => {
                self.players.send_chat(source, notice::ALREADY_REGISTERED);
                false
            }
            (false, false) => {
                self.players.send_chat(source, notice::NO_PASSWORD_NEEDED);
                false
            }
        }
    }

    fn handle_login(&self, source: PlayerUuid, password: &str) -> bool {
        match self.authenticate(source, password) {
            Ok(()) => {
                self.players.send_chat(source, notice::LOGIN_OK);
                true
            }
            Err(AirlockError::NotHeld) => {
                self.players
                    .send_chat(source, notice::ALREADY_AUTHENTICATED);
                false
            }
            Err(AirlockError::NotRegistered) => {
                self.players.send_chat(source, notice::NOT_REGISTERED_YET);
                false
            }
            Err(AirlockError::WrongPassword) => {
                self.players.send_chat(source, notice::WRONG_PASSWORD);
                false
            }
            Err(error) => self.report_unexpected(source, &error),
        }
    }

    fn handle_change_password(
        &self,
        source: PlayerUuid,
        old: &str,
        new: &str,
        confirm: &str,
    ) -> bool {
        if !self.validate_new_password(source, new, confirm) {
            return false;
        }
        match self.change_password(source, old, new) {
            Ok(()) => {
                self.players.send_chat(source, notice::PASSWORD_CHANGED);
                true
            }
            Err(AirlockError::StillHeld) => {
                self.players.send_chat(source, notice::MUST_BE_LOGGED_IN);
                false
            }
            Err(AirlockError::NotRegistered) => {
                self.players.send_chat(source, notice::NOT_REGISTERED_YET);
                false
            }
            Err(AirlockError::WrongPassword) => {
                self.players.send_chat(source, notice::WRONG_OLD_PASSWORD);
                false
            }
            Err(error) => self.report_unexpected(source, &error),
        }
    }

    fn handle_reset_password(&self, source: PlayerUuid, target: PlayerUuid) -> bool {
        let target_name = self
            .players
            .name(target)
            .unwrap_or_else(|| target.to_string());
        match self.admin_reset_password(target) {
            Ok(()) => {
                self.players
                    .send_chat(source, &notice::admin_reset_done(&target_name));
                true
            }
            Err(AirlockError::NotRegistered) => {
                self.players
                    .send_chat(source, &notice::target_not_registered(&target_name));
                false
            }
            Err(error) => self.report_unexpected(source, &error),
        }
    }

    /// Confirmation must match before length is judged, so a typo in the
    /// confirm field is reported as a mismatch rather than a length error.
    fn validate_new_password(&self, source: PlayerUuid, password: &str, confirm: &str) -> bool {
        if password != confirm {
            self.players
                .send_chat(source, notice::PASSWORDS_DO_NOT_MATCH);
            return false;
        }
        // Counted in characters, not bytes.
        if password.chars().count() < self.config.min_password_len {
            self.players.send_chat(
                source,
                &notice::password_too_short(self.config.min_password_len),
            );
            return false;
        }
        true
    }

    /// Errors no command path expects to see. The player gets one generic
    /// line; the log gets the real error.
    fn report_unexpected(&self, source: PlayerUuid, error: &AirlockError) -> bool {
        tracing::error!(%source, %error, "command failed unexpectedly");
        self.players.send_chat(source, notice::INTERNAL_ERROR);
        false
    }
}
