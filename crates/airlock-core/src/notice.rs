//! User-facing message copy.
//!
//! Every line of text a player can see lives here, so wording stays
//! consistent across the gate, the command handlers, and the lifecycle
//! flow. Internal failures deliberately map to one generic line
//! ([`INTERNAL_ERROR`]) so nothing about the server's internals leaks
//! into chat.

// -- Gate denials -----------------------------------------------------------

/// Chat notice when a held player tries any non-bootstrap command.
/// Names both allowed verbs so the player knows how to proceed.
pub const COMMANDS_BLOCKED: &str =
    "You must log in first. Use /login or /setpassword.";

/// Action-bar notice when a held player tries to interact with the world.
/// Delivered on the action bar, not in chat, so repeated attempts do not
/// scroll the chat history.
pub const INTERACTION_BLOCKED: &str = "You must log in to interact.";

// -- Join flow --------------------------------------------------------------

/// Greeting for a returning, registered player.
pub const WELCOME_REGISTERED: &str =
    "Welcome back! Log in with /login <password>";

/// Greeting for a player with no password on record.
pub const WELCOME_UNREGISTERED: &str =
    "Welcome! This server is password protected.";

/// Follow-up prompt telling an unregistered player how to register.
pub const SET_PASSWORD_PROMPT: &str =
    "Set a password with /setpassword <password> <confirm>";

// -- Command feedback -------------------------------------------------------

/// The two password arguments of /setpassword or /changepassword differ.
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";

/// A held player with a password tried /setpassword instead of /login.
pub const ALREADY_REGISTERED: &str =
    "You already have a password. Use /login <password>.";

/// A held player tried /login without having registered first.
pub const NOT_REGISTERED_YET: &str =
    "You have no password yet. Use /setpassword <password> <confirm>.";

/// An authenticated, unregistered player tried /setpassword. Nothing to do.
pub const NO_PASSWORD_NEEDED: &str =
    "You do not need to set a password right now.";

/// First-time registration succeeded and the player was logged straight in.
pub const REGISTERED_AND_LOGGED_IN: &str =
    "Password set. You are now logged in.";

/// Successful /login.
pub const LOGIN_OK: &str = "Login successful. Welcome back!";

/// Wrong password on /login.
pub const WRONG_PASSWORD: &str = "Incorrect password.";

/// Wrong old password on /changepassword.
pub const WRONG_OLD_PASSWORD: &str = "Old password is incorrect.";

/// /login while not awaiting authentication.
pub const ALREADY_AUTHENTICATED: &str = "You are already logged in.";

/// /changepassword while still awaiting authentication.
pub const MUST_BE_LOGGED_IN: &str =
    "You must be logged in to change your password.";

/// Successful /changepassword.
pub const PASSWORD_CHANGED: &str = "Password changed.";

/// Authenticated player replaced their own password via /setpassword.
pub const PASSWORD_RESET_OWN: &str = "Password reset.";

/// Something failed inside the server. Deliberately vague.
pub const INTERNAL_ERROR: &str =
    "Something went wrong. Please contact an administrator.";

// -- Admin reset ------------------------------------------------------------

/// Sent to a player whose credential an administrator just removed.
pub const RESET_BY_ADMIN: &str =
    "Your password has been reset by an administrator.";

/// Follow-up prompt after an admin reset.
pub const RESET_CHOOSE_NEW: &str =
    "Choose a new password with /setpassword <password> <confirm>";

/// Confirmation sent to the administrator after a successful reset.
pub fn admin_reset_done(target: &str) -> String {
    format!("Password for {target} has been reset.")
}

/// Told to the administrator when the target has no password to reset.
pub fn target_not_registered(target: &str) -> String {
    format!("{target} has no password set.")
}

/// Rejection for a password shorter than the configured minimum.
pub fn password_too_short(min_len: usize) -> String {
    format!("Password must be at least {min_len} characters long.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short_names_the_minimum() {
        assert_eq!(
            password_too_short(4),
            "Password must be at least 4 characters long."
        );
    }

    #[test]
    fn test_admin_reset_done_names_the_target() {
        assert_eq!(
            admin_reset_done("alice"),
            "Password for alice has been reset."
        );
    }

    #[test]
    fn test_commands_blocked_names_both_bootstrap_verbs() {
        // The denial line must tell a held player exactly which commands
        // are still available to them.
        assert!(COMMANDS_BLOCKED.contains("/login"));
        assert!(COMMANDS_BLOCKED.contains("/setpassword"));
    }
}
