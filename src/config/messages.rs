use serde::Deserialize;

/// Messages sent back to whoever ran a command.
///
/// `{0}` in `successful` and `not_successful` is replaced with
/// the player's nickname.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub usage: String,
    pub ratelimited: String,
    pub incorrect_nickname: String,
    pub taken_nickname: String,
    pub invalid_email: String,
    pub email_plus_not_allowed: String,
    pub email_too_short: String,
    pub email_looks_random: String,
    pub email_already_used: String,
    pub email_domain_not_allowed: String,
    pub email_domain_blocked: String,
    pub successful: String,
    pub not_successful: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            usage: "Usage: /forceregister <nickname> <password> <email>".into(),
            ratelimited: "You are doing this too often, please try again later.".into(),
            incorrect_nickname: "The nickname contains forbidden characters.".into(),
            taken_nickname: "This nickname is already taken.".into(),
            invalid_email: "This email address is invalid.".into(),
            email_plus_not_allowed: "Email addresses with '+' are not allowed.".into(),
            email_too_short: "This email address is too short.".into(),
            email_looks_random: "This email address looks randomly generated.".into(),
            email_already_used: "This email address is already in use.".into(),
            email_domain_not_allowed: "Email addresses from this domain are not allowed.".into(),
            email_domain_blocked: "Email addresses from this domain are blocked.".into(),
            successful: "Successfully registered player {0}.".into(),
            not_successful: "Unable to register player {0}.".into(),
        }
    }
}
