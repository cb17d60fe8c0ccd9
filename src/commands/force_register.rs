use error_stack::{Report, Result, ResultExt};
use thiserror::Error;

use super::{CommandSource, Outcome, RateLimiter};
use crate::config::{Config, Messages, PermissionState};
use crate::email::{self, InvalidPolicy, Policy, Rejection};
use crate::schema::RegisteredPlayer;
use crate::store::PlayerStore;
use crate::util::{password, Sensitive};

/// Permission node a source needs to force-register players.
pub const PERMISSION: &str = "warden.admin.forceregister";

#[derive(Debug, Error)]
#[error("Failed to force-register player")]
pub struct ForceRegisterError;

/// Registers a player on behalf of an operator, bypassing the usual
/// self-registration flow while still applying the email policy and
/// uniqueness rules.
#[derive(Debug)]
pub struct ForceRegister<S> {
    policy: Policy,
    messages: Messages,
    permission: PermissionState,
    limiter: RateLimiter,
    store: S,
}

/// Stops the registration early, either with a reply for the source
/// or with an error that also has to reach the operator.
enum Halt {
    Reject(Outcome),
    Failed(Report<ForceRegisterError>),
}

impl From<Outcome> for Halt {
    fn from(value: Outcome) -> Self {
        Self::Reject(value)
    }
}

impl From<Rejection> for Halt {
    fn from(value: Rejection) -> Self {
        Self::Reject(value.into())
    }
}

impl From<Report<ForceRegisterError>> for Halt {
    fn from(value: Report<ForceRegisterError>) -> Self {
        Self::Failed(value)
    }
}

impl<S: PlayerStore> ForceRegister<S> {
    #[must_use]
    pub fn new(
        policy: Policy,
        messages: Messages,
        permission: PermissionState,
        limiter: RateLimiter,
        store: S,
    ) -> Self {
        Self {
            policy,
            messages,
            permission,
            limiter,
            store,
        }
    }

    pub fn from_config(cfg: &Config, store: S) -> Result<Self, InvalidPolicy> {
        Ok(Self::new(
            Policy::new(&cfg.policy)?,
            cfg.messages.clone(),
            cfg.permissions.force_register,
            RateLimiter::from_config(&cfg.ratelimit),
            store,
        ))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs the command with the arguments `<nickname> <password> <email>`.
    ///
    /// The outcome's message is sent to `source` before returning.
    /// If the store or password hashing fails, the source is told that
    /// the registration was not successful and the error is returned.
    #[tracing::instrument(
        skip_all,
        name = "commands.force_register",
        fields(nickname = tracing::field::Empty)
    )]
    pub async fn execute<C>(&self, source: &C, args: &[&str]) -> Result<Outcome, ForceRegisterError>
    where
        C: CommandSource + ?Sized,
    {
        if !self.permission.has_permission(source, PERMISSION) {
            tracing::debug!("source has no permission to run this command");
            return Ok(Outcome::NoPermission);
        }

        if let Some(ip) = source.remote_addr() {
            if !self.limiter.attempt(ip).await {
                return Ok(self.reply(source, Outcome::Ratelimited));
            }
        }

        let [nickname, password, email] = args else {
            return Ok(self.reply(source, Outcome::Usage));
        };
        tracing::Span::current().record("nickname", nickname);

        match self.register(nickname, password, email).await {
            Ok(()) => Ok(self.reply(source, Outcome::Successful((*nickname).to_string()))),
            Err(Halt::Reject(outcome)) => {
                tracing::debug!(?outcome, "registration rejected");
                Ok(self.reply(source, outcome))
            }
            Err(Halt::Failed(error)) => {
                tracing::error!(?error, "could not register player");
                self.reply(source, Outcome::NotSuccessful((*nickname).to_string()));
                Err(error)
            }
        }
    }

    fn reply<C: CommandSource + ?Sized>(&self, source: &C, outcome: Outcome) -> Outcome {
        if let Some(message) = outcome.render(&self.messages) {
            source.send_message(&message);
        }
        outcome
    }

    async fn register(
        &self,
        nickname: &str,
        password: &str,
        email: &str,
    ) -> std::result::Result<(), Halt> {
        let address = self.check_input(nickname, email)?;

        let used = self
            .store
            .query_by_email(email)
            .await
            .change_context(ForceRegisterError)
            .attach_printable("could not look up players by email")?;

        if !used.is_empty() {
            return Err(Outcome::EmailAlreadyUsed.into());
        }
        self.policy.check_domain(&address)?;

        let key = RegisteredPlayer::fold_nickname(nickname);
        let taken = self
            .store
            .exists_by_key(&key)
            .await
            .change_context(ForceRegisterError)
            .attach_printable("could not look up player by nickname")?;

        if taken {
            return Err(Outcome::TakenNickname.into());
        }

        let hash = hash_password(Sensitive::new(password.to_string())).await?;
        let player = RegisteredPlayer::new(nickname, hash, email);

        self.store
            .create(&player)
            .await
            .change_context(ForceRegisterError)
            .attach_printable("could not save player")?;

        tracing::info!(nickname, "player has been force-registered");
        Ok(())
    }

    /// Checks that do not need the store, in the order they have
    /// to be applied.
    fn check_input<'a>(
        &self,
        nickname: &str,
        email: &'a str,
    ) -> std::result::Result<email::EmailAddress<'a>, Halt> {
        if !self.policy.matches_nickname(nickname) {
            return Err(Outcome::IncorrectNickname.into());
        }

        if !self.policy.matches_email(email) {
            return Err(Outcome::InvalidEmail.into());
        }

        let address = self
            .policy
            .parse_email(email)
            .ok_or(Outcome::InvalidEmail)?;

        self.policy.check_plus(&address)?;
        self.policy.check_length(&address)?;
        self.policy.check_random(&address)?;

        Ok(address)
    }
}

async fn hash_password(password: Sensitive<String>) -> Result<String, ForceRegisterError> {
    tokio::task::spawn_blocking(move || password::hash(password.as_str()))
        .await
        .change_context(ForceRegisterError)?
        .change_context(ForceRegisterError)
}
