use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidateError};

use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport};

mod database;
mod logging;
mod messages;
mod permissions;
mod policy;
mod ratelimit;

pub use self::database::Database;
pub use self::logging::{Logging, LoggingStyle};
pub use self::messages::Messages;
pub use self::permissions::{PermissionState, Permissions};
pub use self::policy::Policy;
pub use self::ratelimit::Ratelimit;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ConfigError;

/// Configuration of the whole warden process.
///
/// Every section has defaults except `database`, which is only
/// needed when players are stored in Postgres.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub messages: Messages,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default)]
    pub ratelimit: Ratelimit,
    #[serde(default)]
    pub logging: Logging,
    /// **Environment variables**:
    /// - `WARDEN_DATABASE_URL` or `DATABASE_URL`
    pub database: Option<Database>,
}

impl Config {
    const DEFAULT_CONFIG_FILE: &'static str = "warden.toml";

    /// Loads the configuration from `warden.toml` (or the file in
    /// `WARDEN_CONFIG`) and the environment, then validates it.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ConfigError).attach_figment_error(e))?;

        config
            .validate()
            .into_validator_report()
            .change_context(ConfigError)?;

        Ok(config)
    }

    /// Creates a default [`Figment`] object to load the configuration.
    ///
    /// [`Figment`]: figment::Figment
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        let file = std::env::var("WARDEN_CONFIG")
            .unwrap_or_else(|_| Self::DEFAULT_CONFIG_FILE.to_string());

        Figment::new()
            .merge(Toml::file(file))
            // Section names have no underscores, only the first one
            // separates the section from the key.
            .merge(
                Env::prefixed("WARDEN_")
                    .ignore(&["CONFIG"])
                    .map(|v| v.as_str().replacen('_', ".", 1).into()),
            )
            // Environment variable aliases
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL"])
                    .map(|_| "database.url".into()),
            )
    }
}

impl Validate for Config {
    fn validate(&self) -> std::result::Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        fields.nested("policy", &self.policy);
        fields.nested("database", &self.database);
        fields.build().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::num::{NonZeroU32, NonZeroU64};

    #[test]
    fn defaults_without_any_source() {
        Jail::expect_with(|_| {
            let config: Config = Config::figment().extract()?;
            assert_eq!(config.permissions.force_register, PermissionState::Permission);
            assert_eq!(config.policy, Policy::default());
            assert!(config.validate().is_ok());
            Ok(())
        });
    }

    #[test]
    fn reads_config_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "warden.toml",
                r#"
                [policy]
                block_plus_emails = true
                min_email_local_length = 5
                allowed_email_domains = ["example.com"]

                [permissions]
                force_register = "deny"

                [messages]
                successful = "welcome {0}"
                "#,
            )?;

            let config: Config = Config::figment().extract()?;
            assert!(config.policy.block_plus_emails);
            assert_eq!(config.policy.min_email_local_length, 5);
            assert_eq!(config.policy.allowed_email_domains, vec!["example.com"]);
            assert_eq!(config.permissions.force_register, PermissionState::Deny);
            assert_eq!(config.messages.successful, "welcome {0}");
            // untouched sections keep their defaults
            assert_eq!(config.messages.usage, Messages::default().usage);
            Ok(())
        });
    }

    #[test]
    fn custom_config_file_location() {
        Jail::expect_with(|jail| {
            jail.create_file("other.toml", "[ratelimit]\nmax_attempts = 9")?;
            jail.set_env("WARDEN_CONFIG", "other.toml");

            let config: Config = Config::figment().extract()?;
            assert_eq!(config.ratelimit.max_attempts, NonZeroU32::new(9).unwrap());
            Ok(())
        });
    }

    #[test]
    fn env_aliases() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/warden");
            jail.set_env("WARDEN_DATABASE_POOL_SIZE", "12");
            jail.set_env("WARDEN_DATABASE_ENFORCE_TLS", "false");
            jail.set_env("WARDEN_DATABASE_TIMEOUT_SECS", "30");

            jail.set_env("WARDEN_POLICY_BLOCK_RANDOM_EMAILS", "false");
            jail.set_env("WARDEN_POLICY_MIN_EMAIL_LOCAL_LENGTH", "1");
            jail.set_env("WARDEN_RATELIMIT_REFILL_SECS", "60");
            jail.set_env("WARDEN_PERMISSIONS_FORCE_REGISTER", "allow");
            jail.set_env("WARDEN_POLICY_BLOCKED_EMAIL_DOMAINS", "[spam.com, junk.org]");
            jail.set_env("WARDEN_MESSAGES_TAKEN_NICKNAME", "taken!");
            jail.set_env("WARDEN_LOGGING_STYLE", "pretty");

            let config: Config = Config::figment().extract()?;
            let database = config.database.unwrap();
            assert_eq!(database.url.as_str(), "postgres://localhost/warden");
            assert_eq!(database.pool_size, NonZeroU32::new(12).unwrap());
            assert!(!database.enforce_tls);
            assert_eq!(database.timeout_secs, NonZeroU64::new(30).unwrap());

            assert!(!config.policy.block_random_emails);
            assert_eq!(config.policy.min_email_local_length, 1);
            assert_eq!(config.ratelimit.refill_secs, NonZeroU64::new(60).unwrap());
            assert_eq!(config.permissions.force_register, PermissionState::Allow);
            assert_eq!(config.policy.blocked_email_domains, vec!["spam.com", "junk.org"]);
            assert_eq!(config.messages.taken_nickname, "taken!");
            assert_eq!(config.logging.style, LoggingStyle::Pretty);
            Ok(())
        });
    }

    #[test]
    fn load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "warden.toml",
                r#"
                [policy]
                email_pattern = "[a-z"
                blocked_email_domains = ["not a domain"]
                "#,
            )?;

            let report = Config::load().unwrap_err();
            let output = format!("{report:?}");
            assert!(output.contains("policy.email_pattern"), "{output}");
            assert!(output.contains("policy.blocked_email_domains"), "{output}");
            Ok(())
        });
    }
}
