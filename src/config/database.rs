use serde::Deserialize;
use std::num::{NonZeroU32, NonZeroU64};
use validator::{Validate, ValidateError};

use crate::util::Sensitive;

/// Configuration for connecting to the Postgres database where
/// registered players are stored.
#[derive(Debug, Deserialize)]
pub struct Database {
    /// Connection URL connecting to the Postgres database.
    ///
    /// **Environment variables**:
    /// - `WARDEN_DATABASE_URL` or `DATABASE_URL`
    pub url: Sensitive<String>,
    /// Minimum idle database connections just to avoid wasting
    /// hardware resources from the database server.
    ///
    /// **Environment variables**:
    /// - `WARDEN_DATABASE_MIN_IDLE`
    pub min_idle: Option<NonZeroU32>,
    /// Maximum amount of pool size that database can handle
    ///
    /// **Environment variables**:
    /// - `WARDEN_DATABASE_POOL_SIZE`
    #[serde(default = "Database::default_pool_size")]
    pub pool_size: NonZeroU32,
    /// Forces all database connections are encrypted with TLS
    /// (if possible).
    ///
    /// **Environment variables**:
    /// - `WARDEN_DATABASE_ENFORCE_TLS`
    #[serde(default = "Database::default_enforce_tls")]
    pub enforce_tls: bool,
    /// How long to wait for a connection to be acquired before
    /// giving up.
    ///
    /// **Environment variables**:
    /// - `WARDEN_DATABASE_TIMEOUT_SECS`
    #[serde(default = "Database::default_timeout_secs")]
    pub timeout_secs: NonZeroU64,
}

impl Database {
    const DEFAULT_POOL_SIZE: u32 = 5;
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    // Required by serde
    const fn default_pool_size() -> NonZeroU32 {
        match NonZeroU32::new(Self::DEFAULT_POOL_SIZE) {
            Some(n) => n,
            None => panic!("DEFAULT_POOL_SIZE is accidentally set to 0"),
        }
    }

    const fn default_timeout_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TIMEOUT_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TIMEOUT_SECS is accidentally set to 0"),
        }
    }

    const fn default_enforce_tls() -> bool {
        true
    }
}

impl Validate for Database {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();

        let mut msg = ValidateError::msg_builder();
        msg.check(
            !validator::extras::validate_url(self.url.as_str()),
            "Invalid Postgres connection URL",
        );
        fields.insert("url", msg.build());

        let mut msg = ValidateError::msg_builder();
        msg.check(
            self.min_idle.is_some_and(|v| v > self.pool_size),
            "must not exceed `pool_size`",
        );
        fields.insert("min_idle", msg.build());

        fields.build().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database(url: &str) -> Database {
        Database {
            url: Sensitive::new(url.to_string()),
            min_idle: None,
            pool_size: Database::default_pool_size(),
            enforce_tls: true,
            timeout_secs: Database::default_timeout_secs(),
        }
    }

    #[test]
    fn validates_url() {
        assert!(database("postgres://warden@localhost/warden").validate().is_ok());
        assert!(database("warden").validate().is_err());
    }

    #[test]
    fn validates_min_idle() {
        let mut config = database("postgres://localhost/warden");
        config.min_idle = NonZeroU32::new(6);
        assert!(config.validate().is_err());

        config.min_idle = NonZeroU32::new(5);
        assert!(config.validate().is_ok());
    }
}
