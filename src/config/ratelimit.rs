use serde::Deserialize;
use std::num::{NonZeroU32, NonZeroU64};
use std::time::Duration;

/// Limits how often a player (identified by their address) may
/// run administrative commands. The console is never limited.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ratelimit {
    /// Attempts a player may make before being limited.
    ///
    /// **Environment variables**:
    /// - `WARDEN_RATELIMIT_MAX_ATTEMPTS`
    pub max_attempts: NonZeroU32,
    /// Seconds it takes to regain one attempt.
    ///
    /// **Environment variables**:
    /// - `WARDEN_RATELIMIT_REFILL_SECS`
    pub refill_secs: NonZeroU64,
}

impl Ratelimit {
    #[must_use]
    pub fn refill_interval(&self) -> Duration {
        Duration::from_secs(self.refill_secs.get())
    }
}

impl Default for Ratelimit {
    fn default() -> Self {
        const DEFAULT_MAX_ATTEMPTS: NonZeroU32 = match NonZeroU32::new(3) {
            Some(n) => n,
            None => panic!("DEFAULT_MAX_ATTEMPTS is accidentally set to 0"),
        };
        const DEFAULT_REFILL_SECS: NonZeroU64 = match NonZeroU64::new(10) {
            Some(n) => n,
            None => panic!("DEFAULT_REFILL_SECS is accidentally set to 0"),
        };

        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            refill_secs: DEFAULT_REFILL_SECS,
        }
    }
}
