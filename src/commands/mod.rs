use std::net::IpAddr;

mod force_register;
mod outcome;
mod ratelimit;

pub use self::force_register::{ForceRegister, ForceRegisterError, PERMISSION};
pub use self::outcome::Outcome;
pub use self::ratelimit::RateLimiter;

/// Whoever invoked a command: the console or a connected player.
pub trait CommandSource {
    fn has_permission(&self, node: &str) -> bool;

    fn send_message(&self, message: &str);

    /// Address of a connected player. The console has none.
    fn remote_addr(&self) -> Option<IpAddr> {
        None
    }
}
