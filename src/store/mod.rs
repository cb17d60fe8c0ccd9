use error_stack::Result;
use thiserror::Error;

use crate::schema::RegisteredPlayer;

mod memory;
mod postgres;

pub use self::memory::MemoryStore;
pub use self::postgres::PgPlayerStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read players")]
    Read,
    #[error("Failed to write player")]
    Write,
    /// Another player already holds the same nickname or email.
    #[error("Player already exists")]
    Conflict,
}

/// Storage of registered players.
///
/// Lookups never mutate anything. [`PlayerStore::create`] has to
/// enforce uniqueness of both the folded nickname and the email by
/// itself, since callers only check them beforehand without holding
/// any lock.
#[allow(async_fn_in_trait)]
pub trait PlayerStore: Send + Sync {
    /// Every player whose email equals `email`, ignoring case.
    async fn query_by_email(&self, email: &str) -> Result<Vec<RegisteredPlayer>, StoreError>;

    async fn exists_by_key(&self, lowercase_nickname: &str) -> Result<bool, StoreError>;

    async fn create(&self, player: &RegisteredPlayer) -> Result<(), StoreError>;
}
