use error_stack::{Result, ResultExt};

use super::{PlayerStore, StoreError};
use crate::database::{self, Pool, ReportExt};
use crate::schema::RegisteredPlayer;

/// Players stored in Postgres through the shared [`Pool`].
#[derive(Debug, Clone)]
pub struct PgPlayerStore {
    pool: Pool,
}

impl PgPlayerStore {
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Connects to the database and applies pending migrations.
    pub async fn connect(cfg: &crate::config::Database) -> database::Result<Self> {
        let pool = Pool::new(cfg).await?;
        database::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }
}

impl PlayerStore for PgPlayerStore {
    #[tracing::instrument(skip_all, name = "store.pg.query_by_email")]
    async fn query_by_email(&self, email: &str) -> Result<Vec<RegisteredPlayer>, StoreError> {
        let mut conn = self.pool.get().await.change_context(StoreError::Read)?;
        RegisteredPlayer::by_email(&mut conn, email)
            .await
            .change_context(StoreError::Read)
    }

    #[tracing::instrument(skip(self), name = "store.pg.exists_by_key")]
    async fn exists_by_key(&self, lowercase_nickname: &str) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.change_context(StoreError::Read)?;
        RegisteredPlayer::exists(&mut conn, lowercase_nickname)
            .await
            .change_context(StoreError::Read)
    }

    #[tracing::instrument(skip_all, name = "store.pg.create", fields(nickname = %player.nickname))]
    async fn create(&self, player: &RegisteredPlayer) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.change_context(StoreError::Write)?;
        player.insert(&mut conn).await.map_err(|e| {
            let context = if e.is_unique_violation() {
                StoreError::Conflict
            } else {
                StoreError::Write
            };
            e.change_context(context)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(PgPlayerStore: Send, Sync, Clone);
}
