use error_stack::{Report, Result};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{PlayerStore, StoreError};
use crate::schema::RegisteredPlayer;

/// Keeps players in memory, keyed by their folded nickname.
///
/// Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: RwLock<HashMap<String, RegisteredPlayer>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_players(players: impl IntoIterator<Item = RegisteredPlayer>) -> Self {
        let players = players
            .into_iter()
            .map(|v| (v.lowercase_nickname.clone(), v))
            .collect();

        Self {
            players: RwLock::new(players),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, lowercase_nickname: &str) -> Option<RegisteredPlayer> {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(lowercase_nickname)
            .cloned()
    }
}

impl PlayerStore for MemoryStore {
    async fn query_by_email(&self, email: &str) -> Result<Vec<RegisteredPlayer>, StoreError> {
        let players = self.players.read().unwrap_or_else(PoisonError::into_inner);
        Ok(players
            .values()
            .filter(|v| v.email.to_lowercase() == email.to_lowercase())
            .cloned()
            .collect())
    }

    async fn exists_by_key(&self, lowercase_nickname: &str) -> Result<bool, StoreError> {
        let players = self.players.read().unwrap_or_else(PoisonError::into_inner);
        Ok(players.contains_key(lowercase_nickname))
    }

    async fn create(&self, player: &RegisteredPlayer) -> Result<(), StoreError> {
        let mut players = self.players.write().unwrap_or_else(PoisonError::into_inner);

        if players.contains_key(&player.lowercase_nickname) {
            return Err(Report::new(StoreError::Conflict)
                .attach_printable(format!("nickname: {}", player.lowercase_nickname)));
        }

        let email = player.email.to_lowercase();
        if players.values().any(|v| v.email.to_lowercase() == email) {
            return Err(Report::new(StoreError::Conflict).attach_printable("email is already used"));
        }

        players.insert(player.lowercase_nickname.clone(), player.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(MemoryStore: Send, Sync);

    fn player(nickname: &str, email: &str) -> RegisteredPlayer {
        RegisteredPlayer::new(nickname, "hash".into(), email)
    }

    #[tokio::test]
    async fn query_by_email_ignores_case() {
        let store = MemoryStore::with_players([player("Steve", "Foo@Bar.com")]);

        let found = store.query_by_email("foo@bar.com").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].nickname, "Steve");

        assert!(store.query_by_email("other@bar.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn exists_by_key() {
        let store = MemoryStore::with_players([player("Steve", "steve@example.com")]);
        assert!(store.exists_by_key("steve").await.unwrap());
        assert!(!store.exists_by_key("Steve").await.unwrap());
        assert!(!store.exists_by_key("alex").await.unwrap());
    }

    #[tokio::test]
    async fn create_enforces_uniqueness() {
        let store = MemoryStore::new();
        store.create(&player("Steve", "steve@example.com")).await.unwrap();
        assert_eq!(store.len(), 1);

        let error = store
            .create(&player("STEVE", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), StoreError::Conflict));

        let error = store
            .create(&player("Alex", "Steve@Example.com"))
            .await
            .unwrap_err();
        assert!(matches!(error.current_context(), StoreError::Conflict));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("steve").unwrap().email, "steve@example.com");
    }
}
