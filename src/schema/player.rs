use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::database::{Connection, ErrorExt, Result};

/// A player account as it is stored in the `players` table.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct RegisteredPlayer {
    pub nickname: String,
    /// Unique key of the player, see [`RegisteredPlayer::fold_nickname`].
    pub lowercase_nickname: String,
    /// Argon2id PHC string of the player's password.
    pub hash: String,
    pub email: String,
    /// Last known address, empty for force-registered players.
    pub ip: String,
    pub uuid: String,
    pub premium_uuid: String,
    pub reg_date: DateTime<Utc>,
}

impl RegisteredPlayer {
    /// Creates a player registered by an operator. It has not joined
    /// the server yet, so `ip`, `uuid` and `premium_uuid` stay empty.
    #[must_use]
    pub fn new(nickname: &str, hash: String, email: &str) -> Self {
        Self {
            nickname: nickname.to_string(),
            lowercase_nickname: Self::fold_nickname(nickname),
            hash,
            email: email.to_string(),
            ip: String::new(),
            uuid: String::new(),
            premium_uuid: String::new(),
            reg_date: Utc::now(),
        }
    }

    /// Nicknames are unique regardless of their casing.
    #[must_use]
    pub fn fold_nickname(nickname: &str) -> String {
        nickname.to_lowercase()
    }
}

impl RegisteredPlayer {
    #[tracing::instrument(skip(conn, email), fields(email = "<hidden>"))]
    pub async fn by_email(conn: &mut Connection, email: &str) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(r#"SELECT * FROM "players" WHERE LOWER(email) = LOWER($1)"#)
            .bind(email)
            .fetch_all(conn)
            .await
            .into_db_error()
    }

    #[tracing::instrument(skip(conn))]
    pub async fn exists(conn: &mut Connection, lowercase_nickname: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM "players" WHERE lowercase_nickname = $1)"#,
        )
        .bind(lowercase_nickname)
        .fetch_one(conn)
        .await
        .into_db_error()
    }

    #[tracing::instrument(skip_all, fields(nickname = %self.nickname))]
    pub async fn insert(&self, conn: &mut Connection) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO "players"
                (nickname, lowercase_nickname, hash, email, ip, uuid, premium_uuid, reg_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(&self.nickname)
        .bind(&self.lowercase_nickname)
        .bind(&self.hash)
        .bind(&self.email)
        .bind(&self.ip)
        .bind(&self.uuid)
        .bind(&self.premium_uuid)
        .bind(self.reg_date)
        .execute(conn)
        .await
        .into_db_error()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_is_keyed_by_folded_nickname() {
        let player = RegisteredPlayer::new("Steve", "$argon2id$...".into(), "Steve@Example.com");
        assert_eq!(player.nickname, "Steve");
        assert_eq!(player.lowercase_nickname, "steve");
        // stored as supplied
        assert_eq!(player.email, "Steve@Example.com");
        assert!(player.ip.is_empty());
        assert!(player.uuid.is_empty());
        assert!(player.premium_uuid.is_empty());
    }

    #[test]
    fn fold_nickname() {
        assert_eq!(RegisteredPlayer::fold_nickname("NOTCH_2009"), "notch_2009");
        assert_eq!(RegisteredPlayer::fold_nickname("steve"), "steve");
    }
}
