//! Opaque bearer token lifecycle: issue, lookup, expire, delete.
//!
//! An expired-token lookup deletes only the token it found; bulk cleanup of
//! other expired rows runs from an explicitly scheduled sweep, never from the
//! request path. Deleting an already-deleted token is a no-op, so concurrent
//! lookups of the same expired token may race on the delete harmlessly.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::user::{TokenRow, User};

/// Fixed validity window from creation.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Interval between scheduled expired-token sweeps.
const SWEEP_INTERVAL_SECS: u64 = 3600;

/// Opaque token value: a v4 UUID with a millisecond timestamp suffix.
pub fn new_token_value() -> String {
    format!("{}-{}", Uuid::new_v4(), Utc::now().timestamp_millis())
}

/// Issues a fresh token for `user_id` and returns its value.
pub async fn issue(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = new_token_value();
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO tokens (token, user_id, created_at, expires_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(&token)
    .bind(user_id)
    .bind(now)
    .bind(now + Duration::hours(TOKEN_TTL_HOURS))
    .execute(pool)
    .await?;
    Ok(token)
}

/// Resolves a token to its user. An expired token is deleted (that one row
/// only) and treated as absent.
pub async fn lookup_user(pool: &PgPool, token: &str) -> Result<Option<User>, sqlx::Error> {
    let row: Option<TokenRow> = sqlx::query_as("SELECT * FROM tokens WHERE token = $1")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    if row.is_expired(Utc::now()) {
        delete(pool, token).await?;
        return Ok(None);
    }

    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(row.user_id)
        .fetch_optional(pool)
        .await
}

/// Deletes a token. No-op when the token does not exist.
pub async fn delete(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM tokens WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Removes every expired token. Returns the number of rows deleted.
pub async fn sweep_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tokens WHERE expires_at < $1")
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Spawns the background task that sweeps expired tokens on a fixed interval.
pub fn spawn_sweeper(pool: PgPool) {
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(SWEEP_INTERVAL_SECS));
        // The first tick fires immediately, clearing anything left over from
        // a previous run.
        loop {
            interval.tick().await;
            match sweep_expired(&pool).await {
                Ok(0) => {}
                Ok(n) => info!("token sweep removed {n} expired tokens"),
                Err(e) => warn!("token sweep failed: {e}"),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_values_are_unique_and_opaque() {
        let a = new_token_value();
        let b = new_token_value();
        assert_ne!(a, b);
        // uuid (36 chars) + '-' + millis
        assert!(a.len() > 37);
        let (uuid_part, _) = a.split_at(36);
        assert!(Uuid::parse_str(uuid_part).is_ok());
    }
}
