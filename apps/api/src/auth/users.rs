use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Registers a new user, enforcing username and email uniqueness.
pub async fn register(
    pool: &PgPool,
    username: &str,
    password: &str,
    email: &str,
    full_name: &str,
) -> Result<User, AppError> {
    let username_taken: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
    if username_taken.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let email_taken: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    if email_taken.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(password)?;
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, password_hash, email, full_name)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(password_hash)
    .bind(email)
    .bind(full_name)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// Constant behavior on malformed hashes: verification simply fails.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

/// Seeds the default admin account on first boot so the API is usable
/// out of the box.
pub async fn ensure_default_user(pool: &PgPool) -> Result<(), AppError> {
    if find_by_username(pool, "admin").await?.is_some() {
        return Ok(());
    }
    register(pool, "admin", "admin123", "admin@resume-analyzer.local", "Administrator").await?;
    info!("Seeded default admin user");
    Ok(())
}
