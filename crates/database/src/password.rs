//! Bare password storage: labeled secrets without a username.

use sqlx::{SqliteExecutor, SqlitePool};

use crate::error::StoreError;
use crate::models::Password;
use crate::validation;
use crate::Result;

/// Create or overwrite the password stored under (user, label).
///
/// Same upsert rule as credentials: case-insensitive label key, first
/// casing kept, `created_at` refreshed on overwrite.
pub async fn upsert_password<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: &str,
    label: &str,
    value: &str,
) -> Result<()> {
    validation::validate_label(label)?;
    validation::validate_secret("password", value)?;

    sqlx::query(
        r#"
        INSERT INTO passwords (user_id, label, value)
        VALUES (?, ?, ?)
        ON CONFLICT(user_id, label) DO UPDATE SET
            value = excluded.value,
            created_at = datetime('now')
        "#,
    )
    .bind(user_id)
    .bind(label)
    .bind(value)
    .execute(executor)
    .await?;

    Ok(())
}

/// Get a password by label, matched case-insensitively.
pub async fn get_password(pool: &SqlitePool, user_id: &str, label: &str) -> Result<Password> {
    sqlx::query_as::<_, Password>(
        r#"
        SELECT id, user_id, label, value, created_at
        FROM passwords
        WHERE user_id = ? AND label = ?
        "#,
    )
    .bind(user_id)
    .bind(label)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound {
        entity: "password",
        label: label.to_string(),
    })
}

/// List a user's passwords in insertion order.
pub async fn list_passwords(pool: &SqlitePool, user_id: &str) -> Result<Vec<Password>> {
    let rows = sqlx::query_as::<_, Password>(
        r#"
        SELECT id, user_id, label, value, created_at
        FROM passwords
        WHERE user_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
