//! Credential storage: labeled username/password pairs.

use sqlx::{SqliteExecutor, SqlitePool};

use crate::error::StoreError;
use crate::models::Credential;
use crate::validation;
use crate::Result;

/// Create or overwrite the credential stored under (user, label).
///
/// The label key is case-insensitive (schema collation); an upsert keeps the
/// casing from the label's first occurrence and refreshes `created_at`.
pub async fn upsert_credential<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: &str,
    label: &str,
    username: Option<&str>,
    password: &str,
) -> Result<()> {
    validation::validate_label(label)?;
    if let Some(username) = username {
        validation::validate_username(username)?;
    }
    validation::validate_secret("password", password)?;

    sqlx::query(
        r#"
        INSERT INTO credentials (user_id, label, username, password)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id, label) DO UPDATE SET
            username = excluded.username,
            password = excluded.password,
            created_at = datetime('now')
        "#,
    )
    .bind(user_id)
    .bind(label)
    .bind(username)
    .bind(password)
    .execute(executor)
    .await?;

    Ok(())
}

/// Get a credential by label, matched case-insensitively.
pub async fn get_credential(pool: &SqlitePool, user_id: &str, label: &str) -> Result<Credential> {
    sqlx::query_as::<_, Credential>(
        r#"
        SELECT id, user_id, label, username, password, created_at
        FROM credentials
        WHERE user_id = ? AND label = ?
        "#,
    )
    .bind(user_id)
    .bind(label)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound {
        entity: "credential",
        label: label.to_string(),
    })
}

/// List a user's credentials in insertion order.
pub async fn list_credentials(pool: &SqlitePool, user_id: &str) -> Result<Vec<Credential>> {
    let rows = sqlx::query_as::<_, Credential>(
        r#"
        SELECT id, user_id, label, username, password, created_at
        FROM credentials
        WHERE user_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
