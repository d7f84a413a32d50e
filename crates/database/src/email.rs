//! Email address storage.
//!
//! Every mention is logged (the same address may arrive twice); listings
//! collapse duplicates to the earliest occurrence, case-insensitively.

use sqlx::{SqliteExecutor, SqlitePool};

use crate::models::Email;
use crate::validation;
use crate::Result;

/// Append an email address.
pub async fn append_email<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: &str,
    address: &str,
) -> Result<()> {
    validation::validate_email_address(address)?;

    sqlx::query(
        r#"
        INSERT INTO emails (user_id, address)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(address)
    .execute(executor)
    .await?;

    Ok(())
}

/// List a user's email addresses in insertion order, one row per distinct
/// address (case-insensitive), keeping the earliest occurrence.
pub async fn list_emails(pool: &SqlitePool, user_id: &str) -> Result<Vec<Email>> {
    let rows = sqlx::query_as::<_, Email>(
        r#"
        SELECT id, user_id, address, created_at
        FROM emails
        WHERE user_id = ?
          AND id IN (
              SELECT MIN(id)
              FROM emails
              WHERE user_id = ?
              GROUP BY lower(address)
          )
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
