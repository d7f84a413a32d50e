//! Message log persistence.
//!
//! The message log is an append-only audit trail: every classified item gets
//! a row here in addition to its category table. Rows are never updated and
//! only removed by a whole-user clear.

use sqlx::{SqliteExecutor, SqlitePool};

use crate::models::StoredMessage;
use crate::validation;
use crate::Result;

/// Append a message log entry.
pub async fn append_message<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: &str,
    raw_text: &str,
    category: &str,
    source: &str,
) -> Result<()> {
    validation::validate_required("message", raw_text)?;

    sqlx::query(
        r#"
        INSERT INTO messages (user_id, raw_text, category, source)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(raw_text)
    .bind(category)
    .bind(source)
    .execute(executor)
    .await?;

    Ok(())
}

/// Get the most recent message log entries for a user, newest first.
pub async fn recent_messages(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<StoredMessage>> {
    let rows = sqlx::query_as::<_, StoredMessage>(
        r#"
        SELECT id, user_id, raw_text, category, source, created_at
        FROM messages
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
