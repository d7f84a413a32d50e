//! Cross-table operations: category counts and whole-user clear.

use sqlx::SqlitePool;

use crate::models::CategorySummary;
use crate::Result;

const USER_TABLES: [&str; 6] = [
    "messages",
    "credentials",
    "passwords",
    "notes",
    "emails",
    "links",
];

/// Count a user's rows per category plus the total message count.
///
/// A single statement, so the counts come from one consistent snapshot and
/// can never observe a half-applied clear.
pub async fn category_summary(pool: &SqlitePool, user_id: &str) -> Result<CategorySummary> {
    let summary = sqlx::query_as::<_, CategorySummary>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM passwords WHERE user_id = ?1) AS passwords,
            (SELECT COUNT(*) FROM credentials WHERE user_id = ?1) AS credentials,
            (SELECT COUNT(*) FROM notes WHERE user_id = ?1) AS notes,
            (SELECT COUNT(*) FROM emails WHERE user_id = ?1) AS emails,
            (SELECT COUNT(*) FROM links WHERE user_id = ?1) AS links,
            (SELECT COUNT(*) FROM messages WHERE user_id = ?1) AS total_messages
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(summary)
}

/// Delete all of a user's rows across every table.
///
/// Runs in one transaction: either all six tables are purged or none are.
pub async fn clear_user(pool: &SqlitePool, user_id: &str) -> Result<()> {
    let mut tx = pool.begin().await?;

    for table in USER_TABLES {
        // Table names come from the fixed array above, never from input.
        let query = format!("DELETE FROM {table} WHERE user_id = ?");
        sqlx::query(&query).bind(user_id).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    tracing::info!(user_id, "cleared all stored data");
    Ok(())
}
