//! Cross-category search.

use sqlx::SqlitePool;

use crate::models::SearchHit;
use crate::Result;

/// Case-insensitive substring search over the primary text field of every
/// category table, newest matches first, truncated to `limit`.
///
/// An empty or whitespace-only term returns no results — never the whole
/// dataset.
pub async fn search_user_data(
    pool: &SqlitePool,
    user_id: &str,
    term: &str,
    limit: i64,
) -> Result<Vec<SearchHit>> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, SearchHit>(
        r#"
        SELECT category, content, created_at FROM (
            SELECT 'note' AS category, body AS content, created_at, id
            FROM notes
            WHERE user_id = ?1 AND instr(lower(body), lower(?2)) > 0
            UNION ALL
            SELECT 'credential', label, created_at, id
            FROM credentials
            WHERE user_id = ?1 AND instr(lower(label), lower(?2)) > 0
            UNION ALL
            SELECT 'password', label, created_at, id
            FROM passwords
            WHERE user_id = ?1 AND instr(lower(label), lower(?2)) > 0
            UNION ALL
            SELECT 'email', address, created_at, id
            FROM emails
            WHERE user_id = ?1 AND instr(lower(address), lower(?2)) > 0
            UNION ALL
            SELECT 'link', url, created_at, id
            FROM links
            WHERE user_id = ?1 AND instr(lower(url), lower(?2)) > 0
        )
        ORDER BY created_at DESC, id DESC
        LIMIT ?3
        "#,
    )
    .bind(user_id)
    .bind(term)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
