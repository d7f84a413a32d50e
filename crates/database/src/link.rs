//! Link storage.
//!
//! Same duplicate policy as emails, but URL normalization is exact: two
//! URLs differing only in case are distinct.

use sqlx::{SqliteExecutor, SqlitePool};

use crate::models::Link;
use crate::validation;
use crate::Result;

/// Append a link.
pub async fn append_link<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: &str,
    url: &str,
) -> Result<()> {
    validation::validate_required("url", url)?;

    sqlx::query(
        r#"
        INSERT INTO links (user_id, url)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(url)
    .execute(executor)
    .await?;

    Ok(())
}

/// List a user's links in insertion order, one row per distinct URL,
/// keeping the earliest occurrence.
pub async fn list_links(pool: &SqlitePool, user_id: &str) -> Result<Vec<Link>> {
    let rows = sqlx::query_as::<_, Link>(
        r#"
        SELECT id, user_id, url, created_at
        FROM links
        WHERE user_id = ?
          AND id IN (
              SELECT MIN(id)
              FROM links
              WHERE user_id = ?
              GROUP BY url
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_db;

    #[tokio::test]
    async fn test_exact_duplicates_collapse_on_display() {
        let db = test_db().await;

        append_link(db.pool(), "alice", "https://a.com").await.unwrap();
        append_link(db.pool(), "alice", "https://a.com").await.unwrap();
        append_link(db.pool(), "alice", "https://A.com").await.unwrap();

        let links = list_links(db.pool(), "alice").await.unwrap();
        // Exact-match dedup: the case-variant stays separate.
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://a.com");
        assert_eq!(links[1].url, "https://A.com");
    }

    #[tokio::test]
    async fn test_listing_is_user_scoped() {
        let db = test_db().await;

        append_link(db.pool(), "alice", "https://a.com").await.unwrap();
        append_link(db.pool(), "bob", "https://b.com").await.unwrap();

        let links = list_links(db.pool(), "alice").await.unwrap();
        assert_eq!(links.len(), 1);
    }
}
