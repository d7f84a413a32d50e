//! Note storage.

use sqlx::{SqliteExecutor, SqlitePool};

use crate::models::Note;
use crate::validation;
use crate::Result;

/// Append a note. Notes are never deduplicated.
pub async fn append_note<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: &str,
    body: &str,
) -> Result<()> {
    validation::validate_required("note", body)?;

    sqlx::query(
        r#"
        INSERT INTO notes (user_id, body)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(body)
    .execute(executor)
    .await?;

    Ok(())
}

/// List a user's notes in insertion order.
pub async fn list_notes(pool: &SqlitePool, user_id: &str) -> Result<Vec<Note>> {
    let rows = sqlx::query_as::<_, Note>(
        r#"
        SELECT id, user_id, body, created_at
        FROM notes
        WHERE user_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
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
    async fn test_append_and_list_in_order() {
        let db = test_db().await;

        append_note(db.pool(), "alice", "first").await.unwrap();
        append_note(db.pool(), "alice", "second").await.unwrap();

        let notes = list_notes(db.pool(), "alice").await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].body, "first");
        assert_eq!(notes[1].body, "second");
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let db = test_db().await;

        append_note(db.pool(), "alice", "same").await.unwrap();
        append_note(db.pool(), "alice", "same").await.unwrap();

        let notes = list_notes(db.pool(), "alice").await.unwrap();
        assert_eq!(notes.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_note_rejected() {
        let db = test_db().await;

        let result = append_note(db.pool(), "alice", "").await;
        assert!(matches!(result, Err(crate::StoreError::Validation(_))));
    }
}
