// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pending-book CRUD operations.

use std::str::FromStr;

use libris_core::{LibrisError, Priority};
use rusqlite::{OptionalExtension, params};

use super::{InsertOutcome, authors_from_json, authors_to_json};
use crate::database::{Database, is_unique_violation, map_tr_err};
use crate::models::PendingBook;

const COLUMNS: &str =
    "external_id, title, authors, thumbnail, page_count, priority, notes, added_at";

fn row_to_pending(row: &rusqlite::Row<'_>) -> rusqlite::Result<PendingBook> {
    let authors = authors_from_json(&row.get::<_, String>(2)?, 2)?;
    let priority: String = row.get(5)?;
    let priority = Priority::from_str(&priority).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(PendingBook {
        external_id: row.get(0)?,
        title: row.get(1)?,
        authors,
        thumbnail: row.get(3)?,
        page_count: row.get(4)?,
        priority,
        notes: row.get(6)?,
        added_at: row.get(7)?,
    })
}

/// Insert a pending book, reporting a UNIQUE violation as `Duplicate`.
pub async fn insert_pending(db: &Database, book: &PendingBook) -> Result<InsertOutcome, LibrisError> {
    let book = book.clone();
    db.connection()
        .call(move |conn| -> Result<InsertOutcome, rusqlite::Error> {
            let inserted = conn.execute(
                &format!("INSERT INTO pending_books ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                params![
                    book.external_id,
                    book.title,
                    authors_to_json(&book.authors),
                    book.thumbnail,
                    book.page_count,
                    book.priority.to_string(),
                    book.notes,
                    book.added_at,
                ],
            );
            match inserted {
                Ok(_) => Ok(InsertOutcome::Created),
                Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::Duplicate),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Get a pending book by external id.
pub async fn get_pending(db: &Database, external_id: &str) -> Result<Option<PendingBook>, LibrisError> {
    let external_id = external_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<PendingBook>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM pending_books WHERE external_id = ?1"),
                params![external_id],
                row_to_pending,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// List pending books, most recently added first.
pub async fn list_pending(db: &Database, limit: u32) -> Result<Vec<PendingBook>, LibrisError> {
    db.connection()
        .call(move |conn| -> Result<Vec<PendingBook>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM pending_books ORDER BY added_at DESC, id DESC LIMIT ?1"
            ))?;
            let rows = stmt.query_map(params![limit], row_to_pending)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Delete pending rows for an external id. Returns the number removed.
pub async fn delete_pending(db: &Database, external_id: &str) -> Result<usize, LibrisError> {
    let external_id = external_id.to_string();
    db.connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "DELETE FROM pending_books WHERE external_id = ?1",
                params![external_id],
            )
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("pending.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn make_pending(id: &str, added_at: &str) -> PendingBook {
        PendingBook {
            external_id: id.to_string(),
            title: format!("Title {id}"),
            authors: vec!["Isaac Asimov".to_string()],
            thumbnail: None,
            page_count: 250,
            priority: Priority::High,
            notes: Some("recommended by a friend".to_string()),
            added_at: added_at.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_get_roundtrips() {
        let (db, _dir) = setup_db().await;
        let book = make_pending("b1", "2026-01-01T00:00:00.000Z");

        assert_eq!(insert_pending(&db, &book).await.unwrap(), InsertOutcome::Created);
        let stored = get_pending(&db, "b1").await.unwrap().unwrap();
        assert_eq!(stored, book);
    }

    #[tokio::test]
    async fn second_insert_is_duplicate() {
        let (db, _dir) = setup_db().await;
        let book = make_pending("dup", "2026-01-01T00:00:00.000Z");

        assert_eq!(insert_pending(&db, &book).await.unwrap(), InsertOutcome::Created);
        let mut again = book.clone();
        again.title = "Different title".into();
        assert_eq!(insert_pending(&db, &again).await.unwrap(), InsertOutcome::Duplicate);

        // The original row is untouched.
        let stored = get_pending(&db, "dup").await.unwrap().unwrap();
        assert_eq!(stored.title, "Title dup");
    }

    #[tokio::test]
    async fn list_orders_newest_first_and_limits() {
        let (db, _dir) = setup_db().await;
        insert_pending(&db, &make_pending("old", "2026-01-01T00:00:00.000Z")).await.unwrap();
        insert_pending(&db, &make_pending("new", "2026-03-01T00:00:00.000Z")).await.unwrap();
        insert_pending(&db, &make_pending("mid", "2026-02-01T00:00:00.000Z")).await.unwrap();

        let all = list_pending(&db, 20).await.unwrap();
        let ids: Vec<_> = all.iter().map(|b| b.external_id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);

        let limited = list_pending(&db, 1).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].external_id, "new");
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let (db, _dir) = setup_db().await;
        insert_pending(&db, &make_pending("gone", "2026-01-01T00:00:00.000Z")).await.unwrap();

        assert_eq!(delete_pending(&db, "gone").await.unwrap(), 1);
        assert!(get_pending(&db, "gone").await.unwrap().is_none());
        assert_eq!(delete_pending(&db, "gone").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn corrupt_authors_column_is_an_error() {
        let (db, _dir) = setup_db().await;
        insert_pending(&db, &make_pending("bad", "2026-01-01T00:00:00.000Z")).await.unwrap();
        db.connection()
            .call(|conn| -> Result<usize, rusqlite::Error> {
                conn.execute("UPDATE pending_books SET authors = 'not json' WHERE external_id = 'bad'", [])
            })
            .await
            .unwrap();

        assert!(matches!(
            get_pending(&db, "bad").await,
            Err(LibrisError::Storage { .. })
        ));
        assert!(list_pending(&db, 20).await.is_err());
    }
}
