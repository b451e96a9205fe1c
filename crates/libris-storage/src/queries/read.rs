// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-book operations.

use libris_core::LibrisError;
use rusqlite::params;

use super::{InsertOutcome, authors_from_json, authors_to_json};
use crate::database::{Database, is_unique_violation};
use crate::models::ReadBook;

fn row_to_read(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReadBook> {
    let authors = authors_from_json(&row.get::<_, String>(2)?, 2)?;
    Ok(ReadBook {
        external_id: row.get(0)?,
        title: row.get(1)?,
        authors,
        thumbnail: row.get(3)?,
        page_count: row.get(4)?,
        rating: row.get(5)?,
        review: row.get(6)?,
        finished_at: row.get(7)?,
    })
}

/// Insert a read entry and delete matching pending rows in one transaction.
///
/// A UNIQUE violation on `read_books` rolls back and yields `Duplicate`,
/// leaving any pending row in place.
pub async fn insert_read_and_clear_pending(
    db: &Database,
    book: &ReadBook,
) -> Result<InsertOutcome, LibrisError> {
    let book = book.clone();
    db.connection()
        .call(move |conn| -> Result<InsertOutcome, rusqlite::Error> {
            let tx = conn.transaction()?;
            let inserted = tx.execute(
                "INSERT INTO read_books
                     (external_id, title, authors, thumbnail, page_count, rating, review, finished_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    book.external_id,
                    book.title,
                    authors_to_json(&book.authors),
                    book.thumbnail,
                    book.page_count,
                    book.rating,
                    book.review,
                    book.finished_at,
                ],
            );
            match inserted {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => return Ok(InsertOutcome::Duplicate),
                Err(e) => return Err(e),
            }
            tx.execute(
                "DELETE FROM pending_books WHERE external_id = ?1",
                params![book.external_id],
            )?;
            tx.commit()?;
            Ok(InsertOutcome::Created)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a read entry by external id.
pub async fn get_read(db: &Database, external_id: &str) -> Result<Option<ReadBook>, LibrisError> {
    let external_id = external_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<ReadBook>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT external_id, title, authors, thumbnail, page_count, rating, review, finished_at
                 FROM read_books WHERE external_id = ?1",
                params![external_id],
                row_to_read,
            );
            match result {
                Ok(book) => Ok(Some(book)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List read entries, most recently finished first.
pub async fn list_read(db: &Database, limit: u32) -> Result<Vec<ReadBook>, LibrisError> {
    db.connection()
        .call(move |conn| -> Result<Vec<ReadBook>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT external_id, title, authors, thumbnail, page_count, rating, review, finished_at
                 FROM read_books ORDER BY finished_at DESC, id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], row_to_read)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PendingBook;
    use crate::queries::pending;
    use libris_core::Priority;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("read.db").to_str().unwrap())
            .await
            .unwrap();
        (db, dir)
    }

    fn make_read(id: &str, finished_at: &str) -> ReadBook {
        ReadBook {
            external_id: id.to_string(),
            title: "Foundation".to_string(),
            authors: vec!["Isaac Asimov".to_string()],
            thumbnail: Some("https://books.example/f.jpg".to_string()),
            page_count: 255,
            rating: Some(5),
            review: Some("Classic".to_string()),
            finished_at: finished_at.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_clears_matching_pending_row() {
        let (db, _dir) = setup_db().await;
        let pending_row = PendingBook {
            external_id: "f1".into(),
            title: "Foundation".into(),
            authors: vec!["Isaac Asimov".into()],
            thumbnail: None,
            page_count: 255,
            priority: Priority::Medium,
            notes: None,
            added_at: "2026-01-01T00:00:00.000Z".into(),
        };
        pending::insert_pending(&db, &pending_row).await.unwrap();

        let outcome = insert_read_and_clear_pending(&db, &make_read("f1", "2026-02-01T00:00:00.000Z"))
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Created);
        assert!(pending::get_pending(&db, "f1").await.unwrap().is_none());
        assert_eq!(get_read(&db, "f1").await.unwrap().unwrap().rating, Some(5));
    }

    #[tokio::test]
    async fn duplicate_read_keeps_pending_row() {
        let (db, _dir) = setup_db().await;
        insert_read_and_clear_pending(&db, &make_read("f2", "2026-02-01T00:00:00.000Z"))
            .await
            .unwrap();

        let pending_row = PendingBook {
            external_id: "f2".into(),
            title: "Foundation".into(),
            authors: vec![],
            thumbnail: None,
            page_count: 0,
            priority: Priority::Low,
            notes: None,
            added_at: "2026-03-01T00:00:00.000Z".into(),
        };
        pending::insert_pending(&db, &pending_row).await.unwrap();

        let outcome = insert_read_and_clear_pending(&db, &make_read("f2", "2026-04-01T00:00:00.000Z"))
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Duplicate);
        assert!(pending::get_pending(&db, "f2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn list_read_orders_by_finish_time() {
        let (db, _dir) = setup_db().await;
        insert_read_and_clear_pending(&db, &make_read("a", "2026-01-01T00:00:00.000Z"))
            .await
            .unwrap();
        insert_read_and_clear_pending(&db, &make_read("b", "2026-05-01T00:00:00.000Z"))
            .await
            .unwrap();

        let books = list_read(&db, 10).await.unwrap();
        let ids: Vec<_> = books.iter().map(|b| b.external_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(get_read(&db, "missing").await.unwrap().is_none());
    }
}
