// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate statistics over the read-books table.

use libris_core::{LibrisError, StatsPeriod};

use crate::database::Database;
use crate::models::{AuthorCount, ReadingStats};

/// Number of authors reported in the ranking.
const TOP_AUTHORS: u32 = 3;

/// Compute reading statistics.
///
/// `period` is echoed back in the result but does not restrict the rows
/// aggregated.
pub async fn reading_stats(db: &Database, period: StatsPeriod) -> Result<ReadingStats, LibrisError> {
    db.connection()
        .call(move |conn| -> Result<ReadingStats, rusqlite::Error> {
            let (total_read, total_pages, average): (i64, i64, Option<f64>) = conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(page_count), 0), AVG(rating) FROM read_books",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

            // Authors are stored as a JSON array per row; json_each flattens them.
            let mut stmt = conn.prepare(
                "SELECT author.value, COUNT(*) AS n
                 FROM read_books, json_each(read_books.authors) AS author
                 GROUP BY author.value
                 ORDER BY n DESC, author.value ASC
                 LIMIT ?1",
            )?;
            let top_authors = stmt
                .query_map([TOP_AUTHORS], |row| {
                    let count: i64 = row.get(1)?;
                    Ok(AuthorCount {
                        author: row.get(0)?,
                        count: u32::try_from(count).unwrap_or(u32::MAX),
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(ReadingStats {
                total_read: u32::try_from(total_read).unwrap_or(u32::MAX),
                total_pages: u64::try_from(total_pages).unwrap_or(0),
                average_rating: average.map(round_one_decimal).unwrap_or(0.0),
                top_authors,
                period,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
