// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The six built-in reading-companion tools.

pub mod books;
pub mod reading;

pub use books::{GetBookDetailsTool, SearchBooksTool};
pub use reading::{AddToReadingListTool, GetReadingListTool, GetReadingStatsTool, MarkAsReadTool};

use std::sync::Arc;

use libris_core::{BookCatalog, LibrisError};
use libris_storage::ReadingList;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ToolRegistry;

/// Registers all built-in tools into the given registry.
pub fn register_builtins(
    registry: &mut ToolRegistry,
    catalog: Arc<dyn BookCatalog>,
    list: Arc<ReadingList>,
) {
    registry.register(Arc::new(SearchBooksTool::new(catalog.clone())));
    registry.register(Arc::new(GetBookDetailsTool::new(catalog)));
    registry.register(Arc::new(AddToReadingListTool::new(list.clone())));
    registry.register(Arc::new(GetReadingListTool::new(list.clone())));
    registry.register(Arc::new(MarkAsReadTool::new(list.clone())));
    registry.register(Arc::new(GetReadingStatsTool::new(list)));
}

/// Deserializes schema-validated arguments into a typed struct.
///
/// JSON Schema counts `4.0` as an integer, so integral floats are rewritten
/// as integers before reaching the typed fields.
fn parse_args<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T, LibrisError> {
    serde_json::from_value(integral_floats(input)).map_err(|e| LibrisError::Tool {
        message: format!("bad arguments for {tool}: {e}"),
        source: Some(Box::new(e)),
    })
}

fn integral_floats(value: Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f)
                if n.is_f64() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Value::from(f as i64)
            }
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(integral_floats).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, integral_floats(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolDispatcher;
    use libris_core::ToolCall;
    use libris_storage::Database;
    use libris_test_utils::MockCatalog;
    use serde_json::json;
    use tempfile::TempDir;

    async fn setup() -> (ToolDispatcher, TempDir) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path().join("tools.db").to_str().unwrap())
            .await
            .unwrap();
        let catalog: Arc<dyn BookCatalog> = Arc::new(MockCatalog::classics());
        let list = Arc::new(ReadingList::new(Arc::new(db), catalog.clone()));
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry, catalog, list);
        (ToolDispatcher::new(Arc::new(registry)).unwrap(), dir)
    }

    async fn run(d: &ToolDispatcher, name: &str, args: Value) -> Value {
        let call = ToolCall {
            id: format!("call_{name}"),
            name: name.to_string(),
            arguments: args,
        };
        serde_json::from_str(&d.dispatch(&call).await.content).unwrap()
    }

    #[tokio::test]
    async fn registers_exactly_six_tools() {
        let (d, _dir) = setup().await;
        let names: Vec<String> = d.definitions().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "addToReadingList",
                "getBookDetails",
                "getReadingList",
                "getReadingStats",
                "markAsRead",
                "searchBooks",
            ]
        );
    }

    #[tokio::test]
    async fn enum_and_range_constraints_are_enforced() {
        let (d, _dir) = setup().await;
        let bad = [
            ("addToReadingList", json!({"bookId": "dune-1965", "priority": "urgent"})),
            ("markAsRead", json!({"bookId": "dune-1965", "rating": 6})),
            ("getReadingStats", json!({"period": "decade"})),
            ("getReadingList", json!({"limit": 0})),
            ("searchBooks", json!({"query": ""})),
        ];
        for (name, args) in bad {
            let out = run(&d, name, args).await;
            let error = out["error"].as_str().unwrap_or_default();
            assert!(
                error.starts_with(&format!("invalid arguments for {name}")),
                "{name}: {out}"
            );
        }
    }

    #[tokio::test]
    async fn integral_floats_pass_as_integers() {
        let (d, _dir) = setup().await;

        let found = run(&d, "searchBooks", json!({"query": "Asimov", "maxResults": 1.0})).await;
        assert_eq!(found["items"].as_array().unwrap().len(), 1);

        let added = run(&d, "addToReadingList", json!({"bookId": "dune-1965"})).await;
        assert_eq!(added["success"], true);

        let list = run(&d, "getReadingList", json!({"limit": 5.0})).await;
        assert_eq!(list["count"], 1);

        let marked = run(&d, "markAsRead", json!({"bookId": "dune-1965", "rating": 4.0})).await;
        assert_eq!(marked["success"], true, "{marked}");
        assert_eq!(marked["entry"]["rating"], 4);

        let fractional = run(&d, "markAsRead", json!({"bookId": "fdn-1951", "rating": 4.5})).await;
        assert!(fractional["error"].as_str().unwrap().starts_with("invalid arguments"));
    }

    #[test]
    fn integral_floats_are_rewritten_recursively() {
        let out = integral_floats(json!({"a": 2.0, "b": [3.0, 1.5], "c": "4.0", "d": -1.0}));
        assert_eq!(out, json!({"a": 2, "b": [3, 1.5], "c": "4.0", "d": -1}));
    }

    #[tokio::test]
    async fn reading_list_flow_through_tools() {
        let (d, _dir) = setup().await;

        let added = run(&d, "addToReadingList", json!({"bookId": "dune-1965", "priority": "high"})).await;
        assert_eq!(added["success"], true);
        assert_eq!(added["entry"]["priority"], "high");

        let dup = run(&d, "addToReadingList", json!({"bookId": "dune-1965"})).await;
        assert_eq!(dup, json!({"success": false, "error": "duplicate"}));

        let missing = run(&d, "addToReadingList", json!({"bookId": "nope"})).await;
        assert_eq!(missing, json!({"success": false, "error": "book not found"}));

        let list = run(&d, "getReadingList", json!({})).await;
        assert_eq!(list["count"], 1);

        let marked = run(&d, "markAsRead", json!({"bookId": "dune-1965", "rating": 5})).await;
        assert_eq!(marked["success"], true);
        assert_eq!(marked["entry"]["pageCount"], 412);

        let list = run(&d, "getReadingList", json!({"limit": 5})).await;
        assert_eq!(list["count"], 0);

        let stats = run(&d, "getReadingStats", json!({"period": "year"})).await;
        assert_eq!(stats["totalRead"], 1);
        assert_eq!(stats["totalPages"], 412);
        assert_eq!(stats["averageRating"], 5.0);
        assert_eq!(stats["topAuthors"][0], json!({"author": "Frank Herbert", "count": 1}));
        assert_eq!(stats["period"], "year");
    }

    #[tokio::test]
    async fn bad_id_is_not_available() {
        let (d, _dir) = setup().await;
        let out = run(&d, "markAsRead", json!({"bookId": "BAD_ID"})).await;
        assert_eq!(out, json!({"success": false, "error": "not available"}));
        let stats = run(&d, "getReadingStats", json!({})).await;
        assert_eq!(stats["totalRead"], 0);
    }
}
