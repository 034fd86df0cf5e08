//! Query transformers
//!
//! A transformer rewrites a user query before execution, e.g. to fetch one
//! page of a result set. Metadata models hand them out per transform type;
//! when a model has none, the query runs unmodified.

use crate::{Result, ZqlzError};
use serde::{Deserialize, Serialize};

/// Kind of rewrite requested by the query layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryTransformType {
    /// Restrict the result set to a window of rows
    ResultSetLimit,
    /// Count the rows a query would return
    ResultSetCount,
    /// Apply an ORDER BY chosen in the results grid
    OrderBy,
    /// Apply a WHERE filter chosen in the results grid
    Filter,
}

/// Parameters for a transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformParams {
    /// Rows to skip
    pub offset: u64,
    /// Maximum number of rows to return
    pub max_rows: Option<u64>,
}

impl TransformParams {
    pub fn limit(offset: u64, max_rows: u64) -> Self {
        Self {
            offset,
            max_rows: Some(max_rows),
        }
    }
}

/// Rewrites query text for one transform type
pub trait QueryTransformer: Send + Sync + std::fmt::Debug {
    fn transform_type(&self) -> QueryTransformType;

    fn transform_query(&self, sql: &str, params: &TransformParams) -> Result<String>;
}

/// Row-limiting transformer.
///
/// In wrapping mode the query becomes a subquery of an outer
/// `SELECT * ... LIMIT`; otherwise the `LIMIT` clause is appended to the
/// query itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitTransformer {
    wrap: bool,
}

impl LimitTransformer {
    pub fn new(wrap: bool) -> Self {
        Self { wrap }
    }

    pub fn is_wrapping(&self) -> bool {
        self.wrap
    }

    fn limit_clause(max_rows: u64, offset: u64) -> String {
        if offset > 0 {
            format!("LIMIT {} OFFSET {}", max_rows, offset)
        } else {
            format!("LIMIT {}", max_rows)
        }
    }
}

/// Whether the statement returns rows a limit can apply to (`SELECT` or a
/// `WITH ... SELECT`)
fn is_select(query: &str) -> bool {
    let first = query
        .trim_start_matches(|c: char| c == '(' || c.is_whitespace())
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or("");
    first.eq_ignore_ascii_case("SELECT") || first.eq_ignore_ascii_case("WITH")
}

/// Whether the statement already ends in `LIMIT n` or `LIMIT n OFFSET m`
fn has_trailing_limit(query: &str) -> bool {
    let words: Vec<&str> = query.split_whitespace().collect();
    let is_limit = |w: &str| w.eq_ignore_ascii_case("LIMIT");
    let is_count = |w: &str| w.parse::<u64>().is_ok() || w.eq_ignore_ascii_case("ALL");

    match words.as_slice() {
        [.., limit, n, offset, m]
            if is_limit(*limit)
                && is_count(*n)
                && offset.eq_ignore_ascii_case("OFFSET")
                && m.parse::<u64>().is_ok() =>
        {
            true
        }
        [.., limit, n] => is_limit(*limit) && is_count(*n),
        _ => false,
    }
}

impl QueryTransformer for LimitTransformer {
    fn transform_type(&self) -> QueryTransformType {
        QueryTransformType::ResultSetLimit
    }

    fn transform_query(&self, sql: &str, params: &TransformParams) -> Result<String> {
        let max_rows = params.max_rows.ok_or_else(|| {
            ZqlzError::Query("row limit transform requires a maximum row count".into())
        })?;
        let query = sql.trim().trim_end_matches(';').trim_end();

        if !is_select(query) {
            tracing::debug!("not a SELECT, leaving query unlimited");
            return Ok(sql.to_string());
        }
        if !self.wrap && has_trailing_limit(query) {
            tracing::debug!("query already limited");
            return Ok(sql.to_string());
        }

        let clause = Self::limit_clause(max_rows, params.offset);
        Ok(if self.wrap {
            format!("SELECT * FROM (\n{}\n) zqlz_limited {}", query, clause)
        } else {
            format!("{}\n{}", query, clause)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_wrapping_appends_limit() {
        let limiter = LimitTransformer::new(false);
        assert!(!limiter.is_wrapping());
        let sql = limiter
            .transform_query("SELECT * FROM store.orders;", &TransformParams::limit(0, 200))
            .unwrap();
        assert_eq!(sql, "SELECT * FROM store.orders\nLIMIT 200");
    }

    #[test]
    fn test_non_wrapping_with_offset() {
        let limiter = LimitTransformer::new(false);
        let sql = limiter
            .transform_query("SELECT id FROM t ORDER BY id", &TransformParams::limit(400, 200))
            .unwrap();
        assert_eq!(sql, "SELECT id FROM t ORDER BY id\nLIMIT 200 OFFSET 400");
    }

    #[test]
    fn test_wrapping_uses_subquery() {
        let limiter = LimitTransformer::new(true);
        assert!(limiter.is_wrapping());
        let sql = limiter
            .transform_query("SELECT 1", &TransformParams::limit(0, 5))
            .unwrap();
        assert_eq!(sql, "SELECT * FROM (\nSELECT 1\n) zqlz_limited LIMIT 5");
    }

    #[test]
    fn test_existing_limit_is_kept() {
        let limiter = LimitTransformer::new(false);
        let params = TransformParams::limit(0, 200);
        for sql in [
            "SELECT * FROM store.orders LIMIT 10",
            "select id from t order by id limit 10 offset 20;",
        ] {
            assert_eq!(limiter.transform_query(sql, &params).unwrap(), sql);
        }
    }

    #[test]
    fn test_limit_inside_subquery_still_limited() {
        let limiter = LimitTransformer::new(false);
        let sql = limiter
            .transform_query(
                "SELECT * FROM (SELECT id FROM t LIMIT 5) recent",
                &TransformParams::limit(0, 2),
            )
            .unwrap();
        assert_eq!(sql, "SELECT * FROM (SELECT id FROM t LIMIT 5) recent\nLIMIT 2");
    }

    #[test]
    fn test_non_select_statements_are_untouched() {
        let params = TransformParams::limit(0, 200);
        for wrap in [false, true] {
            let limiter = LimitTransformer::new(wrap);
            for sql in [
                "INSERT INTO t VALUES (1)",
                "EXPLAIN SELECT 1",
                "CREATE TABLE t (id int);",
            ] {
                assert_eq!(limiter.transform_query(sql, &params).unwrap(), sql);
            }
        }
    }

    #[test]
    fn test_with_query_is_limited() {
        let limiter = LimitTransformer::new(false);
        let sql = limiter
            .transform_query(
                "WITH recent AS (SELECT id FROM t) SELECT * FROM recent",
                &TransformParams::limit(0, 3),
            )
            .unwrap();
        assert!(sql.ends_with("\nLIMIT 3"));
    }

    #[test]
    fn test_missing_row_count_is_an_error() {
        let limiter = LimitTransformer::new(false);
        assert!(limiter
            .transform_query("SELECT 1", &TransformParams::default())
            .is_err());
    }
}
