//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use zqlz_core::{
    Connection, ConnectionConfig, QueryResult, Result, SessionProvider, Value, ZqlzError,
};

/// One executed statement
#[derive(Debug, Clone)]
pub struct LoggedQuery {
    pub purpose: String,
    pub sql: String,
    pub params: Vec<Value>,
}

#[derive(Default)]
struct SharedState {
    /// SQL-pattern-based responses: if a query contains the pattern string,
    /// the corresponding result is returned.
    responses: Vec<(String, QueryResult)>,
    /// Queries containing one of these patterns fail
    failures: Vec<String>,
    query_log: Vec<LoggedQuery>,
    opened: Vec<String>,
    closed: usize,
}

/// Session provider backed by pattern-matched canned results.
///
/// Every session shares the same responses and log so tests can assert on
/// what the metadata model executed and whether each session was released.
#[derive(Clone, Default)]
pub struct MockSessionProvider {
    state: Arc<Mutex<SharedState>>,
}

impl MockSessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a response for queries containing the given SQL pattern.
    pub fn with_query_response(self, sql_contains: impl Into<String>, result: QueryResult) -> Self {
        self.state.lock().responses.push((sql_contains.into(), result));
        self
    }

    /// Make every query containing `sql_contains` fail
    pub fn with_failure(self, sql_contains: impl Into<String>) -> Self {
        self.state.lock().failures.push(sql_contains.into());
        self
    }

    pub fn query_log(&self) -> Vec<LoggedQuery> {
        self.state.lock().query_log.clone()
    }

    pub fn query_count(&self) -> usize {
        self.state.lock().query_log.len()
    }

    pub fn executed(&self, sql_contains: &str) -> bool {
        self.state
            .lock()
            .query_log
            .iter()
            .any(|q| q.sql.contains(sql_contains))
    }

    pub fn opened_sessions(&self) -> Vec<String> {
        self.state.lock().opened.clone()
    }

    pub fn open_count(&self) -> usize {
        self.state.lock().opened.len()
    }

    pub fn close_count(&self) -> usize {
        self.state.lock().closed
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn open_session(&self, purpose: &str) -> Result<Arc<dyn Connection>> {
        self.state.lock().opened.push(purpose.to_string());
        Ok(Arc::new(MockConnection {
            purpose: purpose.to_string(),
            state: Arc::clone(&self.state),
            closed: AtomicBool::new(false),
        }))
    }
}

/// Mock connection handed out by `MockSessionProvider`
pub struct MockConnection {
    purpose: String,
    state: Arc<Mutex<SharedState>>,
    closed: AtomicBool,
}

#[async_trait]
impl Connection for MockConnection {
    fn driver_name(&self) -> &str {
        "mock"
    }

    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let mut state = self.state.lock();
        state.query_log.push(LoggedQuery {
            purpose: self.purpose.clone(),
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        if state.failures.iter().any(|pattern| sql.contains(pattern.as_str())) {
            return Err(ZqlzError::Query(
                "[Vertica][VJDBC](4566) ERROR: Relation does not exist".into(),
            ));
        }

        Ok(state
            .responses
            .iter()
            .find(|(pattern, _)| sql.contains(pattern.as_str()))
            .map(|(_, result)| result.clone())
            .unwrap_or_else(QueryResult::empty))
    }

    async fn close(&self) -> Result<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.state.lock().closed += 1;
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub fn vertica_config() -> ConnectionConfig {
    let mut config = ConnectionConfig::new("vertica", "warehouse");
    config.host = "vertica.example.com".to_string();
    config.port = 5433;
    config.database = Some("vmart".to_string());
    config
}

pub fn s(value: &str) -> Value {
    Value::String(value.to_string())
}

/// Rows shaped like the Vertica table enumeration result
pub fn union_result(rows: &[(&str, &str, &str, Option<&str>)]) -> QueryResult {
    QueryResult::from_rows(
        &[
            "TABLE_CAT",
            "TABLE_SCHEM",
            "TABLE_NAME",
            "TABLE_TYPE",
            "TYPE_CAT",
            "owner_name",
            "DEFINITION",
            "REMARKS",
        ],
        rows.iter()
            .map(|(schema, name, tag, remarks)| {
                vec![
                    Value::Null,
                    s(schema),
                    s(name),
                    s(tag),
                    Value::Null,
                    s("dbadmin"),
                    Value::Null,
                    (*remarks).into(),
                ]
            })
            .collect(),
    )
}

/// Rows shaped like the generic information_schema table listing
pub fn generic_tables_result(rows: &[(&str, &str, &str)]) -> QueryResult {
    QueryResult::from_rows(
        &["TABLE_CAT", "TABLE_SCHEM", "TABLE_NAME", "TABLE_TYPE", "REMARKS"],
        rows.iter()
            .map(|(schema, name, tag)| vec![Value::Null, s(schema), s(name), s(tag), Value::Null])
            .collect(),
    )
}

/// Rows shaped like `v_catalog.sequences`
pub fn sequences_result(rows: Vec<(Value, Value, Value, Value, Value)>) -> QueryResult {
    QueryResult::from_rows(
        &[
            "sequence_schema",
            "sequence_name",
            "owner_name",
            "current_value",
            "minimum",
            "maximum",
            "increment_by",
        ],
        rows.into_iter()
            .map(|(name, current, min, max, inc)| {
                vec![s("store"), name, s("dbadmin"), current, min, max, inc]
            })
            .collect(),
    )
}
