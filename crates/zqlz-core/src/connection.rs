//! Connection and metadata session handling

use crate::{QueryResult, Result, Value};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// A database connection
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "vertica", "postgresql")
    fn driver_name(&self) -> &str;

    /// Execute a query that returns rows, binding `params` positionally
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Close the connection
    async fn close(&self) -> Result<()>;

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;
}

/// Source of short-lived sessions used for catalog reads.
///
/// The execution layer decides whether a session is a pooled connection, a
/// dedicated metadata connection or something else entirely; callers only
/// see a `Connection` that must be closed once the read is finished.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Open a session for reading metadata. `purpose` is a human readable
    /// label such as "Read system sequences".
    async fn open_session(&self, purpose: &str) -> Result<Arc<dyn Connection>>;
}

/// Run `work` inside a metadata session and release the session afterwards.
///
/// The session is closed on every exit path: success, empty result and
/// failure. A failed close is logged and never masks the outcome of `work`.
pub async fn with_meta_session<T, F, Fut>(
    sessions: &dyn SessionProvider,
    purpose: &str,
    work: F,
) -> Result<T>
where
    F: FnOnce(Arc<dyn Connection>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let session = sessions.open_session(purpose).await?;
    tracing::debug!(purpose = %purpose, driver = %session.driver_name(), "opened metadata session");

    let outcome = work(Arc::clone(&session)).await;

    if let Err(close_err) = session.close().await {
        tracing::warn!(purpose = %purpose, error = %close_err, "failed to close metadata session");
    }
    tracing::debug!(purpose = %purpose, ok = outcome.is_ok(), "released metadata session");

    outcome
}
