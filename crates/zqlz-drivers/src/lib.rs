//! ZQLZ Drivers - Database metadata model implementations
//!
//! This crate collects the per-engine metadata models built on the generic
//! introspection engine in `zqlz-core`.

#[cfg(feature = "vertica")]
pub use zqlz_driver_vertica as vertica;

mod registry;

pub use registry::MetaModelRegistry;

/// Re-export commonly used types from zqlz-core
pub use zqlz_core::{
    ConnectionConfig, Container, MetaIntrospector, MetaModel, MetaOverride, QueryResult, Result,
    Row, Sequence, SessionProvider, Table, Value, ZqlzError,
};
