//! ZQLZ Core - Core abstractions for database metadata introspection
//!
//! This crate provides the fundamental traits and types that the metadata
//! drivers depend on. It defines:
//!
//! - `Connection` / `SessionProvider` - Access to the SQL execution layer
//! - `MetaModel` - Per-engine overrides of the generic metadata behavior
//! - `MetaIntrospector` - The generic engine that consults a `MetaModel`
//! - `QueryTransformer` - Query rewrites such as row limiting
//! - Metadata entities like `Table`, `Column`, `Sequence`, etc.

mod connection;
mod data_source;
pub mod ddl;
mod error;
mod introspector;
mod meta;
mod schema;
mod transform;
mod types;

pub use connection::*;
pub use data_source::*;
pub use error::*;
pub use introspector::*;
pub use meta::*;
pub use schema::*;
pub use transform::*;
pub use types::*;
