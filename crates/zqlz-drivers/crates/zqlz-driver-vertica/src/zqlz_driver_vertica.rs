//! Vertica metadata driver for ZQLZ Database IDE
//!
//! Vertica keeps its catalog in the `v_catalog` schema rather than in the
//! standard `information_schema` views. This crate provides the metadata
//! model that maps those catalog views onto ZQLZ's generic entities: tables,
//! flex tables and views in a single listing, server-side DDL export,
//! procedure sources, sequences and `LIMIT`-based row limiting.

mod catalog_query;
mod config;
mod ddl;
mod meta_model;
mod sequences;
mod table;

#[cfg(test)]
mod catalog_query_tests;
#[cfg(test)]
mod ddl_tests;
#[cfg(test)]
mod table_tests;

pub use catalog_query::{FLEXTABLE_TAG, TABLE_TAG, TableLoadQuery, VIEW_TAG, table_load_statement};
pub use config::VerticaMetaConfig;
pub use meta_model::{VERTICA_DRIVER_ID, VerticaMetaModel};
pub use table::{VerticaTableKind, normalize_type_name};
