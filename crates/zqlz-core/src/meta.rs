//! Metadata model trait
//!
//! A `MetaModel` is the per-engine override surface of the generic
//! introspection engine. Every operation either produces a specialized result
//! or returns `MetaOverride::UseDefault`, in which case the engine runs its
//! standard behavior. The trait's default implementations all defer, so a
//! model only spells out what its engine does differently.

use crate::{
    Column, ColumnDescriptor, ConnectionConfig, Container, DataSource, DdlOptions, Procedure,
    QueryTransformType, QueryTransformer, Result, Row, Sequence, SessionProvider, Table,
    TableKind, Value,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of an overridable metadata operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaOverride<T> {
    /// The model produced its own result
    Custom(T),
    /// The generic engine should use its standard behavior
    UseDefault,
}

impl<T> MetaOverride<T> {
    pub fn is_default(&self) -> bool {
        matches!(self, MetaOverride::UseDefault)
    }

    pub fn custom(self) -> Option<T> {
        match self {
            MetaOverride::Custom(value) => Some(value),
            MetaOverride::UseDefault => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> MetaOverride<U> {
        match self {
            MetaOverride::Custom(value) => MetaOverride::Custom(f(value)),
            MetaOverride::UseDefault => MetaOverride::UseDefault,
        }
    }
}

/// A parameterized statement for enumerating tables.
///
/// Parameters are positional and bound in order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLoadStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl TableLoadStatement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }
}

/// Engine-specific metadata behavior plugged into the generic engine
#[async_trait]
pub trait MetaModel: Send + Sync {
    /// Driver id this model is registered under (e.g. "vertica")
    fn driver_id(&self) -> &'static str;

    /// Model to use for one connection. Models with per-connection settings
    /// return a copy configured from `config`; the rest keep the registered
    /// instance.
    fn connection_model(
        &self,
        _config: &ConnectionConfig,
    ) -> Result<MetaOverride<Arc<dyn MetaModel>>> {
        Ok(MetaOverride::UseDefault)
    }

    /// Construct the data source handle for a registered connection
    fn create_data_source(
        &self,
        config: ConnectionConfig,
        sessions: Arc<dyn SessionProvider>,
    ) -> Result<DataSource> {
        Ok(DataSource::new(config, sessions))
    }

    /// Construct a schema container
    fn create_schema(
        &self,
        _data_source: &DataSource,
        catalog: Option<&str>,
        name: &str,
    ) -> Result<Container> {
        let container = Container::new(name);
        Ok(match catalog {
            Some(catalog) => container.in_catalog(catalog),
            None => container,
        })
    }

    /// Statement used to enumerate tables of `owner`, optionally restricted
    /// to one object. When an explicit `object` is given its name wins over
    /// `object_name`.
    fn prepare_table_load_statement(
        &self,
        _owner: &Container,
        _object: Option<&Table>,
        _object_name: Option<&str>,
    ) -> MetaOverride<TableLoadStatement> {
        MetaOverride::UseDefault
    }

    /// Build a table entity from one row of the table enumeration result
    fn create_table(
        &self,
        container: &Container,
        name: &str,
        table_type: &str,
        row: &Row,
    ) -> Result<Table> {
        let kind = TableKind::from_tag(table_type).unwrap_or(TableKind::Table);
        let mut table = Table::persisted(container.name(), name, kind);
        table.remarks = row.get_string("REMARKS");
        Ok(table)
    }

    /// Build a column entity from decoded column attributes
    fn create_table_column(&self, table: &Table, desc: ColumnDescriptor) -> Result<Column> {
        Ok(Column::from_descriptor(&table.name, desc))
    }

    /// DDL for a table
    async fn table_ddl(
        &self,
        _data_source: &DataSource,
        _table: &Table,
        _options: &DdlOptions,
    ) -> Result<MetaOverride<String>> {
        Ok(MetaOverride::UseDefault)
    }

    /// DDL for a view
    async fn view_ddl(
        &self,
        _data_source: &DataSource,
        _view: &Table,
        _options: &DdlOptions,
    ) -> Result<MetaOverride<String>> {
        Ok(MetaOverride::UseDefault)
    }

    /// Source text of a procedure or function
    async fn procedure_ddl(
        &self,
        _data_source: &DataSource,
        _procedure: &Procedure,
    ) -> Result<MetaOverride<String>> {
        Ok(MetaOverride::UseDefault)
    }

    fn supports_sequences(&self, _data_source: &DataSource) -> bool {
        false
    }

    /// Sequences of `container`, in catalog order
    async fn load_sequences(
        &self,
        _data_source: &DataSource,
        _container: &Container,
    ) -> Result<MetaOverride<Vec<Sequence>>> {
        Ok(MetaOverride::UseDefault)
    }

    /// Query transformer for `transform_type`, if the engine has one
    fn create_query_transformer(
        &self,
        _transform_type: QueryTransformType,
    ) -> Option<Box<dyn QueryTransformer>> {
        None
    }
}
