//! Vertica metadata model

use async_trait::async_trait;
use std::sync::Arc;
use zqlz_core::{
    Column, ColumnDescriptor, ConnectionConfig, Container, DataSource, DdlOptions, LimitTransformer,
    MetaModel, MetaOverride, Procedure, QueryTransformType, QueryTransformer, Result, Row,
    Sequence, SessionProvider, Table, TableLoadStatement,
};

use crate::config::VerticaMetaConfig;
use crate::{catalog_query, ddl, sequences, table};

/// Driver id the model registers under
pub const VERTICA_DRIVER_ID: &str = "vertica";

/// Metadata model for Vertica.
///
/// Overrides table enumeration (tables, flex tables and views in one pass),
/// DDL export, procedure sources, sequences and row limiting. Everything else
/// is the generic behavior.
#[derive(Debug, Clone, Default)]
pub struct VerticaMetaModel {
    config: VerticaMetaConfig,
}

impl VerticaMetaModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: VerticaMetaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerticaMetaConfig {
        &self.config
    }
}

#[async_trait]
impl MetaModel for VerticaMetaModel {
    fn driver_id(&self) -> &'static str {
        VERTICA_DRIVER_ID
    }

    fn connection_model(
        &self,
        config: &ConnectionConfig,
    ) -> Result<MetaOverride<Arc<dyn MetaModel>>> {
        let configured = Self::with_config(self.config.with_connection_params(config)?);
        tracing::debug!(
            data_source = %config.name,
            system_schema_prefix = %configured.config.system_schema_prefix,
            catalog_schema = %configured.config.catalog_schema,
            "configured Vertica model for connection"
        );
        Ok(MetaOverride::Custom(Arc::new(configured)))
    }

    fn create_data_source(
        &self,
        config: ConnectionConfig,
        sessions: Arc<dyn SessionProvider>,
    ) -> Result<DataSource> {
        let default_schema = self.config.default_schema.clone();
        Ok(DataSource::new(config, sessions).with_default_schema(default_schema))
    }

    fn create_schema(
        &self,
        _data_source: &DataSource,
        catalog: Option<&str>,
        name: &str,
    ) -> Result<Container> {
        let container = Container::new(name).system(self.config.is_system_schema(name));
        Ok(match catalog {
            Some(catalog) => container.in_catalog(catalog),
            None => container,
        })
    }

    fn prepare_table_load_statement(
        &self,
        owner: &Container,
        object: Option<&Table>,
        object_name: Option<&str>,
    ) -> MetaOverride<TableLoadStatement> {
        catalog_query::table_load_statement(&self.config, owner, object, object_name)
    }

    fn create_table(
        &self,
        container: &Container,
        name: &str,
        table_type: &str,
        row: &Row,
    ) -> Result<Table> {
        Ok(table::decode_table(container, name, table_type, row))
    }

    fn create_table_column(&self, table: &Table, desc: ColumnDescriptor) -> Result<Column> {
        Ok(table::decode_column(table, desc))
    }

    async fn table_ddl(
        &self,
        data_source: &DataSource,
        table: &Table,
        _options: &DdlOptions,
    ) -> Result<MetaOverride<String>> {
        if !table.persisted {
            return Ok(MetaOverride::UseDefault);
        }
        ddl::export_object_ddl(data_source, &self.config, table)
            .await
            .map(MetaOverride::Custom)
    }

    // Vertica has no view DDL distinct from table DDL at the catalog level;
    // EXPORT_OBJECTS handles both.
    async fn view_ddl(
        &self,
        data_source: &DataSource,
        view: &Table,
        options: &DdlOptions,
    ) -> Result<MetaOverride<String>> {
        self.table_ddl(data_source, view, options).await
    }

    async fn procedure_ddl(
        &self,
        data_source: &DataSource,
        procedure: &Procedure,
    ) -> Result<MetaOverride<String>> {
        ddl::read_procedure_source(data_source, &self.config, procedure)
            .await
            .map(MetaOverride::Custom)
    }

    fn supports_sequences(&self, _data_source: &DataSource) -> bool {
        true
    }

    async fn load_sequences(
        &self,
        data_source: &DataSource,
        container: &Container,
    ) -> Result<MetaOverride<Vec<Sequence>>> {
        sequences::load_sequences(data_source, &self.config, container)
            .await
            .map(MetaOverride::Custom)
    }

    fn create_query_transformer(
        &self,
        transform_type: QueryTransformType,
    ) -> Option<Box<dyn QueryTransformer>> {
        match transform_type {
            QueryTransformType::ResultSetLimit => Some(Box::new(LimitTransformer::new(false))),
            _ => None,
        }
    }
}
