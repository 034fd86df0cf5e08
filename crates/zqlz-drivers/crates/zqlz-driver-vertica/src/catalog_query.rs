//! Catalog queries against Vertica's `v_catalog` views
//!
//! Tables and views live in two separate catalog views in Vertica. The
//! enumeration query folds both into the standard table-listing shape
//! (`TABLE_CAT`, `TABLE_SCHEM`, `TABLE_NAME`, `TABLE_TYPE`, ...), so the rest
//! of the metadata model sees a single result set.

use zqlz_core::{Container, MetaOverride, Table, TableLoadStatement};

use crate::config::VerticaMetaConfig;

/// Type tag for regular tables
pub const TABLE_TAG: &str = "TABLE";
/// Type tag for flex (schema-less) tables
pub const FLEXTABLE_TAG: &str = "FLEXTABLE";
/// Type tag for views
pub const VIEW_TAG: &str = "VIEW";

/// Builder for the Vertica table enumeration statement
#[derive(Debug, Clone)]
pub struct TableLoadQuery<'a> {
    catalog_schema: &'a str,
    schema: &'a str,
    name_filter: Option<&'a str>,
}

impl<'a> TableLoadQuery<'a> {
    pub fn new(config: &'a VerticaMetaConfig, schema: &'a str) -> Self {
        Self {
            catalog_schema: &config.catalog_schema,
            schema,
            name_filter: None,
        }
    }

    /// Restrict the listing to names matching a `LIKE` pattern
    pub fn with_name_filter(mut self, name_filter: Option<&'a str>) -> Self {
        self.name_filter = name_filter;
        self
    }

    pub fn sql(&self) -> String {
        let catalog = self.catalog_schema;
        let name_predicate = if self.name_filter.is_some() {
            " AND tv.TABLE_NAME LIKE ?"
        } else {
            ""
        };

        format!(
            "SELECT tv.*, c.comment AS REMARKS FROM (\n\
             SELECT NULL AS TABLE_CAT, t.table_schema AS TABLE_SCHEM, t.table_name AS TABLE_NAME, \
             (CASE t.is_flextable WHEN true THEN '{flex}' ELSE '{table}' END) AS TABLE_TYPE, \
             NULL AS TYPE_CAT,\n\
             \tt.owner_name, t.table_definition AS DEFINITION\n\
             FROM {catalog}.tables t\n\
             UNION ALL\n\
             SELECT NULL AS TABLE_CAT, v.table_schema AS TABLE_SCHEM, v.table_name AS TABLE_NAME, \
             '{view}' AS TABLE_TYPE, NULL AS TYPE_CAT,\n\
             \tv.owner_name, v.view_definition AS DEFINITION\n\
             FROM {catalog}.views v) tv\n\
             LEFT OUTER JOIN {catalog}.comments c ON c.object_type = tv.TABLE_TYPE \
             AND c.object_schema = tv.TABLE_SCHEM AND c.object_name = tv.TABLE_NAME\n\
             WHERE tv.TABLE_SCHEM = ?{name_predicate}\n\
             ORDER BY 2, 3",
            flex = FLEXTABLE_TAG,
            table = TABLE_TAG,
            view = VIEW_TAG,
        )
    }

    pub fn build(&self) -> TableLoadStatement {
        let stmt = TableLoadStatement::new(self.sql()).bind(self.schema);
        match self.name_filter {
            Some(name) => stmt.bind(name),
            None => stmt,
        }
    }
}

/// Decide how tables of `owner` are enumerated.
///
/// System schemas already follow the standard metadata shape and go through
/// the generic path; everything else uses the union query. An explicit
/// `object` takes precedence over `object_name` as the name filter.
pub fn table_load_statement(
    config: &VerticaMetaConfig,
    owner: &Container,
    object: Option<&Table>,
    object_name: Option<&str>,
) -> MetaOverride<TableLoadStatement> {
    if config.is_system_schema(owner.name()) {
        tracing::debug!(
            schema = %owner.name(),
            "system schema, deferring to generic table enumeration"
        );
        return MetaOverride::UseDefault;
    }

    let name_filter = object.map(|t| t.name.as_str()).or(object_name);
    MetaOverride::Custom(
        TableLoadQuery::new(config, owner.name())
            .with_name_filter(name_filter)
            .build(),
    )
}

/// Procedure / function source rows, one fragment per row
pub(crate) fn procedure_source_sql(config: &VerticaMetaConfig) -> String {
    format!(
        "SELECT function_definition FROM {}.user_functions \
         WHERE schema_name = ? AND function_name = ?",
        config.catalog_schema
    )
}

/// All sequences of one schema, ordered by name
pub(crate) fn sequences_sql(config: &VerticaMetaConfig) -> String {
    format!(
        "SELECT * FROM {}.sequences WHERE sequence_schema = ? ORDER BY sequence_name",
        config.catalog_schema
    )
}

/// Native DDL export for one qualified object name
pub(crate) const EXPORT_OBJECTS_SQL: &str = "SELECT EXPORT_OBJECTS('', ?, false)";
