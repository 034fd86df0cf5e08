//! Generic introspection engine
//!
//! `MetaIntrospector` walks a data source's catalog through the standard
//! `information_schema` views and consults its `MetaModel` at every step,
//! using the model's result whenever it returns `MetaOverride::Custom`.

use crate::{
    Column, ColumnDescriptor, ConnectionConfig, Container, DataSource, DdlOptions, MetaModel,
    MetaOverride, Procedure, QueryTransformType, QueryTransformer, Result, Row, Sequence,
    SessionProvider, Table, TableLoadStatement, Value, ZqlzError, ddl, with_meta_session,
};
use std::sync::Arc;

const GENERIC_TABLES_SQL: &str = "SELECT NULL AS TABLE_CAT, table_schema AS TABLE_SCHEM, \
     table_name AS TABLE_NAME, table_type AS TABLE_TYPE, NULL AS REMARKS\n\
     FROM information_schema.tables\n\
     WHERE table_schema = ?";

const GENERIC_COLUMNS_SQL: &str = "SELECT column_name, data_type, ordinal_position, \
     character_maximum_length, \
     numeric_precision, numeric_scale, is_nullable, column_default\n\
     FROM information_schema.columns\n\
     WHERE table_schema = ? AND table_name = ?\n\
     ORDER BY ordinal_position";

const GENERIC_ROUTINE_SQL: &str = "SELECT routine_definition FROM information_schema.routines \
     WHERE routine_schema = ? AND routine_name = ?";

/// Standard table enumeration statement, used when the model defers
pub fn generic_table_load_statement(
    owner: &Container,
    object: Option<&Table>,
    object_name: Option<&str>,
) -> TableLoadStatement {
    let name_filter = object.map(|t| t.name.as_str()).or(object_name);
    let mut sql = GENERIC_TABLES_SQL.to_string();
    if name_filter.is_some() {
        sql.push_str(" AND table_name LIKE ?");
    }
    sql.push_str("\nORDER BY table_schema, table_name");

    let stmt = TableLoadStatement::new(sql).bind(owner.name());
    match name_filter {
        Some(name) => stmt.bind(name),
        None => stmt,
    }
}

/// JDBC style type code for a declared type name
pub fn value_type_code(type_name: &str) -> i32 {
    let base = type_name
        .split('(')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match base.as_str() {
        "boolean" | "bool" => 16,
        "tinyint" => -6,
        "smallint" => 5,
        "int" | "integer" => 4,
        "bigint" => -5,
        "float" | "double precision" | "float8" | "real" => 8,
        "numeric" | "decimal" | "number" | "money" => 2,
        "char" | "character" => 1,
        "varchar" | "character varying" => 12,
        "long varchar" | "text" => -1,
        "binary" => -2,
        "varbinary" => -3,
        "long varbinary" | "bytea" => -4,
        "date" => 91,
        "time" | "timetz" | "time with timezone" => 92,
        "timestamp" | "timestamptz" | "timestamp with timezone" | "datetime" => 93,
        _ => 1111,
    }
}

/// Generic metadata engine bound to one data source and its model
pub struct MetaIntrospector {
    data_source: DataSource,
    model: Arc<dyn MetaModel>,
}

impl MetaIntrospector {
    /// Register a data source with `model`, or with the connection specific
    /// model it hands out for `config`
    pub fn new(
        model: Arc<dyn MetaModel>,
        config: ConnectionConfig,
        sessions: Arc<dyn SessionProvider>,
    ) -> Result<Self> {
        let model = match model.connection_model(&config)? {
            MetaOverride::Custom(configured) => configured,
            MetaOverride::UseDefault => model,
        };
        let data_source = model.create_data_source(config, sessions)?;
        tracing::info!(
            data_source = %data_source.name(),
            driver = %model.driver_id(),
            "registered data source"
        );
        Ok(Self { data_source, model })
    }

    pub fn data_source(&self) -> &DataSource {
        &self.data_source
    }

    pub fn model(&self) -> &dyn MetaModel {
        self.model.as_ref()
    }

    /// Resolve a schema container by name
    pub fn schema(&self, name: &str) -> Result<Container> {
        self.model.create_schema(&self.data_source, None, name)
    }

    /// Schema used when a request names none
    pub fn default_schema(&self) -> Result<Option<Container>> {
        self.data_source
            .default_schema()
            .map(|name| self.schema(name))
            .transpose()
    }

    fn wrap(&self, err: ZqlzError) -> ZqlzError {
        ZqlzError::data_access(self.data_source.name(), err)
    }

    /// Enumerate tables and views of `container`, optionally restricted by a
    /// `LIKE` pattern on the name.
    #[tracing::instrument(skip(self, container), fields(schema = %container.name()))]
    pub async fn list_tables(
        &self,
        container: &Container,
        name_filter: Option<&str>,
    ) -> Result<Vec<Table>> {
        let stmt = match self
            .model
            .prepare_table_load_statement(container, None, name_filter)
        {
            MetaOverride::Custom(stmt) => stmt,
            MetaOverride::UseDefault => {
                tracing::debug!("using generic table enumeration");
                generic_table_load_statement(container, None, name_filter)
            }
        };

        let model = Arc::clone(&self.model);
        let owner = container.clone();
        with_meta_session(
            self.data_source.sessions(),
            "Load tables",
            |session| async move {
                let result = session.query(&stmt.sql, &stmt.params).await?;
                let mut tables = Vec::with_capacity(result.row_count());
                for row in &result.rows {
                    let Some(name) = row.get_string("TABLE_NAME") else {
                        tracing::warn!(schema = %owner.name(), "skipping table row without a name");
                        continue;
                    };
                    let table_type = row
                        .get_string("TABLE_TYPE")
                        .unwrap_or_else(|| "TABLE".to_string());
                    tables.push(model.create_table(&owner, &name, &table_type, row)?);
                }
                Ok(tables)
            },
        )
        .await
        .map_err(|e| self.wrap(e))
    }

    /// Look up one table by exact name
    pub async fn find_table(&self, container: &Container, name: &str) -> Result<Option<Table>> {
        let tables = self.list_tables(container, Some(name)).await?;
        Ok(tables.into_iter().find(|t| t.name == name))
    }

    /// Load the columns of a persisted table through the generic column path
    #[tracing::instrument(skip(self, table), fields(table = %table.qualified_name()))]
    pub async fn load_columns(&self, table: &Table) -> Result<Vec<Column>> {
        let model = Arc::clone(&self.model);
        let owner = table.clone();
        let params = [
            Value::String(table.schema.clone()),
            Value::String(table.name.clone()),
        ];

        with_meta_session(
            self.data_source.sessions(),
            "Load table columns",
            |session| async move {
                let result = session.query(GENERIC_COLUMNS_SQL, &params).await?;
                let mut columns = Vec::with_capacity(result.row_count());
                for row in &result.rows {
                    let Some(desc) = decode_column(row) else {
                        tracing::warn!(table = %owner.name, "skipping column row without a name");
                        continue;
                    };
                    columns.push(model.create_table_column(&owner, desc)?);
                }
                columns.sort_by_key(|c: &Column| c.ordinal);
                if columns.windows(2).any(|w| w[0].ordinal == w[1].ordinal) {
                    return Err(ZqlzError::Schema(format!(
                        "duplicate column ordinal in {}",
                        owner.qualified_name()
                    )));
                }
                Ok(columns)
            },
        )
        .await
        .map_err(|e| self.wrap(e))
    }

    /// DDL for a table or view
    #[tracing::instrument(skip(self, table, options), fields(table = %table.qualified_name()))]
    pub async fn table_ddl(&self, table: &Table, options: &DdlOptions) -> Result<String> {
        let resolved = if table.kind.is_view() {
            self.model.view_ddl(&self.data_source, table, options).await
        } else {
            self.model.table_ddl(&self.data_source, table, options).await
        };

        match resolved.map_err(|e| self.wrap(e))? {
            MetaOverride::Custom(ddl) => Ok(ddl),
            MetaOverride::UseDefault => {
                tracing::debug!(persisted = table.persisted, "synthesizing generic DDL");
                Ok(ddl::generate_table_ddl(table, options))
            }
        }
    }

    /// Source text of a procedure
    #[tracing::instrument(skip(self, procedure), fields(procedure = %procedure.name))]
    pub async fn procedure_ddl(&self, procedure: &Procedure) -> Result<String> {
        let resolved = self
            .model
            .procedure_ddl(&self.data_source, procedure)
            .await
            .map_err(|e| self.wrap(e))?;
        if let MetaOverride::Custom(source) = resolved {
            return Ok(source);
        }

        let params = [
            Value::String(procedure.schema.clone()),
            Value::String(procedure.name.clone()),
        ];
        with_meta_session(
            self.data_source.sessions(),
            "Read procedure source",
            |session| async move {
                let result = session.query(GENERIC_ROUTINE_SQL, &params).await?;
                Ok(result
                    .rows
                    .iter()
                    .filter_map(|row| row.get_string("routine_definition"))
                    .collect::<String>())
            },
        )
        .await
        .map_err(|e| self.wrap(e))
    }

    /// Sequences of `container`; empty when the engine has none
    #[tracing::instrument(skip(self, container), fields(schema = %container.name()))]
    pub async fn list_sequences(&self, container: &Container) -> Result<Vec<Sequence>> {
        if !self.model.supports_sequences(&self.data_source) {
            return Ok(Vec::new());
        }
        match self
            .model
            .load_sequences(&self.data_source, container)
            .await
            .map_err(|e| self.wrap(e))?
        {
            MetaOverride::Custom(sequences) => Ok(sequences),
            MetaOverride::UseDefault => Ok(Vec::new()),
        }
    }

    /// Transformer for `transform_type`; `None` means run the query as is
    pub fn query_transformer(
        &self,
        transform_type: QueryTransformType,
    ) -> Option<Box<dyn QueryTransformer>> {
        self.model.create_query_transformer(transform_type)
    }
}

fn decode_column(row: &Row) -> Option<ColumnDescriptor> {
    let name = row.get_string("column_name")?;
    let type_name = row.get_string("data_type").unwrap_or_default();
    let char_length = row.get_i64("character_maximum_length").unwrap_or(0);
    let precision = row
        .get_i64("numeric_precision")
        .and_then(|v| i32::try_from(v).ok());
    let nullable = row
        .get_string("is_nullable")
        .map(|v| !v.eq_ignore_ascii_case("NO"))
        .unwrap_or(true);
    let ordinal = row
        .get_i64("ordinal_position")
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0);

    Some(ColumnDescriptor {
        value_type: value_type_code(&type_name),
        source_type: value_type_code(&type_name),
        ordinal,
        column_size: if char_length > 0 {
            char_length
        } else {
            precision.map(i64::from).unwrap_or(0)
        },
        char_length,
        scale: row
            .get_i64("numeric_scale")
            .and_then(|v| i32::try_from(v).ok()),
        precision,
        radix: 10,
        not_null: !nullable,
        default_value: row.get_string("column_default"),
        name,
        type_name,
        ..Default::default()
    })
}
