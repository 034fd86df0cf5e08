//! Metadata entities produced during an introspection pass

use serde::{Deserialize, Serialize};

/// A named namespace (schema) inside a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub catalog: Option<String>,
    pub name: String,
    /// Set by the metadata model for the engine's own internal schemas
    #[serde(default)]
    pub is_system: bool,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            name: name.into(),
            is_system: false,
        }
    }

    pub fn in_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn system(mut self, is_system: bool) -> Self {
        self.is_system = is_system;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Table kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Table,
    /// Schema-less table whose columns are materialized on demand
    FlexTable,
    View,
    System,
}

impl TableKind {
    /// Catalog tag for this kind, as reported by metadata queries
    pub fn tag(&self) -> &'static str {
        match self {
            TableKind::Table => "TABLE",
            TableKind::FlexTable => "FLEXTABLE",
            TableKind::View => "VIEW",
            TableKind::System => "SYSTEM TABLE",
        }
    }

    /// Parse a catalog tag. Unknown tags return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "TABLE" | "BASE TABLE" => Some(TableKind::Table),
            "FLEXTABLE" => Some(TableKind::FlexTable),
            "VIEW" => Some(TableKind::View),
            "SYSTEM TABLE" => Some(TableKind::System),
            _ => None,
        }
    }

    pub fn is_view(&self) -> bool {
        matches!(self, TableKind::View)
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Table or view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Name of the owning container
    pub schema: String,
    pub name: String,
    pub kind: TableKind,
    pub owner: Option<String>,
    /// Raw definition text as stored in the catalog (view query, flex table source, ...)
    pub definition: Option<String>,
    pub remarks: Option<String>,
    /// False for in-memory drafts that have not been created in the database yet
    pub persisted: bool,
    /// Columns known for this table. Empty until the column path has run,
    /// except for drafts whose columns were defined by the user.
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    /// A table that exists in the live catalog
    pub fn persisted(schema: impl Into<String>, name: impl Into<String>, kind: TableKind) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            kind,
            owner: None,
            definition: None,
            remarks: None,
            persisted: true,
            columns: Vec::new(),
        }
    }

    /// An in-memory draft that has not been created yet
    pub fn draft(schema: impl Into<String>, name: impl Into<String>, kind: TableKind) -> Self {
        Self {
            persisted: false,
            ..Self::persisted(schema, name, kind)
        }
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// `schema.name`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

/// Column attributes as decoded from a column metadata row, before a
/// metadata model turns them into a `Column`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub type_name: String,
    /// Generic value type code (JDBC style `java.sql.Types` numbering)
    pub value_type: i32,
    /// Driver specific type code
    pub source_type: i32,
    /// 1-based position within the table
    pub ordinal: u32,
    pub column_size: i64,
    pub char_length: i64,
    pub scale: Option<i32>,
    pub precision: Option<i32>,
    pub radix: i32,
    pub not_null: bool,
    pub remarks: Option<String>,
    pub default_value: Option<String>,
    pub auto_increment: bool,
    pub auto_generated: bool,
}

/// Table column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub table: String,
    pub name: String,
    pub type_name: String,
    pub value_type: i32,
    pub source_type: i32,
    pub ordinal: u32,
    pub column_size: i64,
    pub char_length: i64,
    pub scale: Option<i32>,
    pub precision: Option<i32>,
    pub radix: i32,
    pub not_null: bool,
    pub remarks: Option<String>,
    pub default_value: Option<String>,
    pub auto_increment: bool,
    pub auto_generated: bool,
}

impl Column {
    /// Build a column of `table` carrying every descriptor field unchanged
    pub fn from_descriptor(table: &str, desc: ColumnDescriptor) -> Self {
        Self {
            table: table.to_string(),
            name: desc.name,
            type_name: desc.type_name,
            value_type: desc.value_type,
            source_type: desc.source_type,
            ordinal: desc.ordinal,
            column_size: desc.column_size,
            char_length: desc.char_length,
            scale: desc.scale,
            precision: desc.precision,
            radix: desc.radix,
            not_null: desc.not_null,
            remarks: desc.remarks,
            default_value: desc.default_value,
            auto_increment: desc.auto_increment,
            auto_generated: desc.auto_generated,
        }
    }
}

/// Sequence. Every numeric attribute is optional because catalogs may omit any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub schema: String,
    pub name: String,
    pub description: Option<String>,
    pub current_value: Option<i64>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub increment_by: Option<i64>,
}

/// Stored procedure or user defined function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub schema: String,
    pub name: String,
}

impl Procedure {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

/// Options for DDL generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DdlOptions {
    /// Emit `COMMENT ON` statements for table and column remarks
    pub include_comments: bool,
    /// Prefix object names with their schema
    pub qualify_names: bool,
}

impl Default for DdlOptions {
    fn default() -> Self {
        Self {
            include_comments: true,
            qualify_names: true,
        }
    }
}
