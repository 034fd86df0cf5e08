//! Decoding of Vertica table rows and columns

use zqlz_core::{Column, ColumnDescriptor, Container, Row, Table, TableKind};

use crate::catalog_query::{FLEXTABLE_TAG, TABLE_TAG, VIEW_TAG};

/// Object kinds produced by the Vertica table enumeration query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticaTableKind {
    Table,
    FlexTable,
    View,
}

impl VerticaTableKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            TABLE_TAG => Some(Self::Table),
            FLEXTABLE_TAG => Some(Self::FlexTable),
            VIEW_TAG => Some(Self::View),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Table => TABLE_TAG,
            Self::FlexTable => FLEXTABLE_TAG,
            Self::View => VIEW_TAG,
        }
    }
}

impl From<VerticaTableKind> for TableKind {
    fn from(kind: VerticaTableKind) -> Self {
        match kind {
            VerticaTableKind::Table => TableKind::Table,
            VerticaTableKind::FlexTable => TableKind::FlexTable,
            VerticaTableKind::View => TableKind::View,
        }
    }
}

/// Build a table entity from one enumeration row.
///
/// The union query only produces `TABLE`, `FLEXTABLE` and `VIEW`. Any other
/// tag comes from the generic listing of system schemas and is mapped the
/// same way the generic model maps it, with unknown tags read as tables.
///
/// Rows from the union query carry `owner_name`, `DEFINITION` and `REMARKS`;
/// rows from the generic listing do not, and those fields stay `None`.
pub fn decode_table(container: &Container, name: &str, table_type: &str, row: &Row) -> Table {
    let kind = match VerticaTableKind::from_tag(table_type) {
        Some(kind) => TableKind::from(kind),
        None => {
            let kind = TableKind::from_tag(table_type).unwrap_or(TableKind::Table);
            tracing::trace!(table = %name, tag = %table_type, kind = %kind, "generic table tag");
            kind
        }
    };

    let mut table = Table::persisted(container.name(), name, kind);
    table.owner = row.get_string("owner_name");
    table.definition = row.get_string("DEFINITION");
    table.remarks = row.get_string("REMARKS");
    table
}

/// Normalize a Vertica type name: lower case, without the length or
/// precision modifier (`VARCHAR(80)` becomes `varchar`).
pub fn normalize_type_name(type_name: &str) -> String {
    let base = match type_name.find('(') {
        Some(idx) => &type_name[..idx],
        None => type_name,
    };
    base.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// Build a Vertica column. Everything is carried through unchanged apart
/// from the type name.
pub fn decode_column(table: &Table, desc: ColumnDescriptor) -> Column {
    let type_name = normalize_type_name(&desc.type_name);
    Column {
        type_name,
        ..Column::from_descriptor(&table.name, desc)
    }
}
