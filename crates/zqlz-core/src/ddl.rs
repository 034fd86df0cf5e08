//! Engine-agnostic DDL synthesis for objects that only exist in memory

use crate::{DdlOptions, Table};

/// Quote an identifier with ANSI double quotes when it is not a plain
/// lower-case identifier.
pub fn quote_identifier(ident: &str) -> String {
    let plain = !ident.is_empty()
        && ident
            .chars()
            .next()
            .map(|c| c.is_ascii_lowercase() || c == '_')
            .unwrap_or(false)
        && ident
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if plain {
        ident.to_string()
    } else {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}

fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn object_name(table: &Table, options: &DdlOptions) -> String {
    if options.qualify_names && !table.schema.is_empty() {
        format!(
            "{}.{}",
            quote_identifier(&table.schema),
            quote_identifier(&table.name)
        )
    } else {
        quote_identifier(&table.name)
    }
}

/// Generate DDL for a table or view from its in-memory state.
///
/// Views are rendered from their stored definition; tables from their
/// columns in ordinal order.
pub fn generate_table_ddl(table: &Table, options: &DdlOptions) -> String {
    let name = object_name(table, options);

    let mut ddl = if table.kind.is_view() {
        let body = table
            .definition
            .as_deref()
            .map(|d| d.trim().trim_end_matches(';').to_string())
            .unwrap_or_else(|| "-- view definition not available".to_string());
        format!("CREATE VIEW {} AS\n{};\n", name, body)
    } else {
        let mut columns: Vec<_> = table.columns.iter().collect();
        columns.sort_by_key(|c| c.ordinal);

        let mut ddl = format!("CREATE TABLE {} (\n", name);
        for (i, col) in columns.iter().enumerate() {
            let comma = if i + 1 < columns.len() { "," } else { "" };
            let default_str = col
                .default_value
                .as_ref()
                .map(|d| format!(" DEFAULT {}", d))
                .unwrap_or_default();
            let null_str = if col.not_null { " NOT NULL" } else { "" };
            ddl.push_str(&format!(
                "    {} {}{}{}{}\n",
                quote_identifier(&col.name),
                col.type_name,
                default_str,
                null_str,
                comma
            ));
        }
        ddl.push_str(");\n");
        ddl
    };

    if options.include_comments {
        let kind = if table.kind.is_view() { "VIEW" } else { "TABLE" };
        if let Some(remarks) = &table.remarks {
            ddl.push_str(&format!(
                "\nCOMMENT ON {} {} IS {};\n",
                kind,
                name,
                quote_literal(remarks)
            ));
        }
        for col in table.columns.iter().filter(|c| c.remarks.is_some()) {
            if let Some(remarks) = &col.remarks {
                ddl.push_str(&format!(
                    "COMMENT ON COLUMN {}.{} IS {};\n",
                    name,
                    quote_identifier(&col.name),
                    quote_literal(remarks)
                ));
            }
        }
    }

    ddl
}
