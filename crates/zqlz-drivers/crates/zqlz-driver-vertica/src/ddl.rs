//! DDL retrieval for Vertica objects
//!
//! Persisted objects are exported by the server itself through
//! `EXPORT_OBJECTS`; procedure and function sources are read from the
//! catalog, where long definitions may be split across several rows.

use zqlz_core::{DataSource, Procedure, Result, Table, Value, ZqlzError, with_meta_session};

use crate::catalog_query::{EXPORT_OBJECTS_SQL, procedure_source_sql};
use crate::config::VerticaMetaConfig;

/// Quote an identifier for use inside an `EXPORT_OBJECTS` object list
pub(crate) fn quote_export_identifier(ident: &str) -> String {
    let plain = ident
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false)
        && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        ident.to_string()
    } else {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}

/// `schema.name` as expected by `EXPORT_OBJECTS`
pub(crate) fn export_object_name(table: &Table) -> String {
    format!(
        "{}.{}",
        quote_export_identifier(&table.schema),
        quote_export_identifier(&table.name)
    )
}

/// Tidy an exported script: trim it and optionally drop the
/// `SELECT MARK_DESIGN_KSAFE(...)` statement appended to every export.
pub(crate) fn clean_export(script: &str, strip_ksafe_marks: bool) -> String {
    let body = if strip_ksafe_marks {
        script
            .split_inclusive('\n')
            .filter(|line| {
                !line
                    .trim_start()
                    .to_ascii_uppercase()
                    .starts_with("SELECT MARK_DESIGN_KSAFE")
            })
            .collect::<String>()
    } else {
        script.to_string()
    };
    body.trim().to_string()
}

/// Ask the server to export the definition of a persisted table or view
#[tracing::instrument(skip(data_source, config, table), fields(object = %table.qualified_name()))]
pub(crate) async fn export_object_ddl(
    data_source: &DataSource,
    config: &VerticaMetaConfig,
    table: &Table,
) -> Result<String> {
    let object_name = export_object_name(table);
    let strip = config.strip_ksafe_marks;

    let script = with_meta_session(
        data_source.sessions(),
        "Export Vertica object DDL",
        |session| async move {
            let result = session
                .query(EXPORT_OBJECTS_SQL, &[Value::String(object_name.clone())])
                .await?;
            result
                .rows
                .first()
                .and_then(|row| row.get(0))
                .and_then(|v| v.as_str().map(str::to_string))
                .ok_or_else(|| {
                    ZqlzError::NotFound(format!("no DDL exported for {}", object_name))
                })
        },
    )
    .await
    .map_err(|e| ZqlzError::data_access(data_source.name(), e))?;

    Ok(clean_export(&script, strip))
}

/// Read the source of a procedure or function by concatenating every
/// definition fragment in result order. No rows yields an empty string.
#[tracing::instrument(skip(data_source, config, procedure), fields(procedure = %procedure.name))]
pub(crate) async fn read_procedure_source(
    data_source: &DataSource,
    config: &VerticaMetaConfig,
    procedure: &Procedure,
) -> Result<String> {
    let sql = procedure_source_sql(config);
    let params = [
        Value::String(procedure.schema.clone()),
        Value::String(procedure.name.clone()),
    ];

    with_meta_session(
        data_source.sessions(),
        "Read Vertica procedure source",
        |session| async move {
            let result = session.query(&sql, &params).await?;
            let mut source = String::new();
            for row in &result.rows {
                match row.get(0) {
                    Some(Value::Null) | None => {
                        tracing::debug!("skipping empty definition fragment");
                    }
                    Some(Value::String(fragment)) => source.push_str(fragment),
                    Some(other) => source.push_str(&other.to_string()),
                }
            }
            Ok(source)
        },
    )
    .await
    .map_err(|e| ZqlzError::data_access(data_source.name(), e))
}
