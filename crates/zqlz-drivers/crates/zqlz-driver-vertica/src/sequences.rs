//! Sequence loading from `v_catalog.sequences`

use zqlz_core::{Container, DataSource, Result, Row, Sequence, Value, ZqlzError, with_meta_session};

use crate::catalog_query::sequences_sql;
use crate::config::VerticaMetaConfig;

/// Decode one catalog row. Rows without a name are skipped.
pub(crate) fn decode_sequence(schema: &str, row: &Row) -> Option<Sequence> {
    let name = row.get_string("sequence_name")?;
    Some(Sequence {
        schema: schema.to_string(),
        name: name.trim().to_string(),
        description: None,
        current_value: row.get_i64("current_value"),
        min_value: row.get_i64("minimum"),
        max_value: row.get_i64("maximum"),
        increment_by: row.get_i64("increment_by"),
    })
}

/// Load the sequences of `container` in catalog (name) order
#[tracing::instrument(skip(data_source, config, container), fields(schema = %container.name()))]
pub(crate) async fn load_sequences(
    data_source: &DataSource,
    config: &VerticaMetaConfig,
    container: &Container,
) -> Result<Vec<Sequence>> {
    let sql = sequences_sql(config);
    let schema = container.name().to_string();

    with_meta_session(
        data_source.sessions(),
        "Read system sequences",
        |session| async move {
            let result = session
                .query(&sql, &[Value::String(schema.clone())])
                .await?;

            let mut sequences = Vec::with_capacity(result.row_count());
            for row in &result.rows {
                match decode_sequence(&schema, row) {
                    Some(sequence) => sequences.push(sequence),
                    None => {
                        tracing::warn!(schema = %schema, "skipping sequence row without a name")
                    }
                }
            }
            tracing::debug!(count = sequences.len(), "loaded sequences");
            Ok(sequences)
        },
    )
    .await
    .map_err(|e| ZqlzError::data_access(data_source.name(), e))
}
