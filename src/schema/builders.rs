use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::constants::{CORPUS_FORMAT_VERSION, KEY_FORMAT_VERSION};

/// Creates the Arrow schema of the exported corpus table.
///
/// One row per surviving peak per sample. Sample labels repeat across the
/// peaks of a sample, so the column compresses well with dictionary + RLE.
///
/// # Example
///
/// ```
/// use gcms_compare::schema::create_corpus_schema;
///
/// let schema = create_corpus_schema();
/// assert_eq!(schema.fields().len(), 10);
/// ```
pub fn create_corpus_schema() -> Schema {
    let mut builder = SchemaBuilder::new();

    builder.push(Field::new(columns::SAMPLE, DataType::Utf8, false));
    builder.push(Field::new(columns::PEAK, DataType::UInt32, false));
    builder.push(Field::new(columns::RETENTION_TIME, DataType::Float64, false));

    // Abundance measures may be absent in the source report
    builder.push(Field::new(columns::HEIGHT, DataType::Float64, true));
    builder.push(Field::new(columns::AREA, DataType::Float64, true));

    // Null marks an unidentified compound
    builder.push(Field::new(columns::COMPOUND, DataType::Utf8, true));
    builder.push(Field::new(columns::IDENTIFIER, DataType::Utf8, false));
    builder.push(Field::new(columns::LIBRARY_RETENTION_TIME, DataType::Float64, true));

    builder.push(Field::new(columns::PEAK_FIELDS, DataType::Utf8, false));
    builder.push(Field::new(columns::LIBRARY_FIELDS, DataType::Utf8, true));

    let mut metadata = HashMap::new();
    metadata.insert(
        KEY_FORMAT_VERSION.to_string(),
        CORPUS_FORMAT_VERSION.to_string(),
    );

    builder.finish().with_metadata(metadata)
}

/// Creates the corpus schema wrapped in an `Arc`.
pub fn create_corpus_schema_arc() -> Arc<Schema> {
    Arc::new(create_corpus_schema())
}
