//! Corpus table as Parquet.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, StringBuilder, UInt32Builder};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use log::info;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;
use serde_json::{Map, Value};

use super::ExportError;
use crate::corpus::{BatchOutcome, Corpus, CorpusRecord, SkippedFile};
use crate::normalize::Strictness;
use crate::schema::{
    columns, create_corpus_schema_arc, CORPUS_FORMAT_VERSION, KEY_CREATED_AT, KEY_FORMAT_VERSION,
    KEY_NORMALIZER, KEY_SAMPLES, KEY_SKIPPED_FILES, KEY_WRITER_INFO,
};

/// Configuration for the corpus writer
#[derive(Debug, Clone)]
pub struct CorpusWriterConfig {
    /// ZSTD compression level
    pub compression_level: i32,

    /// Target row group size
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write statistics for columns
    pub write_statistics: bool,
}

impl Default for CorpusWriterConfig {
    fn default() -> Self {
        Self {
            compression_level: 3,
            row_group_size: 64 * 1024,
            data_page_size: 1024 * 1024,
            write_statistics: true,
        }
    }
}

impl CorpusWriterConfig {
    fn to_writer_properties(&self, metadata: &HashMap<String, String>) -> WriterProperties {
        let compression = Compression::ZSTD(
            ZstdLevel::try_new(self.compression_level).unwrap_or_default(),
        );

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size);

        // JSON blobs are near-unique per row
        for column in [columns::PEAK_FIELDS, columns::LIBRARY_FIELDS] {
            builder = builder
                .set_column_dictionary_enabled(ColumnPath::new(vec![column.to_string()]), false);
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder.set_key_value_metadata(Some(kv_metadata)).build()
    }
}

/// Footer metadata describing how a corpus was produced.
#[derive(Debug, Clone)]
pub struct CorpusMetadata {
    /// When the corpus was analyzed.
    pub created_at: DateTime<Utc>,
    /// Sample labels in upload order.
    pub samples: Vec<String>,
    /// Files left out of the corpus.
    pub skipped: Vec<SkippedFile>,
    /// Normalizer policy used for `Compound`.
    pub strictness: Strictness,
}

impl CorpusMetadata {
    /// Metadata for a corpus with no skipped files.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self {
            created_at: Utc::now(),
            samples: corpus.samples().iter().map(|s| s.to_string()).collect(),
            skipped: Vec::new(),
            strictness: corpus.strictness(),
        }
    }

    /// Metadata for a batch outcome, including its skipped files.
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        Self {
            skipped: outcome.skipped.clone(),
            ..Self::from_corpus(&outcome.corpus)
        }
    }

    /// Convert to Parquet footer key-value pairs.
    pub fn to_parquet_metadata(&self) -> Result<HashMap<String, String>, ExportError> {
        let mut metadata = HashMap::new();

        metadata.insert(
            KEY_FORMAT_VERSION.to_string(),
            CORPUS_FORMAT_VERSION.to_string(),
        );
        metadata.insert(KEY_CREATED_AT.to_string(), self.created_at.to_rfc3339());
        metadata.insert(
            KEY_WRITER_INFO.to_string(),
            format!("gcms-compare v{}", env!("CARGO_PKG_VERSION")),
        );
        metadata.insert(KEY_SAMPLES.to_string(), serde_json::to_string(&self.samples)?);
        metadata.insert(
            KEY_SKIPPED_FILES.to_string(),
            serde_json::to_string(&self.skipped)?,
        );
        metadata.insert(KEY_NORMALIZER.to_string(), self.strictness.to_string());

        Ok(metadata)
    }
}

/// Streaming writer for corpus Parquet files
pub struct CorpusWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: Arc<Schema>,
    rows_written: usize,
    identified_written: usize,
}

impl CorpusWriter<File> {
    /// Create a new writer to a file path
    pub fn new_file<P: AsRef<Path>>(
        path: P,
        metadata: &CorpusMetadata,
        config: CorpusWriterConfig,
    ) -> Result<Self, ExportError> {
        let file = File::create(path)?;
        Self::new(file, metadata, config)
    }
}

impl<W: Write + Send> CorpusWriter<W> {
    /// Create a new writer to any Write implementation
    pub fn new(
        writer: W,
        metadata: &CorpusMetadata,
        config: CorpusWriterConfig,
    ) -> Result<Self, ExportError> {
        let schema = create_corpus_schema_arc();
        let props = config.to_writer_properties(&metadata.to_parquet_metadata()?);
        let writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;

        Ok(Self {
            writer,
            schema,
            rows_written: 0,
            identified_written: 0,
        })
    }

    /// Write a batch of corpus rows
    pub fn write_records<'a, I>(&mut self, rows: I) -> Result<(), ExportError>
    where
        I: IntoIterator<Item = &'a CorpusRecord>,
    {
        let rows: Vec<&CorpusRecord> = rows.into_iter().collect();
        if rows.is_empty() {
            return Ok(());
        }
        let len = rows.len();

        let mut sample = StringBuilder::with_capacity(len, len * 16);
        let mut peak = UInt32Builder::with_capacity(len);
        let mut retention_time = Float64Builder::with_capacity(len);
        let mut height = Float64Builder::with_capacity(len);
        let mut area = Float64Builder::with_capacity(len);
        let mut compound = StringBuilder::with_capacity(len, len * 24);
        let mut identifier = StringBuilder::with_capacity(len, len * 24);
        let mut library_rt = Float64Builder::with_capacity(len);
        let mut peak_fields = StringBuilder::with_capacity(len, len * 32);
        let mut library_fields = StringBuilder::with_capacity(len, len * 32);

        for row in &rows {
            let record = &row.record;
            sample.append_value(row.sample());
            peak.append_value(record.peak.peak);
            retention_time.append_value(record.peak.retention_time);
            height.append_option(record.peak.height);
            area.append_option(record.peak.area);
            compound.append_option(row.compound.as_canonical());
            identifier.append_value(record.identifier());
            library_rt.append_option(record.library.as_ref().and_then(|m| m.retention_time));
            peak_fields.append_value(peak_fields_json(row)?);
            match &record.library {
                Some(m) => library_fields.append_value(serde_json::to_string(&object(&m.attributes))?),
                None => library_fields.append_null(),
            }
            if row.is_identified() {
                self.identified_written += 1;
            }
        }

        let arrays: Vec<ArrayRef> = vec![
            Arc::new(sample.finish()),
            Arc::new(peak.finish()),
            Arc::new(retention_time.finish()),
            Arc::new(height.finish()),
            Arc::new(area.finish()),
            Arc::new(compound.finish()),
            Arc::new(identifier.finish()),
            Arc::new(library_rt.finish()),
            Arc::new(peak_fields.finish()),
            Arc::new(library_fields.finish()),
        ];

        let batch = RecordBatch::try_new(self.schema.clone(), arrays)?;
        self.writer.write(&batch)?;
        self.rows_written += len;

        Ok(())
    }

    /// Write every row of a corpus
    pub fn write_corpus(&mut self, corpus: &Corpus) -> Result<(), ExportError> {
        self.write_records(corpus.records())
    }

    /// Flush any buffered data and finalize the file
    pub fn finish(self) -> Result<CorpusWriterStats, ExportError> {
        let file_metadata = self.writer.close()?;

        Ok(CorpusWriterStats {
            rows_written: self.rows_written,
            identified_written: self.identified_written,
            row_groups_written: file_metadata.row_groups.len(),
        })
    }

    /// Finalize and return the inner writer
    pub fn finish_into_inner(self) -> Result<W, ExportError> {
        Ok(self.writer.into_inner()?)
    }

    /// Get current statistics
    pub fn stats(&self) -> CorpusWriterStats {
        CorpusWriterStats {
            rows_written: self.rows_written,
            identified_written: self.identified_written,
            row_groups_written: 0, // Unknown until finish
        }
    }
}

fn object(fields: &[(String, String)]) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect()
}

fn peak_fields_json(row: &CorpusRecord) -> Result<String, ExportError> {
    let peak = &row.record.peak;
    let mut fields = object(&peak.attributes);
    for (name, value) in &peak.percentages {
        let value = value
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        fields.insert(name.clone(), value);
    }
    Ok(serde_json::to_string(&fields)?)
}

/// Write a batch outcome to a Parquet file with default settings.
pub fn write_corpus_parquet<P: AsRef<Path>>(
    path: P,
    outcome: &BatchOutcome,
) -> Result<CorpusWriterStats, ExportError> {
    let path = path.as_ref();
    let mut writer = CorpusWriter::new_file(
        path,
        &CorpusMetadata::from_outcome(outcome),
        CorpusWriterConfig::default(),
    )?;
    writer.write_corpus(&outcome.corpus)?;
    let stats = writer.finish()?;
    info!("{}: {}", path.display(), stats);
    Ok(stats)
}

/// Statistics from a completed corpus write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusWriterStats {
    /// Rows written
    pub rows_written: usize,
    /// Rows with a canonical compound name
    pub identified_written: usize,
    /// Row groups in the file
    pub row_groups_written: usize,
}

impl std::fmt::Display for CorpusWriterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} rows ({} identified) in {} row groups",
            self.rows_written, self.identified_written, self.row_groups_written
        )
    }
}
