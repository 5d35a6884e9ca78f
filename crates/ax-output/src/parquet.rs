//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `accessibility.parquet` (distances `Float64` nullable, counts `UInt32`)
//! - `amenities.parquet`

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Float64Builder, Int64Builder, StringBuilder, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use ax_access::{AccessibilityTable, ColumnData};
use ax_poi::PoiRecord;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

fn amenity_schema() -> Arc<Schema> {
    let mut fields = vec![
        Field::new("osm_id",  DataType::Int64,   true),
        Field::new("lat",     DataType::Float64, false),
        Field::new("lon",     DataType::Float64, false),
        Field::new("amenity", DataType::Utf8,    false),
    ];
    for name in &PoiRecord::COLUMNS[4..] {
        fields.push(Field::new(*name, DataType::Utf8, true));
    }
    Arc::new(Schema::new(fields))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes a report to two Parquet files.
///
/// `finish()` **must** be called to write the amenities file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    dir:            PathBuf,
    amenities:      Option<ArrowWriter<File>>,
    amenity_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create `amenities.parquet` in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let amenity_schema = amenity_schema();
        let file = File::create(dir.join("amenities.parquet"))?;
        let amenities = ArrowWriter::try_new(file, Arc::clone(&amenity_schema), Some(snappy_props()))?;

        Ok(Self {
            dir: dir.to_path_buf(),
            amenities: Some(amenities),
            amenity_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_table(&mut self, table: &AccessibilityTable) -> OutputResult<()> {
        if self.amenities.is_none() {
            return Err(OutputError::Finished);
        }
        let columns = table.columns();
        let mut fields = Vec::with_capacity(columns.len());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len());
        for c in columns {
            match c.data {
                ColumnData::Float(values) => {
                    fields.push(Field::new(c.name, DataType::Float64, true));
                    arrays.push(Arc::new(Float64Array::from(values)));
                }
                ColumnData::UInt(values) => {
                    fields.push(Field::new(c.name, DataType::UInt32, false));
                    arrays.push(Arc::new(UInt32Array::from(values)));
                }
            }
        }
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(Arc::clone(&schema), arrays)?;

        let file = File::create(self.dir.join("accessibility.parquet"))?;
        let mut writer = ArrowWriter::try_new(file, schema, Some(snappy_props()))?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(())
    }

    fn write_amenities(&mut self, rows: &[PoiRecord]) -> OutputResult<()> {
        let Some(writer) = self.amenities.as_mut() else {
            return Err(OutputError::Finished);
        };
        if rows.is_empty() {
            return Ok(());
        }

        let mut osm_ids = Int64Builder::new();
        let mut lats    = Float64Builder::new();
        let mut lons    = Float64Builder::new();
        let mut kinds   = StringBuilder::new();
        let mut text: Vec<StringBuilder> = (4..PoiRecord::COLUMNS.len()).map(|_| StringBuilder::new()).collect();

        for row in rows {
            osm_ids.append_option(row.osm_id);
            lats.append_value(row.lat);
            lons.append_value(row.lon);
            kinds.append_value(&row.amenity);
            let optional = [
                &row.name,
                &row.addr_city,
                &row.addr_street,
                &row.addr_province,
                &row.addr_town,
                &row.addr_housenumber,
                &row.addr_municipality,
            ];
            for (builder, value) in text.iter_mut().zip(optional) {
                builder.append_option(value.as_deref());
            }
        }

        let mut arrays: Vec<ArrayRef> = vec![
            Arc::new(osm_ids.finish()),
            Arc::new(lats.finish()),
            Arc::new(lons.finish()),
            Arc::new(kinds.finish()),
        ];
        arrays.extend(text.iter_mut().map(|b| Arc::new(b.finish()) as ArrayRef));

        let batch = RecordBatch::try_new(Arc::clone(&self.amenity_schema), arrays)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.amenities.take() {
            w.close()?;
        }
        Ok(())
    }
}
