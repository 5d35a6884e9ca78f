//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `accessibility` (schema derived from the written table) and
//! `amenities`.

use std::path::Path;

use rusqlite::Connection;
use rusqlite::types::Value;

use ax_access::{AccessibilityTable, ColumnData};
use ax_poi::PoiRecord;

use crate::{OutputError, OutputResult};
use crate::writer::OutputWriter;

/// Writes a report to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the amenities
    /// schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS amenities (
                 osm_id               INTEGER,
                 lat                  REAL NOT NULL,
                 lon                  REAL NOT NULL,
                 amenity              TEXT NOT NULL,
                 name                 TEXT,
                 \"addr:city\"          TEXT,
                 \"addr:street\"        TEXT,
                 \"addr:province\"      TEXT,
                 \"addr:town\"          TEXT,
                 \"addr:housenumber\"   TEXT,
                 \"addr:municipality\"  TEXT
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

/// Double-quote an identifier; column names contain `.` and `:`.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl OutputWriter for SqliteWriter {
    fn write_table(&mut self, table: &AccessibilityTable) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        let columns = table.columns();
        let defs: Vec<String> = columns
            .iter()
            .map(|c| {
                let ty = match c.data {
                    ColumnData::Float(_) => "REAL",
                    ColumnData::UInt(_) => "INTEGER NOT NULL",
                };
                format!("{} {ty}", quote_ident(&c.name))
            })
            .collect();
        let names: Vec<String> = columns.iter().map(|c| quote_ident(&c.name)).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS accessibility;
             CREATE TABLE accessibility ({});",
            defs.join(", ")
        ))?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO accessibility ({}) VALUES ({})",
                names.join(", "),
                placeholders.join(", ")
            ))?;
            for row in 0..table.num_rows() {
                let values = columns.iter().map(|c| match &c.data {
                    ColumnData::Float(v) => v[row].map_or(Value::Null, Value::Real),
                    ColumnData::UInt(v) => Value::Integer(i64::from(v[row])),
                });
                stmt.execute(rusqlite::params_from_iter(values))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_amenities(&mut self, rows: &[PoiRecord]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO amenities \
                 (osm_id, lat, lon, amenity, name, \"addr:city\", \"addr:street\", \"addr:province\", \
                  \"addr:town\", \"addr:housenumber\", \"addr:municipality\") \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.osm_id,
                    row.lat,
                    row.lon,
                    row.amenity,
                    row.name,
                    row.addr_city,
                    row.addr_street,
                    row.addr_province,
                    row.addr_town,
                    row.addr_housenumber,
                    row.addr_municipality,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
