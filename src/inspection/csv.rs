//! CSV file inspection.

use std::{
    fs::File,
    io::{Seek, Write},
    sync::Arc,
};

use anyhow::Result;
use arrow::array::RecordBatch;
use arrow::csv::{self, reader::Format};
use arrow::datatypes::SchemaRef;
use arrow::json::writer::JsonArray;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde_json::{Value, json};
use tabled::Tabled;
use tabled::builder::Builder;

use super::style::{dim, header, rounded_table, style_table, value};

pub struct CsvInspector {
    path: Utf8PathBuf,
    schema: SchemaRef,
    sample: RecordBatch,
}

impl CsvInspector {
    /// Open a CSV file and read at most `sample_rows` rows, inferring column
    /// types from that prefix only.
    pub fn open(path: &Utf8Path, sample_rows: usize) -> Result<Self> {
        let mut file = File::open(path)?;
        let format = Format::default().with_header(true);
        let (schema, _) = format.infer_schema(&mut file, Some(sample_rows))?;
        file.rewind()?;

        let schema = Arc::new(schema);
        let mut reader = csv::ReaderBuilder::new(Arc::clone(&schema))
            .with_format(format)
            .with_batch_size(sample_rows)
            .build(file)?;
        let sample = match reader.next() {
            Some(batch) => batch?,
            None => RecordBatch::new_empty(Arc::clone(&schema)),
        };

        Ok(Self {
            path: path.to_owned(),
            schema,
            sample,
        })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Render the file header and column table.
    pub fn render_default(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", header(format!("=== {} ===", self.path)))?;
        writeln!(
            out,
            "Columns ({}):",
            value(self.schema.fields().len())
        )?;

        let rows: Vec<ColumnRow> = self
            .schema
            .fields()
            .iter()
            .map(|f| ColumnRow {
                name: f.name().clone(),
                data_type: format!("{}", f.data_type()),
                nullable: if f.is_nullable() {
                    "yes".to_string()
                } else {
                    dim("no")
                },
            })
            .collect();
        writeln!(out, "{}", rounded_table(rows))?;
        Ok(())
    }

    /// Render the first `head` sample rows as a table.
    pub fn render_rows(&self, out: &mut dyn Write, head: usize) -> Result<()> {
        let count = head.min(self.sample.num_rows());
        if count == 0 {
            writeln!(out, "{}", dim("(no rows)"))?;
            return Ok(());
        }
        writeln!(out, "First {} rows:", value(count))?;

        let options = FormatOptions::default().with_null("null");
        let formatters = self
            .sample
            .columns()
            .iter()
            .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = Builder::default();
        builder.push_record(self.schema.fields().iter().map(|f| f.name().clone()));
        for row in 0..count {
            let cells = formatters
                .iter()
                .map(|f| f.value(row).try_to_string())
                .collect::<Result<Vec<_>, _>>()?;
            builder.push_record(cells);
        }

        let mut table = builder.build();
        style_table(&mut table);
        writeln!(out, "{table}")?;
        Ok(())
    }

    pub fn to_json(&self, head: usize) -> Result<Value> {
        let columns: Vec<ColumnInfo> = self
            .schema
            .fields()
            .iter()
            .map(|f| ColumnInfo {
                name: f.name().clone(),
                data_type: format!("{}", f.data_type()),
                nullable: f.is_nullable(),
            })
            .collect();

        let count = head.min(self.sample.num_rows());
        let rows: Value = if count == 0 {
            Value::Array(Vec::new())
        } else {
            let mut writer = arrow::json::WriterBuilder::new()
                .with_explicit_nulls(true)
                .build::<_, JsonArray>(Vec::new());
            writer.write(&self.sample.slice(0, count))?;
            writer.finish()?;
            serde_json::from_slice(&writer.into_inner())?
        };

        Ok(json!({
            "path": self.path.as_str(),
            "columns": columns,
            "rows": rows,
        }))
    }

    pub fn render_to_json(&self, out: &mut dyn Write, head: usize) -> Result<()> {
        writeln!(out, "{}", serde_json::to_string(&self.to_json(head)?)?)?;
        Ok(())
    }
}

/// Row for the column table.
#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    data_type: String,
    #[tabled(rename = "Nullable")]
    nullable: String,
}

#[derive(Serialize)]
struct ColumnInfo {
    name: String,
    data_type: String,
    nullable: bool,
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn fixture(dir: &TempDir) -> Utf8PathBuf {
        let path = dir.path().join("teams.csv");
        std::fs::write(&path, "team_id,name,rating\n1,Radiant,1500.5\n2,Dire,1498.0\n3,Liquid,1601.2\n").unwrap();
        Utf8PathBuf::from_path_buf(path).unwrap()
    }

    #[test]
    fn test_open_infers_schema_from_prefix() {
        let dir = TempDir::new().unwrap();
        let inspector = CsvInspector::open(&fixture(&dir), 5).unwrap();

        let fields = inspector.schema().fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name(), "team_id");
        assert_eq!(fields[2].name(), "rating");
        assert_eq!(inspector.sample.num_rows(), 3);
    }

    #[test]
    fn test_sample_bounded_by_sample_rows() {
        let dir = TempDir::new().unwrap();
        let inspector = CsvInspector::open(&fixture(&dir), 2).unwrap();
        assert_eq!(inspector.sample.num_rows(), 2);
    }

    #[test]
    fn test_render_rows_lists_requested_head() {
        let dir = TempDir::new().unwrap();
        let inspector = CsvInspector::open(&fixture(&dir), 5).unwrap();

        let mut out = Vec::new();
        inspector.render_rows(&mut out, 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Radiant"));
        assert!(text.contains("Dire"));
        assert!(!text.contains("Liquid"));
    }

    #[test]
    fn test_to_json_shape() {
        let dir = TempDir::new().unwrap();
        let inspector = CsvInspector::open(&fixture(&dir), 5).unwrap();

        let doc = inspector.to_json(2).unwrap();
        assert_eq!(doc["columns"].as_array().unwrap().len(), 3);
        assert_eq!(doc["rows"].as_array().unwrap().len(), 2);
        assert_eq!(doc["rows"][0]["name"], "Radiant");
        assert_eq!(doc["columns"][0]["name"], "team_id");
    }

    #[test]
    fn test_empty_file_renders_no_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "a,b\n").unwrap();
        let inspector =
            CsvInspector::open(&Utf8PathBuf::from_path_buf(path).unwrap(), 5).unwrap();

        let mut out = Vec::new();
        inspector.render_rows(&mut out, 2).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("(no rows)"));
    }
}
