//! Dataset loading and batch-range planning.
//!
//! A dataset is one CSV file read fully into memory as a single record batch.
//! The schema is inferred from the header row and cell contents, so replayed
//! rows carry typed values rather than raw strings.

use std::{fs::File, io::Seek, ops::Range, sync::Arc};

use arrow::array::RecordBatch;
use arrow::compute::concat_batches;
use arrow::csv::{self, reader::Format};
use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use camino::Utf8Path;

use crate::error::{FeedError, Result};

#[derive(Debug)]
pub struct Dataset {
    schema: SchemaRef,
    rows: RecordBatch,
}

impl Dataset {
    /// Read an entire CSV file into memory.
    ///
    /// Type inference runs over the whole file so every batch sliced from the
    /// dataset serializes its cells consistently.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        if !path.exists() {
            return Err(FeedError::DatasetNotFound {
                path: path.to_owned(),
            });
        }

        let mut file = File::open(path).map_err(|e| parse_error(path, e.into()))?;
        let format = Format::default().with_header(true);
        let (schema, _) = format
            .infer_schema(&mut file, None)
            .map_err(|e| parse_error(path, e))?;
        file.rewind().map_err(|e| parse_error(path, e.into()))?;

        let schema = Arc::new(schema);
        let reader = csv::ReaderBuilder::new(Arc::clone(&schema))
            .with_format(format)
            .build(file)
            .map_err(|e| parse_error(path, e))?;
        let batches = reader
            .collect::<Result<Vec<_>, ArrowError>>()
            .map_err(|e| parse_error(path, e))?;
        let rows = concat_batches(&schema, &batches).map_err(|e| parse_error(path, e))?;

        Ok(Self { schema, rows })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn num_rows(&self) -> usize {
        self.rows.num_rows()
    }

    /// Zero-copy slice of the rows covered by `range`.
    pub fn slice(&self, range: &Range<usize>) -> RecordBatch {
        self.rows.slice(range.start, range.len())
    }
}

fn parse_error(path: &Utf8Path, source: ArrowError) -> FeedError {
    FeedError::DatasetParse {
        path: path.to_owned(),
        source,
    }
}

/// Partition `[0, min(row_limit, total_rows))` into contiguous ranges of at
/// most `batch_size` rows, stepping by `batch_size`, in row order.
///
/// `batch_size` must be at least 1; the CLI enforces this.
pub fn plan_batches(total_rows: usize, row_limit: usize, batch_size: usize) -> Vec<Range<usize>> {
    let end = row_limit.min(total_rows);
    (0..end)
        .step_by(batch_size)
        .map(|start| start..(start + batch_size).min(end))
        .collect()
}
