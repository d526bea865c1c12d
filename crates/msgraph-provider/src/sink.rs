//! Row sinks
//!
//! [`MemorySink`] keeps rows for inspection, [`JsonLinesSink`] writes one JSON
//! record per row to any writer.

use std::io::Write;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{ProviderError, ProviderResult};
use crate::resource::Resource;
use crate::traits::ResourceSink;

/// A row captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Table the row belongs to.
    pub table: &'static str,
    /// Generated row identifier.
    pub cq_id: Uuid,
    /// Identifier of the parent row.
    pub parent_cq_id: Option<Uuid>,
    /// Column values keyed by column name.
    pub data: Map<String, Value>,
}

impl Row {
    fn from_resource<I>(resource: &Resource<I>) -> Self {
        Self {
            table: resource.table(),
            cq_id: resource.id(),
            parent_cq_id: resource.parent_id(),
            data: resource.to_row(),
        }
    }

    /// Get a column value.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.data.get(column)
    }
}

/// Sink collecting rows in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Vec<Row>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All rows in write order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows of one table in write order.
    pub fn table<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows.iter().filter(move |r| r.table == table)
    }

    /// Rows of one table whose parent is `parent`.
    pub fn children<'a>(&'a self, table: &'a str, parent: Uuid) -> impl Iterator<Item = &'a Row> + 'a {
        self.table(table)
            .filter(move |r| r.parent_cq_id == Some(parent))
    }
}

#[async_trait]
impl<I: Sync> ResourceSink<I> for MemorySink {
    async fn write(&mut self, resource: &Resource<I>) -> ProviderResult<()> {
        self.rows.push(Row::from_resource(resource));
        Ok(())
    }
}

/// Sink writing newline-delimited JSON records.
///
/// Each record has the shape
/// `{"table": ..., "cq_id": ..., "parent_cq_id": ..., "data": {...}}`.
///
/// Writes go straight to the wrapped `std::io::Write` and block the calling
/// task; wrap stdout or a file in a `BufWriter`.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
    written: u64,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and return the inner writer.
    ///
    /// # Errors
    ///
    /// Returns a `Sink` error if flushing fails.
    pub fn into_inner(mut self) -> ProviderResult<W> {
        self.writer.flush().map_err(io_error)?;
        Ok(self.writer)
    }
}

fn io_error(e: std::io::Error) -> ProviderError {
    ProviderError::Sink {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl<I: Sync, W: Write + Send> ResourceSink<I> for JsonLinesSink<W> {
    async fn write(&mut self, resource: &Resource<I>) -> ProviderResult<()> {
        let row = Row::from_resource(resource);
        serde_json::to_writer(&mut self.writer, &row)?;
        self.writer.write_all(b"\n").map_err(io_error)?;
        self.written += 1;
        Ok(())
    }
}
