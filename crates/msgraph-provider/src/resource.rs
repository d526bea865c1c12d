//! Resolved rows

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::value::ColumnValue;

/// Name of the generated row identifier in serialized rows.
pub const ROW_ID_COLUMN: &str = "cq_id";

/// One row of a table together with the item it was built from.
#[derive(Debug, Clone)]
pub struct Resource<I> {
    id: Uuid,
    parent_id: Option<Uuid>,
    table: &'static str,
    item: I,
    values: Vec<(&'static str, ColumnValue)>,
}

impl<I> Resource<I> {
    /// Create a row for `item` with a freshly generated identifier.
    pub fn new(table: &'static str, item: I, parent_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id,
            table,
            item,
            values: Vec::new(),
        }
    }

    /// Generated row identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Identifier of the parent row (relation tables only).
    #[must_use]
    pub fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }

    /// Name of the table this row belongs to.
    #[must_use]
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// The item this row was built from.
    #[must_use]
    pub fn item(&self) -> &I {
        &self.item
    }

    /// Set a column value, replacing any previous value.
    pub fn set(&mut self, column: &'static str, value: impl Into<ColumnValue>) {
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.values.push((column, value)),
        }
    }

    /// Get a column value.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.values
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, v)| v)
    }

    /// Column values in resolution order.
    #[must_use]
    pub fn values(&self) -> &[(&'static str, ColumnValue)] {
        &self.values
    }

    /// Serialize the row as a JSON object keyed by column name, including the row id.
    #[must_use]
    pub fn to_row(&self) -> Map<String, Value> {
        let mut row = Map::with_capacity(self.values.len() + 1);
        row.insert(ROW_ID_COLUMN.to_string(), Value::String(self.id.to_string()));
        for (name, value) in &self.values {
            row.insert((*name).to_string(), value.to_json());
        }
        row
    }
}
