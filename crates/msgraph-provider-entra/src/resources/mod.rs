//! Table declarations, grouped by Graph workload.

pub mod ad;

use msgraph_provider::{Column, ColumnType, Table};

use crate::client::Client;
use crate::models::GraphObject;

/// Table over Graph objects resolved with a configured [`Client`].
pub type GraphTable = Table<Client, GraphObject>;

/// Column of a [`GraphTable`].
pub type GraphColumn = Column<Client, GraphObject>;

/// Column read from a camelCase field path of the item document.
pub(crate) fn path(name: &'static str, column_type: ColumnType, path: &'static str) -> GraphColumn {
    Column::new(name, column_type).path(path)
}

/// Foreign key column referencing the parent row.
pub(crate) fn parent_id(name: &'static str) -> GraphColumn {
    Column::new(name, ColumnType::Uuid).parent_id()
}
