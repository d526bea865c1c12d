//! # Provider Framework
//!
//! Declarative tables for extracting remote API objects into relational rows.
//!
//! A provider registers top-level [`Table`]s under resource keys. Each table
//! names its typed [`Column`]s, a table resolver that produces items and a set
//! of child tables (relations) that are resolved once per parent row.
//!
//! ## Resolution
//!
//! - A [`FetchResolver`] sends items to a bounded channel while the executor
//!   builds rows from the other end.
//! - An extracting resolver ([`ExtractFn`]) reads a nested collection out of
//!   the parent row's item.
//! - Columns resolve from a dotted path into the item's JSON document, from
//!   the parent row id, or from a custom function.
//! - Every table checks the kind of each item once before building its row.
//!
//! ## Example
//!
//! ```ignore
//! use msgraph_provider::prelude::*;
//!
//! let provider = Provider::new("msgraph", env!("CARGO_PKG_VERSION"))
//!     .with_resource("ad.groups", groups_table())?;
//!
//! let mut sink = MemorySink::new();
//! let summary = provider.sync(&client, &["*"], &mut sink).await?;
//! ```

pub mod error;
pub mod executor;
pub mod projection;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod sink;
pub mod traits;
pub mod value;

pub use error::{ProviderError, ProviderResult};
pub use provider::{Provider, ResourceOutcome, SyncSummary, ALL_RESOURCES};
pub use resource::{Resource, ROW_ID_COLUMN};
pub use schema::{
    Column, ColumnFn, ColumnResolver, ColumnType, ExtractFn, Table, TableOptions, TableResolver,
};
pub use sink::{JsonLinesSink, MemorySink, Row};
pub use traits::{emit, FetchResolver, Item, ResourceSink};
pub use value::ColumnValue;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ProviderError, ProviderResult};
    pub use crate::executor::resolve_table;
    pub use crate::provider::{Provider, SyncSummary, ALL_RESOURCES};
    pub use crate::resource::Resource;
    pub use crate::schema::{Column, ColumnType, Table};
    pub use crate::sink::{JsonLinesSink, MemorySink};
    pub use crate::traits::{emit, FetchResolver, Item, ResourceSink};
    pub use crate::value::ColumnValue;
}

// Re-export async_trait for resolver implementors
pub use async_trait::async_trait;
