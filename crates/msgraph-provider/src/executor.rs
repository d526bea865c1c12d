//! Table resolution
//!
//! Drives a table declaration: runs its resolver, builds one row per item,
//! hands each row to a sink, then expands the row's relations. A fetch
//! resolver and the row builder run concurrently in the same task, connected
//! by a bounded channel.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};
use crate::projection::project;
use crate::resource::Resource;
use crate::schema::{ColumnResolver, Table, TableResolver};
use crate::traits::{Item, ResourceSink};

/// Capacity of the channel between a fetch resolver and the row builder.
pub const CHANNEL_CAPACITY: usize = 256;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Resolve `table` (and all of its relations) into `sink`.
///
/// `parent` is `None` for top-level tables and the row being expanded for
/// relations. Returns the number of rows written, descendants included.
///
/// # Errors
///
/// Fails on the first resolver, projection or sink error. Rows written before
/// the failure are not rolled back.
pub fn resolve_table<'a, C, I, S>(
    table: &'a Table<C, I>,
    client: &'a C,
    parent: Option<&'a Resource<I>>,
    sink: &'a mut S,
) -> BoxFuture<'a, ProviderResult<u64>>
where
    C: Sync,
    I: Item,
    S: ResourceSink<I> + ?Sized,
{
    Box::pin(async move {
        if parent.is_none() {
            info!(table = table.name, "resolving table");
        }

        let rows = match &table.resolver {
            TableResolver::Extract(extract) => {
                let Some(parent_resource) = parent else {
                    return Err(ProviderError::InvalidSchema {
                        table: table.name.to_string(),
                        message: "extracting table resolved without a parent".to_string(),
                    });
                };
                let items = extract(client, parent_resource)?;
                debug!(
                    table = table.name,
                    parent_id = %parent_resource.id(),
                    count = items.len(),
                    "extracted nested collection"
                );
                let mut rows = 0;
                for item in items {
                    rows += write_item(table, client, parent, item, &mut *sink).await?;
                }
                rows
            }
            TableResolver::Fetch(resolver) => {
                let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);

                let produce = async move { resolver.fetch(client, parent, tx).await };
                let consume = async move {
                    let mut rows = 0;
                    while let Some(item) = rx.recv().await {
                        rows += write_item(table, client, parent, item, &mut *sink).await?;
                    }
                    Ok::<_, ProviderError>(rows)
                };

                // A failing consumer drops the receiver, which stops the producer.
                let (produced, consumed) = tokio::join!(produce, consume);
                let rows = consumed?;
                produced?;
                rows
            }
        };

        if parent.is_none() {
            info!(table = table.name, rows, "table resolved");
        }
        Ok(rows)
    })
}

async fn write_item<C, I, S>(
    table: &Table<C, I>,
    client: &C,
    parent: Option<&Resource<I>>,
    item: I,
    sink: &mut S,
) -> ProviderResult<u64>
where
    C: Sync,
    I: Item,
    S: ResourceSink<I> + ?Sized,
{
    let resource = build_resource(table, client, parent, item)?;
    sink.write(&resource).await?;

    let mut rows = 1;
    for relation in &table.relations {
        rows += resolve_table(relation, client, Some(&resource), &mut *sink).await?;
    }
    Ok(rows)
}

/// Build a row of `table` from `item`, resolving every column.
///
/// # Errors
///
/// Returns `TypeMismatch` if the item is not the kind the table declares and
/// `ColumnResolution` if a custom resolver returns a value of the wrong type.
pub fn build_resource<C, I: Item>(
    table: &Table<C, I>,
    client: &C,
    parent: Option<&Resource<I>>,
    item: I,
) -> ProviderResult<Resource<I>> {
    if item.kind() != table.item_kind {
        return Err(ProviderError::type_mismatch(
            table.name,
            table.item_kind,
            item.kind(),
        ));
    }

    let parent_id = parent.map(Resource::id);
    let document = item.document()?;
    let mut resource = Resource::new(table.name, item, parent_id);

    for column in &table.columns {
        let value = match &column.resolver {
            ColumnResolver::Path(path) => project(&document, path, column.column_type),
            ColumnResolver::ParentId => parent_id.into(),
            ColumnResolver::Func(f) => f(client, &resource)?,
        };
        if !value.fits(column.column_type) {
            return Err(ProviderError::ColumnResolution {
                table: table.name.to_string(),
                column: column.name.to_string(),
                message: format!("resolved value does not fit type {}", column.column_type),
            });
        }
        resource.set(column.name, value);
    }

    Ok(resource)
}
