//! Resolver and sink traits
//!
//! The seams between the generic executor and a concrete provider.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::{ProviderError, ProviderResult};
use crate::resource::Resource;

/// An object rows are built from.
///
/// Implementors are usually a sum type over every resource shape a provider
/// knows about, so that each table can check it received the right variant.
pub trait Item: Send + Sync + 'static {
    /// Name of the variant, compared against [`crate::Table::item_kind`].
    fn kind(&self) -> &'static str;

    /// JSON document that column field paths are resolved against.
    fn document(&self) -> ProviderResult<Value>;
}

/// Produces the items of a table, typically by calling a remote API.
#[async_trait]
pub trait FetchResolver<C, I>: Send + Sync {
    /// Fetch all items and send them to `tx` in order.
    ///
    /// `parent` is the row being expanded when the table is a relation.
    /// Returning an error aborts the table; items already sent stay sent.
    async fn fetch(
        &self,
        client: &C,
        parent: Option<&Resource<I>>,
        tx: mpsc::Sender<I>,
    ) -> ProviderResult<()>;
}

/// Destination for resolved rows.
#[async_trait]
pub trait ResourceSink<I>: Send {
    /// Write one row. Called after all of its columns are resolved and
    /// before any of its relations.
    async fn write(&mut self, resource: &Resource<I>) -> ProviderResult<()>;
}

/// Send every item to `tx` in iteration order.
///
/// # Errors
///
/// Returns `ChannelClosed` if the receiving side has gone away.
pub async fn emit<I>(
    table: &str,
    tx: &mpsc::Sender<I>,
    items: impl IntoIterator<Item = I>,
) -> ProviderResult<()> {
    for item in items {
        tx.send(item)
            .await
            .map_err(|_| ProviderError::ChannelClosed {
                table: table.to_string(),
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_preserves_order() {
        let (tx, mut rx) = mpsc::channel(8);
        emit("t", &tx, vec![1, 2, 3]).await.unwrap();
        drop(tx);

        let mut got = Vec::new();
        while let Some(i) = rx.recv().await {
            got.push(i);
        }
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_emit_to_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let err = emit("msgraph_ad_groups", &tx, vec![1]).await.unwrap_err();
        assert!(matches!(err, ProviderError::ChannelClosed { .. }));
    }
}
