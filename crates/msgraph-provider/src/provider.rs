//! Provider
//!
//! A provider is a named, versioned set of top-level tables keyed by resource
//! name (`ad.groups`). Resources are registered explicitly; there is no
//! discovery.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::{ProviderError, ProviderResult};
use crate::executor::resolve_table;
use crate::resource::Resource;
use crate::schema::Table;
use crate::traits::{Item, ResourceSink};

/// Resource selector matching every registered resource.
pub const ALL_RESOURCES: &str = "*";

/// A named collection of resource tables sharing one client type.
pub struct Provider<C, I> {
    name: &'static str,
    version: &'static str,
    resources: BTreeMap<&'static str, Table<C, I>>,
}

impl<C, I> Provider<C, I> {
    /// Create a provider with no resources.
    pub fn new(name: &'static str, version: &'static str) -> Self {
        Self {
            name,
            version,
            resources: BTreeMap::new(),
        }
    }

    /// Register `table` under resource key `key`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateResource` if `key` is taken and `InvalidSchema` if the
    /// table declaration does not validate.
    pub fn with_resource(mut self, key: &'static str, table: Table<C, I>) -> ProviderResult<Self> {
        if self.resources.contains_key(key) {
            return Err(ProviderError::DuplicateResource {
                name: key.to_string(),
            });
        }
        table.validate()?;
        self.resources.insert(key, table);
        Ok(self)
    }

    /// Provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Provider version.
    #[must_use]
    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Registered resource keys in sorted order.
    #[must_use]
    pub fn resource_names(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    /// Get the table registered under `key`.
    #[must_use]
    pub fn table(&self, key: &str) -> Option<&Table<C, I>> {
        self.resources.get(key)
    }

    /// Resolve a resource selection into registered keys.
    ///
    /// `*` selects everything. Duplicates are kept once, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for the first unknown key.
    pub fn select(&self, selection: &[&str]) -> ProviderResult<Vec<&'static str>> {
        let mut selected: Vec<&'static str> = Vec::new();
        for requested in selection {
            if *requested == ALL_RESOURCES {
                for key in self.resources.keys() {
                    if !selected.contains(key) {
                        selected.push(*key);
                    }
                }
                continue;
            }
            let Some((key, _)) = self.resources.get_key_value(*requested) else {
                return Err(ProviderError::ResourceNotFound {
                    name: (*requested).to_string(),
                });
            };
            if !selected.contains(key) {
                selected.push(*key);
            }
        }
        Ok(selected)
    }
}

impl<C: Sync, I: Item> Provider<C, I> {
    /// Resolve the selected resources into `sink`, one after another.
    ///
    /// A failing resource does not stop the others; its error is recorded in
    /// the summary.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` before anything is fetched if the selection
    /// names an unregistered resource.
    pub async fn sync<S>(
        &self,
        client: &C,
        selection: &[&str],
        sink: &mut S,
    ) -> ProviderResult<SyncSummary>
    where
        S: ResourceSink<I> + ?Sized,
    {
        let keys = self.select(selection)?;
        info!(
            provider = self.name,
            version = self.version,
            resources = ?keys,
            "starting sync"
        );

        let mut summary = SyncSummary::default();
        for key in keys {
            let Some(table) = self.resources.get(key) else {
                continue;
            };
            let mut counting = CountingSink {
                inner: &mut *sink,
                written: 0,
            };
            let result = resolve_table(table, client, None, &mut counting).await;
            let rows = counting.written;
            let error = match result {
                Ok(_) => None,
                Err(e) => {
                    error!(resource = key, table = table.name, rows, error = %e, "resource failed");
                    Some(e)
                }
            };
            summary.outcomes.push(ResourceOutcome {
                resource: key,
                table: table.name,
                rows,
                error,
            });
        }

        info!(
            provider = self.name,
            rows = summary.total_rows(),
            failed = summary.failed().count(),
            "sync finished"
        );
        Ok(summary)
    }
}

impl<C, I> std::fmt::Debug for Provider<C, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("resources", &self.resource_names())
            .finish()
    }
}

/// Counts rows accepted by the wrapped sink.
struct CountingSink<'a, S: ?Sized> {
    inner: &'a mut S,
    written: u64,
}

#[async_trait]
impl<I, S> ResourceSink<I> for CountingSink<'_, S>
where
    I: Item,
    S: ResourceSink<I> + ?Sized,
{
    async fn write(&mut self, resource: &Resource<I>) -> ProviderResult<()> {
        self.inner.write(resource).await?;
        self.written += 1;
        Ok(())
    }
}

/// Outcome of syncing one resource.
#[derive(Debug)]
pub struct ResourceOutcome {
    /// Resource key.
    pub resource: &'static str,
    /// Top-level table name.
    pub table: &'static str,
    /// Rows written, descendants included. A failed resource counts the rows
    /// it wrote before the error.
    pub rows: u64,
    /// Error that aborted the resource.
    pub error: Option<ProviderError>,
}

/// Result of a provider sync.
#[derive(Debug, Default)]
pub struct SyncSummary {
    /// Per-resource outcomes in sync order.
    pub outcomes: Vec<ResourceOutcome>,
}

impl SyncSummary {
    /// Total rows written, failed resources included.
    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.outcomes.iter().map(|o| o.rows).sum()
    }

    /// Outcomes that ended in an error.
    pub fn failed(&self) -> impl Iterator<Item = &ResourceOutcome> {
        self.outcomes.iter().filter(|o| o.error.is_some())
    }

    /// Check whether every resource succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}
