//! Graph API services used by table resolvers.
//!
//! Each service is a trait so resolvers can be tested against fakes or a
//! mock HTTP server.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use url::Url;

use crate::graph_client::{GraphClient, ODataResponse};
use crate::models::Group;
use crate::{EntraConfig, EntraError, EntraResult};

/// Lists directory groups one page at a time.
#[async_trait]
pub trait GroupsService: Send + Sync + fmt::Debug {
    /// Fetch the first page (`next_link` is `None`) or the page behind a
    /// continuation cursor returned by a previous call.
    async fn list(&self, next_link: Option<&str>) -> EntraResult<ODataResponse<Group>>;
}

/// OData query options for the groups list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupsQuery {
    /// `$top`.
    pub page_size: u32,
    /// `$select`.
    pub select: Vec<String>,
    /// `$expand`.
    pub expand: Vec<String>,
    /// `$filter`.
    pub filter: Option<String>,
}

impl GroupsQuery {
    /// Build the query from provider configuration.
    #[must_use]
    pub fn from_config(config: &EntraConfig) -> Self {
        Self {
            page_size: config.page_size,
            select: config.groups_select.clone(),
            expand: config.groups_expand.clone(),
            filter: config.groups_filter.clone(),
        }
    }

    /// URL of the first page under `base_url`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{base_url}/groups?$top={}", self.page_size);

        if !self.select.is_empty() {
            url.push_str(&format!(
                "&$select={}",
                urlencoding::encode(&self.select.join(","))
            ));
        }
        if !self.expand.is_empty() {
            url.push_str(&format!(
                "&$expand={}",
                urlencoding::encode(&self.expand.join(","))
            ));
        }
        if let Some(ref filter) = self.filter {
            url.push_str(&format!("&$filter={}", urlencoding::encode(filter)));
        }

        url
    }
}

/// Groups service backed by the Graph REST API.
#[derive(Debug)]
pub struct GraphGroupsService {
    graph: Arc<GraphClient>,
    query: GroupsQuery,
}

impl GraphGroupsService {
    /// Creates a new groups service.
    pub fn new(graph: Arc<GraphClient>, query: GroupsQuery) -> Self {
        Self { graph, query }
    }
}

#[async_trait]
impl GroupsService for GraphGroupsService {
    #[instrument(skip(self))]
    async fn list(&self, next_link: Option<&str>) -> EntraResult<ODataResponse<Group>> {
        // Continuation cursors are opaque and already carry the query options.
        let url = match next_link {
            Some(link) => continuation_url(link)?.to_string(),
            None => self.query.url(&self.graph.base_url()),
        };
        self.graph.get(&url).await
    }
}

/// Parse an `@odata.nextLink`, which Graph always returns as an absolute URL.
fn continuation_url(link: &str) -> EntraResult<Url> {
    let url = Url::parse(link)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(EntraError::Config(format!(
            "unsupported continuation link scheme '{}'",
            url.scheme()
        )));
    }
    Ok(url)
}

/// API services available to resolvers.
#[derive(Debug, Clone)]
pub struct Services {
    /// Directory groups.
    pub groups: Arc<dyn GroupsService>,
}

impl Services {
    /// Creates the service set.
    pub fn new(groups: Arc<dyn GroupsService>) -> Self {
        Self { groups }
    }
}
