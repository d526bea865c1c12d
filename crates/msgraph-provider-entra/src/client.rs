//! Configured client handed to every table resolver.

use std::sync::Arc;

use msgraph_provider::{ColumnValue, ProviderResult, Resource};
use tracing::info;

use crate::graph_client::GraphClient;
use crate::models::GraphObject;
use crate::services::{GraphGroupsService, GroupsQuery, Services};
use crate::{EntraConfig, EntraCredentials, EntraResult, TokenCache};

/// Tenant-scoped handle to the Graph API services.
#[derive(Debug, Clone)]
pub struct Client {
    tenant_id: String,
    services: Services,
}

impl Client {
    /// Creates a client over already-built services.
    pub fn new(tenant_id: impl Into<String>, services: Services) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            services,
        }
    }

    /// Builds the HTTP client, token cache and Graph services for `config`.
    ///
    /// No request is made; credentials are first exchanged for a token by
    /// the first API call.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn configure(config: &EntraConfig, credentials: EntraCredentials) -> EntraResult<Self> {
        let http_client = GraphClient::http_client(config)?;

        let token_cache = Arc::new(TokenCache::new(
            credentials,
            http_client.clone(),
            config.login_endpoint(),
            config.graph_endpoint(),
            &config.tenant_id,
        ));

        let graph = Arc::new(GraphClient::new(
            http_client,
            token_cache,
            config.graph_endpoint(),
            config.api_version.clone(),
        ));

        let groups = GraphGroupsService::new(graph, GroupsQuery::from_config(config));

        info!(
            tenant_id = %config.tenant_id,
            cloud = config.cloud_environment.as_str(),
            api_version = %config.api_version,
            "Configured Microsoft Graph client"
        );

        Ok(Self::new(
            config.tenant_id.clone(),
            Services::new(Arc::new(groups)),
        ))
    }

    /// Directory tenant the client reads from.
    #[must_use]
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// API services the table resolvers call.
    #[must_use]
    pub fn services(&self) -> &Services {
        &self.services
    }
}

/// Column resolver filling in the tenant the row was read from.
pub fn resolve_tenant_id(
    client: &Client,
    _resource: &Resource<GraphObject>,
) -> ProviderResult<ColumnValue> {
    Ok(client.tenant_id().into())
}
