//! Microsoft Graph provider for Azure AD groups
//!
//! Reads the directory's groups from the Microsoft Graph API and projects
//! them, with their expanded members, owners, licenses, settings and team
//! details, into the relational tables declared in [`resources`].
//!
//! # Features
//!
//! - `OAuth2` client credentials authentication
//! - Paged group listing following `@odata.nextLink`
//! - Configurable `$select`, `$expand` and `$filter` query options
//! - Multi-cloud support (Commercial, US Government, China, Germany)
//!
//! # Example
//!
//! ```no_run
//! use msgraph_provider::MemorySink;
//! use msgraph_provider_entra::{provider, Client, EntraConfig, EntraCredentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EntraConfig::builder()
//!     .tenant_id("your-tenant-id")
//!     .groups_expand(vec!["members".to_string()])
//!     .build()?;
//!
//! let credentials = EntraCredentials {
//!     client_id: "your-client-id".to_string(),
//!     client_secret: "your-client-secret".to_string().into(),
//! };
//!
//! let client = Client::configure(&config, credentials)?;
//! let mut sink = MemorySink::new();
//! let summary = provider()?.sync(&client, &["*"], &mut sink).await?;
//! println!("{} rows", summary.total_rows());
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod graph_client;
mod provider;

pub mod models;
pub mod resources;
pub mod services;

// Re-exports
pub use auth::TokenCache;
pub use client::{resolve_tenant_id, Client};
pub use config::{
    ConfigError, EntraCloudEnvironment, EntraConfig, EntraConfigBuilder, EntraCredentials,
    DEFAULT_API_VERSION, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS, MAX_PAGE_SIZE,
};
pub use error::{EntraError, EntraResult};
pub use graph_client::{GraphClient, ODataError, ODataErrorBody, ODataResponse};
pub use models::GraphObject;
pub use provider::{provider, PROVIDER_NAME};
pub use services::{GraphGroupsService, GroupsQuery, GroupsService, Services};
