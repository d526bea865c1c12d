//! Provider registration.

use msgraph_provider::{Provider, ProviderResult};

use crate::client::Client;
use crate::models::GraphObject;
use crate::resources::ad;

/// Name the provider registers under.
pub const PROVIDER_NAME: &str = "msgraph";

/// Builds the provider with every resource it serves.
///
/// # Errors
///
/// Returns `InvalidSchema` if a table declaration is inconsistent.
pub fn provider() -> ProviderResult<Provider<Client, GraphObject>> {
    Provider::new(PROVIDER_NAME, env!("CARGO_PKG_VERSION")).with_resource("ad.groups", ad::groups())
}
