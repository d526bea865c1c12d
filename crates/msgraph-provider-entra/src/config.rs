//! Provider configuration.
//!
//! Everything is read from the process environment, following the Azure SDK
//! variable names for credentials and cloud selection.

use std::env::VarError;
use std::str::FromStr;

use secrecy::SecretString;

/// Default Graph API version segment.
pub const DEFAULT_API_VERSION: &str = "v1.0";

/// Default `$top` page size for list requests.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size Graph accepts for directory objects.
pub const MAX_PAGE_SIZE: u32 = 999;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// National cloud the tenant lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntraCloudEnvironment {
    /// Azure public cloud.
    #[default]
    Commercial,
    /// Azure US Government (GCC High).
    UsGovernment,
    /// Azure China (21Vianet).
    China,
    /// Azure Germany.
    Germany,
}

impl EntraCloudEnvironment {
    /// Azure AD authority host.
    #[must_use]
    pub fn login_endpoint(&self) -> &'static str {
        match self {
            Self::Commercial => "https://login.microsoftonline.com",
            Self::UsGovernment => "https://login.microsoftonline.us",
            Self::China => "https://login.chinacloudapi.cn",
            Self::Germany => "https://login.microsoftonline.de",
        }
    }

    /// Microsoft Graph host.
    #[must_use]
    pub fn graph_endpoint(&self) -> &'static str {
        match self {
            Self::Commercial => "https://graph.microsoft.com",
            Self::UsGovernment => "https://graph.microsoft.us",
            Self::China => "https://microsoftgraph.chinacloudapi.cn",
            Self::Germany => "https://graph.microsoft.de",
        }
    }

    /// Name used in `AZURE_ENVIRONMENT`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commercial => "AzurePublicCloud",
            Self::UsGovernment => "AzureUSGovernmentCloud",
            Self::China => "AzureChinaCloud",
            Self::Germany => "AzureGermanCloud",
        }
    }
}

impl FromStr for EntraCloudEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AZUREPUBLICCLOUD" | "PUBLIC" | "COMMERCIAL" => Ok(Self::Commercial),
            "AZUREUSGOVERNMENTCLOUD" | "USGOVERNMENT" => Ok(Self::UsGovernment),
            "AZURECHINACLOUD" | "CHINA" => Ok(Self::China),
            "AZUREGERMANCLOUD" | "GERMANY" => Ok(Self::Germany),
            _ => Err(ConfigError::InvalidValue(
                "AZURE_ENVIRONMENT".into(),
                format!("unknown cloud environment: {s}"),
            )),
        }
    }
}

/// Client credentials of the app registration.
#[derive(Debug)]
pub struct EntraCredentials {
    /// Application (client) id.
    pub client_id: String,
    /// Client secret.
    pub client_secret: SecretString,
}

impl EntraCredentials {
    /// Load credentials from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load credentials from a custom variable reader.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let client_id = required(&reader, "AZURE_CLIENT_ID")?;
        let client_secret = required(&reader, "AZURE_CLIENT_SECRET")?;
        Ok(Self {
            client_id,
            client_secret: SecretString::from(client_secret),
        })
    }
}

/// Microsoft Graph provider configuration.
#[derive(Debug, Clone)]
pub struct EntraConfig {
    /// Directory (tenant) id.
    pub tenant_id: String,
    /// National cloud.
    pub cloud_environment: EntraCloudEnvironment,
    /// Graph API version segment (`v1.0` or `beta`).
    pub api_version: String,
    /// `$top` for list requests.
    pub page_size: u32,
    /// Properties requested with `$select` on the groups list. Empty means all.
    pub groups_select: Vec<String>,
    /// Navigation properties requested with `$expand` on the groups list.
    pub groups_expand: Vec<String>,
    /// OData `$filter` on the groups list.
    pub groups_filter: Option<String>,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Authority host overriding the cloud default.
    pub authority_host: Option<String>,
    /// Graph host overriding the cloud default.
    pub graph_host: Option<String>,
}

impl EntraConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> EntraConfigBuilder {
        EntraConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `AZURE_TENANT_ID`
    ///
    /// Optional:
    /// - `AZURE_ENVIRONMENT`: `AzurePublicCloud` (default), `AzureUSGovernmentCloud`,
    ///   `AzureChinaCloud`, `AzureGermanCloud`
    /// - `AZURE_AUTHORITY_HOST`, `MSGRAPH_ENDPOINT`: endpoint overrides
    /// - `MSGRAPH_API_VERSION` (default `v1.0`)
    /// - `MSGRAPH_PAGE_SIZE` (default 100, at most 999)
    /// - `MSGRAPH_GROUPS_SELECT`, `MSGRAPH_GROUPS_EXPAND`: comma-separated lists
    /// - `MSGRAPH_GROUPS_FILTER`
    /// - `MSGRAPH_REQUEST_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// This allows tests to supply variables without mutating process-global
    /// environment state.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let mut builder = Self::builder().tenant_id(required(&reader, "AZURE_TENANT_ID")?);

        if let Some(env) = optional(&reader, "AZURE_ENVIRONMENT") {
            builder = builder.cloud_environment(env.parse()?);
        }
        if let Some(version) = optional(&reader, "MSGRAPH_API_VERSION") {
            builder = builder.api_version(version);
        }
        if let Some(size) = optional(&reader, "MSGRAPH_PAGE_SIZE") {
            let size = size.parse::<u32>().map_err(|e| {
                ConfigError::InvalidValue("MSGRAPH_PAGE_SIZE".into(), e.to_string())
            })?;
            builder = builder.page_size(size);
        }
        if let Some(select) = optional(&reader, "MSGRAPH_GROUPS_SELECT") {
            builder = builder.groups_select(split_list(&select));
        }
        if let Some(expand) = optional(&reader, "MSGRAPH_GROUPS_EXPAND") {
            builder = builder.groups_expand(split_list(&expand));
        }
        if let Some(filter) = optional(&reader, "MSGRAPH_GROUPS_FILTER") {
            builder = builder.groups_filter(filter);
        }
        if let Some(timeout) = optional(&reader, "MSGRAPH_REQUEST_TIMEOUT_SECS") {
            let timeout = timeout.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("MSGRAPH_REQUEST_TIMEOUT_SECS".into(), e.to_string())
            })?;
            builder = builder.request_timeout_secs(timeout);
        }
        if let Some(host) = optional(&reader, "AZURE_AUTHORITY_HOST") {
            builder = builder.authority_host(host);
        }
        if let Some(host) = optional(&reader, "MSGRAPH_ENDPOINT") {
            builder = builder.graph_host(host);
        }

        builder.build()
    }

    /// Authority host used for token requests.
    #[must_use]
    pub fn login_endpoint(&self) -> &str {
        self.authority_host
            .as_deref()
            .unwrap_or_else(|| self.cloud_environment.login_endpoint())
    }

    /// Graph host used for API requests.
    #[must_use]
    pub fn graph_endpoint(&self) -> &str {
        self.graph_host
            .as_deref()
            .unwrap_or_else(|| self.cloud_environment.graph_endpoint())
    }
}

/// Builder for `EntraConfig`.
#[derive(Debug, Default)]
pub struct EntraConfigBuilder {
    tenant_id: Option<String>,
    cloud_environment: Option<EntraCloudEnvironment>,
    api_version: Option<String>,
    page_size: Option<u32>,
    groups_select: Vec<String>,
    groups_expand: Vec<String>,
    groups_filter: Option<String>,
    request_timeout_secs: Option<u64>,
    authority_host: Option<String>,
    graph_host: Option<String>,
}

impl EntraConfigBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tenant id.
    #[must_use]
    pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Set the national cloud.
    #[must_use]
    pub fn cloud_environment(mut self, env: EntraCloudEnvironment) -> Self {
        self.cloud_environment = Some(env);
        self
    }

    /// Set the Graph API version.
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the list page size.
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the `$select` properties for groups.
    #[must_use]
    pub fn groups_select(mut self, properties: Vec<String>) -> Self {
        self.groups_select = properties;
        self
    }

    /// Set the `$expand` navigation properties for groups.
    #[must_use]
    pub fn groups_expand(mut self, properties: Vec<String>) -> Self {
        self.groups_expand = properties;
        self
    }

    /// Set the `$filter` for groups.
    #[must_use]
    pub fn groups_filter(mut self, filter: impl Into<String>) -> Self {
        self.groups_filter = Some(filter.into());
        self
    }

    /// Set the HTTP request timeout.
    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Override the authority host.
    #[must_use]
    pub fn authority_host(mut self, host: impl Into<String>) -> Self {
        self.authority_host = Some(trim_host(host.into()));
        self
    }

    /// Override the Graph host.
    #[must_use]
    pub fn graph_host(mut self, host: impl Into<String>) -> Self {
        self.graph_host = Some(trim_host(host.into()));
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the tenant id is missing, a value is out of range,
    /// or a host override is not an absolute `http(s)` URL.
    pub fn build(self) -> Result<EntraConfig, ConfigError> {
        let tenant_id = self
            .tenant_id
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("AZURE_TENANT_ID".into()))?;

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::InvalidValue(
                "MSGRAPH_PAGE_SIZE".into(),
                format!("{page_size} is outside 1..={MAX_PAGE_SIZE}"),
            ));
        }

        let request_timeout_secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "MSGRAPH_REQUEST_TIMEOUT_SECS".into(),
                "must be greater than zero".into(),
            ));
        }

        if let Some(ref host) = self.authority_host {
            validate_host("AZURE_AUTHORITY_HOST", host)?;
        }
        if let Some(ref host) = self.graph_host {
            validate_host("MSGRAPH_ENDPOINT", host)?;
        }

        Ok(EntraConfig {
            tenant_id,
            cloud_environment: self.cloud_environment.unwrap_or_default(),
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            page_size,
            groups_select: self.groups_select,
            groups_expand: self.groups_expand,
            groups_filter: self.groups_filter,
            request_timeout_secs,
            authority_host: self.authority_host,
            graph_host: self.graph_host,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

fn required<F>(reader: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    optional(reader, key).ok_or_else(|| ConfigError::MissingVar(key.into()))
}

fn optional<F>(reader: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    reader(key).ok().filter(|v| !v.trim().is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn trim_host(host: String) -> String {
    host.trim_end_matches('/').to_string()
}

fn validate_host(var: &str, host: &str) -> Result<(), ConfigError> {
    let url =
        url::Url::parse(host).map_err(|e| ConfigError::InvalidValue(var.into(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue(
            var.into(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(())
}
