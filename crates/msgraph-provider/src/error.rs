//! Provider error types
//!
//! Errors raised while declaring tables and while resolving them into rows.

use thiserror::Error;

/// Result type alias using `ProviderError`.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Error that can occur while registering or resolving provider tables.
#[derive(Debug, Error)]
pub enum ProviderError {
    // Registration errors
    /// Requested resource is not registered with the provider.
    #[error("resource not found: {name}")]
    ResourceNotFound { name: String },

    /// A resource with the same key was already registered.
    #[error("resource already registered: {name}")]
    DuplicateResource { name: String },

    /// Table declaration is inconsistent.
    #[error("invalid schema for table '{table}': {message}")]
    InvalidSchema { table: String, message: String },

    // Resolution errors
    /// Item handed to a resolver is not the kind the table expects.
    ///
    /// This is a contract violation between the resolvers and the table
    /// declarations, never a data problem.
    #[error("table '{table}' expected item of kind {expected} but got {found}")]
    TypeMismatch {
        table: String,
        expected: String,
        found: String,
    },

    /// Fetching items for a table failed.
    #[error("fetch failed for table '{table}': {source}")]
    Fetch {
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Column resolver failed.
    #[error("column '{column}' of table '{table}' failed to resolve: {message}")]
    ColumnResolution {
        table: String,
        column: String,
        message: String,
    },

    /// Item could not be turned into its JSON document.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Output channel was closed before the resolver finished emitting.
    #[error("output channel closed while resolving table '{table}'")]
    ChannelClosed { table: String },

    /// Sink rejected a row.
    #[error("sink error: {message}")]
    Sink {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ProviderError {
    /// Wrap a resolver error as a fetch failure of `table`.
    pub fn fetch(
        table: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ProviderError::Fetch {
            table: table.into(),
            source: source.into(),
        }
    }

    /// Build a type mismatch error.
    pub fn type_mismatch(
        table: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        ProviderError::TypeMismatch {
            table: table.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Check whether this error signals a broken resolver/table contract.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            ProviderError::TypeMismatch { .. } | ProviderError::InvalidSchema { .. }
        )
    }

    /// Get the table this error is attached to, if any.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        match self {
            ProviderError::InvalidSchema { table, .. }
            | ProviderError::TypeMismatch { table, .. }
            | ProviderError::Fetch { table, .. }
            | ProviderError::ColumnResolution { table, .. }
            | ProviderError::ChannelClosed { table } => Some(table),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_display() {
        let err = ProviderError::type_mismatch("msgraph_ad_groups", "Group", "DirectoryObject");
        assert_eq!(
            err.to_string(),
            "table 'msgraph_ad_groups' expected item of kind Group but got DirectoryObject"
        );
        assert!(err.is_contract_violation());
        assert_eq!(err.table(), Some("msgraph_ad_groups"));
    }

    #[test]
    fn test_fetch_wraps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = ProviderError::fetch("msgraph_ad_groups", io);
        assert!(err.to_string().contains("connection reset"));
        assert!(!err.is_contract_violation());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_resource_not_found_has_no_table() {
        let err = ProviderError::ResourceNotFound {
            name: "ad.users".to_string(),
        };
        assert_eq!(err.to_string(), "resource not found: ad.users");
        assert!(err.table().is_none());
    }
}
