//! Table and column declarations
//!
//! A [`Table`] describes one relational output: its name, its typed columns,
//! where its rows come from (the table resolver) and its child tables
//! (relations). Declarations are static data; all runtime behavior lives in
//! the resolvers they reference.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{ProviderError, ProviderResult};
use crate::resource::Resource;
use crate::traits::FetchResolver;
use crate::value::ColumnValue;

/// Data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Boolean value.
    Bool,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    BigInt,
    /// Text.
    String,
    /// List of text values.
    StringArray,
    /// UTC timestamp.
    Timestamp,
    /// JSON document.
    Json,
    /// UUID.
    Uuid,
}

impl ColumnType {
    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Bool => "bool",
            ColumnType::Int => "int",
            ColumnType::BigInt => "bigint",
            ColumnType::String => "string",
            ColumnType::StringArray => "string_array",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Json => "json",
            ColumnType::Uuid => "uuid",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolver computing a custom column value from the client and the row.
pub type ColumnFn<C, I> = fn(&C, &Resource<I>) -> ProviderResult<ColumnValue>;

/// Resolver extracting a nested collection from the parent row's item.
pub type ExtractFn<C, I> = fn(&C, &Resource<I>) -> ProviderResult<Vec<I>>;

/// How a column obtains its value.
pub enum ColumnResolver<C, I> {
    /// Dotted path into the item's JSON document (e.g. `team.funSettings.allowGiphy`).
    Path(&'static str),
    /// Identifier of the parent row (foreign key of relation tables).
    ParentId,
    /// Custom function.
    Func(ColumnFn<C, I>),
}

impl<C, I> fmt::Debug for ColumnResolver<C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnResolver::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ColumnResolver::ParentId => f.write_str("ParentId"),
            ColumnResolver::Func(_) => f.write_str("Func"),
        }
    }
}

/// A typed column of a table.
pub struct Column<C, I> {
    /// Column name in the output table.
    pub name: &'static str,
    /// Description of this column.
    pub description: Option<&'static str>,
    /// Column data type.
    pub column_type: ColumnType,
    /// How the column value is computed.
    pub resolver: ColumnResolver<C, I>,
}

impl<C, I> Column<C, I> {
    /// Create a column resolved from a field path with the same spelling as the name.
    ///
    /// Use [`Column::path`], [`Column::parent_id`] or [`Column::func`] to pick
    /// another resolver.
    pub fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            description: None,
            column_type,
            resolver: ColumnResolver::Path(name),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Resolve this column from a dotted field path.
    #[must_use]
    pub fn path(mut self, path: &'static str) -> Self {
        self.resolver = ColumnResolver::Path(path);
        self
    }

    /// Resolve this column to the parent row identifier.
    #[must_use]
    pub fn parent_id(mut self) -> Self {
        self.resolver = ColumnResolver::ParentId;
        self
    }

    /// Resolve this column with a custom function.
    #[must_use]
    pub fn func(mut self, f: ColumnFn<C, I>) -> Self {
        self.resolver = ColumnResolver::Func(f);
        self
    }
}

impl<C, I> fmt::Debug for Column<C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("column_type", &self.column_type)
            .field("resolver", &self.resolver)
            .finish()
    }
}

/// Where the rows of a table come from.
pub enum TableResolver<C, I> {
    /// Items are fetched (usually from a remote API) and sent to a channel.
    Fetch(Arc<dyn FetchResolver<C, I>>),
    /// Items are a nested collection of the parent row's item.
    Extract(ExtractFn<C, I>),
}

impl<C, I> fmt::Debug for TableResolver<C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableResolver::Fetch(_) => f.write_str("Fetch"),
            TableResolver::Extract(_) => f.write_str("Extract"),
        }
    }
}

/// Table creation options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Columns forming the primary key. Empty means the row id is the key.
    pub primary_keys: Vec<&'static str>,
}

/// A relational output table.
pub struct Table<C, I> {
    /// Table name.
    pub name: &'static str,
    /// Description of this table.
    pub description: Option<&'static str>,
    /// Kind of item the table rows are built from.
    pub item_kind: &'static str,
    /// Resolver producing the table's items.
    pub resolver: TableResolver<C, I>,
    /// Creation options.
    pub options: TableOptions,
    /// Columns in output order.
    pub columns: Vec<Column<C, I>>,
    /// Child tables resolved once per row of this table.
    pub relations: Vec<Table<C, I>>,
}

impl<C, I> Table<C, I> {
    /// Create a new table.
    pub fn new(
        name: &'static str,
        item_kind: &'static str,
        resolver: TableResolver<C, I>,
    ) -> Self {
        Self {
            name,
            description: None,
            item_kind,
            resolver,
            options: TableOptions::default(),
            columns: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Create a table whose items are fetched by `resolver`.
    pub fn fetched(
        name: &'static str,
        item_kind: &'static str,
        resolver: impl FetchResolver<C, I> + 'static,
    ) -> Self {
        Self::new(name, item_kind, TableResolver::Fetch(Arc::new(resolver)))
    }

    /// Create a table whose items are extracted from the parent row.
    pub fn extracted(name: &'static str, item_kind: &'static str, f: ExtractFn<C, I>) -> Self {
        Self::new(name, item_kind, TableResolver::Extract(f))
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Set the primary key columns.
    #[must_use]
    pub fn with_primary_keys(mut self, keys: Vec<&'static str>) -> Self {
        self.options.primary_keys = keys;
        self
    }

    /// Add a column.
    #[must_use]
    pub fn with_column(mut self, column: Column<C, I>) -> Self {
        self.columns.push(column);
        self
    }

    /// Add several columns.
    #[must_use]
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column<C, I>>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Add a child table.
    #[must_use]
    pub fn with_relation(mut self, relation: Table<C, I>) -> Self {
        self.relations.push(relation);
        self
    }

    /// Add several child tables.
    #[must_use]
    pub fn with_relations(mut self, relations: impl IntoIterator<Item = Table<C, I>>) -> Self {
        self.relations.extend(relations);
        self
    }

    /// Find a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column<C, I>> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in output order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Find a child table by name at any depth.
    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&Table<C, I>> {
        self.walk().into_iter().skip(1).find(|t| t.name == name)
    }

    /// This table followed by every nested relation, depth first.
    #[must_use]
    pub fn walk(&self) -> Vec<&Table<C, I>> {
        let mut out = vec![self];
        for relation in &self.relations {
            out.extend(relation.walk());
        }
        out
    }

    /// Validate this table and its relations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchema` on duplicate column or table names, on primary
    /// keys that are not columns, and on relations without a parent id column.
    pub fn validate(&self) -> ProviderResult<()> {
        let mut tables = HashSet::new();
        self.validate_inner(false, &mut tables)
    }

    fn validate_inner(
        &self,
        is_relation: bool,
        tables: &mut HashSet<&'static str>,
    ) -> ProviderResult<()> {
        let invalid = |message: String| ProviderError::InvalidSchema {
            table: self.name.to_string(),
            message,
        };

        if !tables.insert(self.name) {
            return Err(invalid("table name declared more than once".to_string()));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name) {
                return Err(invalid(format!("duplicate column '{}'", column.name)));
            }
        }

        for key in &self.options.primary_keys {
            if !seen.contains(key) {
                return Err(invalid(format!("primary key '{key}' is not a column")));
            }
        }

        if is_relation
            && !self
                .columns
                .iter()
                .any(|c| matches!(c.resolver, ColumnResolver::ParentId))
        {
            return Err(invalid("relation has no parent id column".to_string()));
        }

        if !is_relation && matches!(self.resolver, TableResolver::Extract(_)) {
            return Err(invalid(
                "top-level table cannot extract from a parent".to_string(),
            ));
        }

        for relation in &self.relations {
            relation.validate_inner(true, tables)?;
        }
        Ok(())
    }
}

impl<C, I> fmt::Debug for Table<C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("item_kind", &self.item_kind)
            .field("resolver", &self.resolver)
            .field("options", &self.options)
            .field("columns", &self.columns)
            .field("relations", &self.relations)
            .finish()
    }
}
