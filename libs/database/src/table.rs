//! Table declarations
//!
//! A [`Table`] is a named, typed description of a storage relation. Columns
//! are assembled with `const` builder methods so every declaration lives in a
//! `static` and can be shared freely by whatever builds statements against it.

use std::fmt;

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-incrementing integer, generated by the storage engine
    Serial,
    /// Plain 4-byte integer
    Integer,
    /// String bounded to `length` characters
    Varchar { length: u32 },
    /// Unbounded string
    Text,
    /// Timestamp without time zone
    Timestamp,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Serial => f.write_str("serial"),
            ColumnType::Integer => f.write_str("integer"),
            ColumnType::Varchar { length } => write!(f, "varchar({})", length),
            ColumnType::Text => f.write_str("text"),
            ColumnType::Timestamp => f.write_str("timestamp"),
        }
    }
}

/// Value the storage engine fills in when an insert omits the column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    /// Current time at insert
    Now,
}

impl fmt::Display for ColumnDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnDefault::Now => f.write_str("now()"),
        }
    }
}

/// Reference from a column to a column of another table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
}

impl ForeignKey {
    pub const fn new(table: &'static str, column: &'static str) -> Self {
        Self { table, column }
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// A column and its constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub primary_key: bool,
    pub not_null: bool,
    pub unique: bool,
    pub default: Option<ColumnDefault>,
    pub references: Option<ForeignKey>,
}

impl Column {
    /// Declare a nullable column with no constraints
    ///
    /// `Serial` columns are implicitly `NOT NULL`.
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            primary_key: false,
            not_null: matches!(column_type, ColumnType::Serial),
            unique: false,
            default: None,
            references: None,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn default_now(mut self) -> Self {
        self.default = Some(ColumnDefault::Now);
        self
    }

    pub const fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some(ForeignKey::new(table, column));
        self
    }

    /// Whether the storage engine generates the value on its own
    pub fn is_generated(&self) -> bool {
        matches!(self.column_type, ColumnType::Serial)
    }

    /// Whether an insert may omit the column and still get a value
    pub fn has_default(&self) -> bool {
        self.default.is_some() || self.is_generated()
    }

    pub fn is_nullable(&self) -> bool {
        !self.not_null
    }

    /// Whether the insert shape must supply this column
    pub fn is_required_on_insert(&self) -> bool {
        !self.has_default() && !self.is_nullable()
    }
}

/// A declared table: the handle a query layer builds statements against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl Table {
    pub const fn new(name: &'static str, columns: &'static [Column]) -> Self {
        Self { name, columns }
    }

    /// Find a column by its storage name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|column| column.primary_key)
    }

    /// Every column, in declaration order (the select shape)
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    /// Column names joined for use in a select or returning clause
    pub fn column_list(&self) -> String {
        self.column_names().join(", ")
    }

    /// Columns an insert must supply
    pub fn required_insert_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|column| column.is_required_on_insert())
            .map(|column| column.name)
            .collect()
    }

    /// Columns an insert may omit
    pub fn optional_insert_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|column| !column.is_required_on_insert())
            .map(|column| column.name)
            .collect()
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (&Column, ForeignKey)> + '_ {
        self.columns
            .iter()
            .filter_map(|column| column.references.map(|fk| (column, fk)))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
