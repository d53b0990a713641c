use crate::{db::direction::Direction, model::table::TableId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// IndexColumn
/// One physical index column: a table column plus its fixed direction.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexColumn {
    pub table: TableId,
    pub column: String,
    pub direction: Direction,
}

impl IndexColumn {
    #[must_use]
    pub fn new(table: TableId, column: impl Into<String>, direction: Direction) -> Self {
        Self {
            table,
            column: column.into(),
            direction,
        }
    }

    #[must_use]
    pub fn asc(table: TableId, column: impl Into<String>) -> Self {
        Self::new(table, column, Direction::Asc)
    }

    #[must_use]
    pub fn desc(table: TableId, column: impl Into<String>) -> Self {
        Self::new(table, column, Direction::Desc)
    }
}

///
/// IndexKind
///
/// Table indexes cover one table. Group indexes span a parent/child
/// hierarchy from `root` down to `leaf`; every entry is anchored at a leaf row.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum IndexKind {
    Table(TableId),
    Group { root: TableId, leaf: TableId },
}

///
/// IndexModel
/// Runtime descriptor for one index. Column order is the physical key layout.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexModel {
    pub name: String,
    pub kind: IndexKind,
    pub columns: Vec<IndexColumn>,
    /// Trailing key segments that locate the row (primary key parts).
    #[serde(default)]
    pub row_locator_segments: usize,
}

impl IndexModel {
    #[must_use]
    pub fn table(name: impl Into<String>, table: TableId, columns: Vec<IndexColumn>) -> Self {
        Self {
            name: name.into(),
            kind: IndexKind::Table(table),
            columns,
            row_locator_segments: 0,
        }
    }

    #[must_use]
    pub fn group(
        name: impl Into<String>,
        root: TableId,
        leaf: TableId,
        columns: Vec<IndexColumn>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: IndexKind::Group { root, leaf },
            columns,
            row_locator_segments: 0,
        }
    }

    #[must_use]
    pub fn with_row_locator(mut self, segments: usize) -> Self {
        self.row_locator_segments = segments;
        self
    }

    #[must_use]
    pub const fn leaf_table(&self) -> TableId {
        match self.kind {
            IndexKind::Table(table) | IndexKind::Group { leaf: table, .. } => table,
        }
    }

    #[must_use]
    pub const fn root_table(&self) -> TableId {
        match self.kind {
            IndexKind::Table(table) | IndexKind::Group { root: table, .. } => table,
        }
    }

    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self.kind, IndexKind::Group { .. })
    }

    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    /// Whether this index's column list is a strict leading prefix of another index.
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.columns.len() < other.columns.len() && other.columns.starts_with(&self.columns)
    }
}

impl Display for IndexModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .columns
            .iter()
            .map(|column| format!("{}.{} {}", column.table, column.column, column.direction))
            .collect::<Vec<_>>()
            .join(", ");

        if self.is_group() {
            write!(f, "GROUP {}({})", self.name, columns)
        } else {
            write!(f, "{}({})", self.name, columns)
        }
    }
}

///
/// TESTS
///
