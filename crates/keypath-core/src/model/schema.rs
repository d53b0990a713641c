use crate::model::{
    index::{IndexKind, IndexModel},
    table::{TableId, TableModel},
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// SchemaError
/// Catalog construction failures.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("table {0} is already defined")]
    DuplicateTable(TableId),

    #[error("index '{0}' is already defined")]
    DuplicateIndex(String),

    #[error("table {table} referenced by '{context}' is not defined")]
    UnknownTable { table: TableId, context: String },

    #[error("index '{0}' has no columns")]
    EmptyIndex(String),

    #[error("group index '{index}': table {root} is not an ancestor of table {leaf}")]
    DetachedGroup {
        index: String,
        root: TableId,
        leaf: TableId,
    },

    #[error("index '{index}': column table {table} is outside the indexed tables")]
    ColumnOutsideIndex { index: String, table: TableId },
}

///
/// Schema
///
/// Catalog of tables and their indexes. Parent links form the table
/// hierarchy group indexes span.
///

#[derive(Clone, Debug, Default)]
pub struct Schema {
    tables: BTreeMap<TableId, TableModel>,
    indexes: Vec<IndexModel>,
}

impl Schema {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            indexes: Vec::new(),
        }
    }

    pub fn add_table(&mut self, table: TableModel) -> Result<(), SchemaError> {
        if self.tables.contains_key(&table.id) {
            return Err(SchemaError::DuplicateTable(table.id));
        }
        if let Some(parent) = table.parent
            && !self.tables.contains_key(&parent)
        {
            return Err(SchemaError::UnknownTable {
                table: parent,
                context: table.name,
            });
        }
        self.tables.insert(table.id, table);

        Ok(())
    }

    pub fn add_index(&mut self, index: IndexModel) -> Result<(), SchemaError> {
        if self.indexes.iter().any(|existing| existing.name == index.name) {
            return Err(SchemaError::DuplicateIndex(index.name));
        }
        if index.columns.is_empty() {
            return Err(SchemaError::EmptyIndex(index.name));
        }
        for table in [index.root_table(), index.leaf_table()] {
            if !self.tables.contains_key(&table) {
                return Err(SchemaError::UnknownTable {
                    table,
                    context: index.name,
                });
            }
        }
        if let IndexKind::Group { root, leaf } = index.kind
            && !self.is_ancestor_or_self(root, leaf)
        {
            return Err(SchemaError::DetachedGroup {
                index: index.name,
                root,
                leaf,
            });
        }
        if let Some(column) = index
            .columns
            .iter()
            .find(|column| !self.is_indexed_table(&index, column.table))
        {
            return Err(SchemaError::ColumnOutsideIndex {
                table: column.table,
                index: index.name,
            });
        }
        self.indexes.push(index);

        Ok(())
    }

    #[must_use]
    pub fn table(&self, id: TableId) -> Option<&TableModel> {
        self.tables.get(&id)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableModel> + '_ {
        self.tables.values()
    }

    pub fn indexes(&self) -> impl Iterator<Item = &IndexModel> + '_ {
        self.indexes.iter()
    }

    #[must_use]
    pub fn index(&self, name: &str) -> Option<&IndexModel> {
        self.indexes.iter().find(|index| index.name == name)
    }

    /// Table indexes declared on `table`, in declaration order.
    pub fn table_indexes(&self, table: TableId) -> impl Iterator<Item = &IndexModel> + '_ {
        self.indexes
            .iter()
            .filter(move |index| index.kind == IndexKind::Table(table))
    }

    /// Group indexes in the hierarchy that contains `table`, in declaration order.
    pub fn group_indexes(&self, table: TableId) -> impl Iterator<Item = &IndexModel> + '_ {
        let root = self.root_of(table);
        self.indexes.iter().filter(move |index| {
            matches!(index.kind, IndexKind::Group { .. })
                && self.root_of(index.leaf_table()) == root
        })
    }

    /// Walk parent links from `table` up to its hierarchy root.
    #[must_use]
    pub fn root_of(&self, table: TableId) -> TableId {
        self.ancestry(table).last().unwrap_or(table)
    }

    /// `table` followed by each of its ancestors.
    pub fn ancestry(&self, table: TableId) -> impl Iterator<Item = TableId> + '_ {
        std::iter::successors(Some(table), move |current| {
            self.tables.get(current).and_then(|model| model.parent)
        })
    }

    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: TableId, table: TableId) -> bool {
        self.ancestry(table).any(|current| current == ancestor)
    }

    // Tables whose columns an index may carry: its own table, or the
    // root-to-leaf path of a group index.
    fn is_indexed_table(&self, index: &IndexModel, table: TableId) -> bool {
        match index.kind {
            IndexKind::Table(own) => own == table,
            IndexKind::Group { root, leaf } => {
                self.is_ancestor_or_self(table, leaf) && self.is_ancestor_or_self(root, table)
            }
        }
    }
}

///
/// TESTS
///
