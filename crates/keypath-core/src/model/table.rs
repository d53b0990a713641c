use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TableId
///
/// Stable catalog ordinal. Tables deeper in a hierarchy are created after
/// their parents, so a greater ordinal usually means a deeper table.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct TableId(pub u32);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

///
/// TableModel
/// One table in the catalog, optionally the child of another table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableModel {
    pub id: TableId,
    pub name: String,
    pub parent: Option<TableId>,
}

impl TableModel {
    #[must_use]
    pub fn new(id: TableId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: TableId) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
