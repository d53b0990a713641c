use crate::model::table::TableId;
use std::fmt;

///
/// SourceId
/// Position of a table source inside one query's source arena.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SourceId(pub usize);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

///
/// TableSource
///
/// One reference to a catalog table inside a query. `parent` links a child
/// source to the source of its parent table when both are joined along the
/// table hierarchy.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableSource {
    pub id: SourceId,
    pub table: TableId,
    pub parent: Option<SourceId>,
}

///
/// QuerySources
/// Arena of table sources for one query.
///

#[derive(Clone, Debug, Default)]
pub struct QuerySources {
    sources: Vec<TableSource>,
}

impl QuerySources {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a source; `parent` must already be present.
    pub fn add(&mut self, table: TableId, parent: Option<SourceId>) -> SourceId {
        let id = SourceId(self.sources.len());
        self.sources.push(TableSource {
            id,
            table,
            parent: parent.filter(|parent| parent.0 < id.0),
        });

        id
    }

    #[must_use]
    pub fn get(&self, id: SourceId) -> Option<&TableSource> {
        self.sources.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableSource> + '_ {
        self.sources.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// `source` followed by each source up its parent chain.
    pub fn parent_chain(&self, source: SourceId) -> impl Iterator<Item = &TableSource> + '_ {
        std::iter::successors(self.get(source), move |current| {
            current.parent.and_then(|parent| self.get(parent))
        })
    }

    /// Nearest source at or above `source` that reads `table`.
    #[must_use]
    pub fn find_in_chain(&self, source: SourceId, table: TableId) -> Option<&TableSource> {
        self.parent_chain(source)
            .find(|candidate| candidate.table == table)
    }
}
