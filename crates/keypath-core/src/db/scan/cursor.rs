//! Module: db::scan::cursor
//! Responsibility: storage-facing cursor contract consumed by scan states.
//! Does not own: subtree tracking or row assembly.
//! Boundary: every physical movement a scan makes goes through `OrderedCursor`.

use crate::{db::key::KeyBuffer, error::InternalError};
use std::fmt;

///
/// TraverseDirection
///
/// Relation between the cursor's current key and the entry a traversal
/// lands on, in physical byte order.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraverseDirection {
    Gt,
    Ge,
    Lt,
    Le,
}

impl TraverseDirection {
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Gt | Self::Ge)
    }

    #[must_use]
    pub const fn is_inclusive(self) -> bool {
        matches!(self, Self::Ge | Self::Le)
    }
}

impl fmt::Display for TraverseDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        };
        write!(f, "{label}")
    }
}

///
/// OrderedCursor
///
/// Cursor over a sorted space of composite keys. The cursor owns its key
/// buffer; callers reposition by editing `key_mut()` and then traversing.
///
/// Traversal contract:
/// - `deep`: land on the nearest stored key in `direction` from the current
///   key and replace the key buffer with it.
/// - shallow: treat the key's depth `d` as a level. Land on the nearest
///   `d`-segment prefix of a stored key that shares the current key's first
///   `d - 1` segments, and replace the key buffer with that prefix.
/// - On `Ok(false)` the key buffer is left unchanged.
/// - Storage failures surface as `Err` and leave the key undefined.
///

pub trait OrderedCursor {
    fn key(&self) -> &KeyBuffer;

    fn key_mut(&mut self) -> &mut KeyBuffer;

    fn traverse(&mut self, direction: TraverseDirection, deep: bool)
    -> Result<bool, InternalError>;

    /// Move to the next entry in physical order.
    fn step_next(&mut self, deep: bool) -> Result<bool, InternalError> {
        self.traverse(TraverseDirection::Gt, deep)
    }

    /// Move to the previous entry in physical order.
    fn step_prev(&mut self, deep: bool) -> Result<bool, InternalError> {
        self.traverse(TraverseDirection::Lt, deep)
    }
}
