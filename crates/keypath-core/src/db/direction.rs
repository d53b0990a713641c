use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Direction
///
/// Canonical ordering direction shared by index column definitions, ORDER BY
/// requests, and scan traversal.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn is_asc(self) -> bool {
        matches!(self, Self::Asc)
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Physical traversal direction that yields `self` on a column stored in
    /// `stored` order. `Asc` means forward in byte order.
    #[must_use]
    pub const fn relative_to(self, stored: Self) -> Self {
        if self.is_asc() == stored.is_asc() {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}
