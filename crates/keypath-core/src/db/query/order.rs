use crate::db::{direction::Direction, query::expr::Expr};
use std::fmt;

///
/// OrderByExpr
/// One ORDER BY term: an expression and its requested direction.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Direction,
}

impl OrderByExpr {
    #[must_use]
    pub const fn new(expr: Expr, direction: Direction) -> Self {
        Self { expr, direction }
    }

    #[must_use]
    pub const fn asc(expr: Expr) -> Self {
        Self::new(expr, Direction::Asc)
    }

    #[must_use]
    pub const fn desc(expr: Expr) -> Self {
        Self::new(expr, Direction::Desc)
    }
}

impl fmt::Display for OrderByExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.expr, self.direction)
    }
}
