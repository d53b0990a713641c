use crate::db::query::expr::Expr;
use std::fmt;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Operator seen from the other side: `a < b` is `b > a`.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Eq => Self::Eq,
            Self::Ne => Self::Ne,
            Self::Lt => Self::Gt,
            Self::Le => Self::Ge,
            Self::Gt => Self::Lt,
            Self::Ge => Self::Le,
        }
    }

    #[must_use]
    pub const fn is_ordered_inequality(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }

    /// Lower-bounding operators (`>`, `>=`) seen from the column side.
    #[must_use]
    pub const fn is_lower_bound(self) -> bool {
        matches!(self, Self::Gt | Self::Ge)
    }

    #[must_use]
    pub const fn is_inclusive(self) -> bool {
        matches!(self, Self::Le | Self::Ge | Self::Eq)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        };
        write!(f, "{label}")
    }
}

///
/// ConditionExpr
///
/// Boolean predicate attached to a query. Only comparisons can be matched
/// against an index; everything else is carried opaquely.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConditionExpr {
    Compare {
        op: CompareOp,
        left: Expr,
        right: Expr,
    },
    Other(Expr),
}

impl ConditionExpr {
    #[must_use]
    pub const fn compare(left: Expr, op: CompareOp, right: Expr) -> Self {
        Self::Compare { op, left, right }
    }

    #[must_use]
    pub const fn equals(left: Expr, right: Expr) -> Self {
        Self::compare(left, CompareOp::Eq, right)
    }

    /// The comparison oriented around `column`: the operator as read with
    /// `column` on the left, and the opposite comparand. `None` when this
    /// is not a comparison or `column` is on neither side.
    #[must_use]
    pub fn oriented(&self, column: &Expr) -> Option<(CompareOp, &Expr)> {
        let Self::Compare { op, left, right } = self else {
            return None;
        };

        if left == column {
            Some((*op, right))
        } else if right == column {
            Some((op.mirrored(), left))
        } else {
            None
        }
    }
}

impl fmt::Display for ConditionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { op, left, right } => write!(f, "{left} {op} {right}"),
            Self::Other(expr) => write!(f, "{expr}"),
        }
    }
}

///
/// TESTS
///
