use crate::{db::query::source::SourceId, value::Value};
use std::{collections::BTreeSet, fmt, ops::ControlFlow};

///
/// ColumnRef
/// Column of one table source.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ColumnRef {
    pub source: SourceId,
    pub column: String,
}

///
/// SubqueryId
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubqueryId(pub u32);

///
/// Expr
///
/// Scalar expression tree. Equality is structural: two column references
/// are equal only when they name the same source and column.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Expr {
    Column(ColumnRef),
    Literal(Value),
    /// Statement parameter, bound before execution.
    Param(usize),
    Function { name: String, args: Vec<Self> },
    Subquery(SubqueryId),
}

///
/// WalkEvent
///
/// One step of a depth-first walk. Composite nodes produce `Enter`, their
/// children, then `Leave`; leaves produce a single `Visit`.
///

#[derive(Clone, Copy, Debug)]
pub enum WalkEvent<'a> {
    Enter(&'a Expr),
    Visit(&'a Expr),
    Leave(&'a Expr),
}

impl Expr {
    #[must_use]
    pub fn column(source: SourceId, column: impl Into<String>) -> Self {
        Self::Column(ColumnRef {
            source,
            column: column.into(),
        })
    }

    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Function {
            name: name.into(),
            args,
        }
    }

    /// Depth-first walk; `Break` from the callback stops the walk at once.
    pub fn walk<'a, B>(
        &'a self,
        f: &mut impl FnMut(WalkEvent<'a>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        match self {
            Self::Function { args, .. } => {
                f(WalkEvent::Enter(self))?;
                for arg in args {
                    arg.walk(f)?;
                }
                f(WalkEvent::Leave(self))
            }
            Self::Column(_) | Self::Literal(_) | Self::Param(_) | Self::Subquery(_) => {
                f(WalkEvent::Visit(self))
            }
        }
    }

    /// Whether the expression is fixed once the `bound` sources are
    /// positioned: no subquery and no column of any other source.
    #[must_use]
    pub fn is_constant_or_bound(&self, bound: &BTreeSet<SourceId>) -> bool {
        let unbound = self.walk(&mut |event| match event {
            WalkEvent::Visit(Self::Column(column)) if !bound.contains(&column.source) => {
                ControlFlow::Break(())
            }
            WalkEvent::Visit(Self::Subquery(_)) => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        });

        unbound.is_continue()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => write!(f, "{}.{}", column.source, column.column),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Param(position) => write!(f, "${position}"),
            Self::Function { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Self::Subquery(id) => write!(f, "(subquery {})", id.0),
        }
    }
}

///
/// TESTS
///
