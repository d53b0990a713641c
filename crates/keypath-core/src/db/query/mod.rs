//! Module: db::query
//! Responsibility: the query-plan surface access-path selection reads.
//! Does not own: parsing, rewriting, or join ordering.
//! Boundary: expressions compare structurally; sources link to parents.

mod condition;
mod expr;
mod order;
mod source;

pub use condition::{CompareOp, ConditionExpr};
pub use expr::{ColumnRef, Expr, SubqueryId, WalkEvent};
pub use order::OrderByExpr;
pub use source::{QuerySources, SourceId, TableSource};
