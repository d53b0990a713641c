//! Core of KeyPath: index selection for relational query goals and
//! mixed-order scans over ordered composite-key cursors, plus the
//! vocabulary exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, cursors, sinks, or config loaders are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{
            direction::Direction,
            plan::{AccessPath, IndexGoal, IndexUsage, OrderEffectiveness},
            query::{CompareOp, ConditionExpr, Expr, OrderByExpr, QuerySources, SourceId},
        },
        model::{
            index::{IndexColumn, IndexModel},
            schema::Schema,
            table::{TableId, TableModel},
        },
        value::Value,
    };
}
