//! KeyPath: pick the index that best serves a query goal, then scan it in
//! any per-column order over an ordered composite-key cursor.
//!
//! ## Crate layout
//! - `core`: planning, lowering, scan execution, config, and observability.
//!
//! The `prelude` mirrors the vocabulary most callers need to build a schema,
//! describe a goal, and run the chosen scan.

pub use keypath_core as core;

pub use crate::core::{config, db, error, model, obs, value};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        config::{AccessPathConfig, PlannerConfig},
        db::{
            key::{EncodedSegment, KeyBuffer},
            plan::{ScanOrder, lower_usage},
            scan::{MemoryCursor, MixedOrderScan, OrderedCursor, ScanSpec},
        },
        error::InternalError,
        prelude::*,
    };
}
