//! Module: db::scan
//! Responsibility: index scan execution over an `OrderedCursor`.
//! Does not own: access-path choice or comparand resolution (see `db::plan`).
//! Boundary: consumes a lowered `ScanSpec`, produces stored keys in requested order.

mod cursor;
mod envelope;
mod memory;
mod mixed;
mod spec;
mod state;


pub use cursor::{OrderedCursor, TraverseDirection};
pub use envelope::SegmentEnvelope;
pub use memory::MemoryCursor;
pub use mixed::MixedOrderScan;
pub use spec::{ColumnScan, ScanSpec};
pub use state::{
    BoundaryColumnState, RemainingSegmentsState, ScanState, SegmentState, SubtreeState,
};
