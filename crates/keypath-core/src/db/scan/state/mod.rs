//! Module: db::scan::state
//! Responsibility: per-column scan state machines layered on an `OrderedCursor`.
//! Does not own: nest composition (see `scan::mixed`) or key encoding.
//! Boundary: states never hold the cursor; each call borrows it exclusively.

mod boundary;
mod remaining;


use crate::{
    db::{key::EncodedSegment, scan::cursor::OrderedCursor},
    error::InternalError,
};

pub use boundary::BoundaryColumnState;
pub use remaining::{RemainingSegmentsState, SubtreeState};

///
/// ScanState
///
/// Shared contract for one level of a mixed-order scan nest.
///
/// All three operations return whether the level produced a position. On
/// `Ok(false)` the cursor key holds the parent prefix plus exactly one
/// throwaway segment, which the caller cuts before backtracking.
///

pub trait ScanState {
    /// Begin scanning below the current cursor key.
    fn start_scan<C: OrderedCursor + ?Sized>(&mut self, cursor: &mut C)
    -> Result<bool, InternalError>;

    /// Move to the next position in this level's direction.
    fn advance<C: OrderedCursor + ?Sized>(&mut self, cursor: &mut C)
    -> Result<bool, InternalError>;

    /// Reposition this level at `value` (or the nearest value after it in
    /// scan direction). The cursor key must hold the parent prefix.
    fn jump<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        value: &EncodedSegment,
    ) -> Result<bool, InternalError>;
}

///
/// SegmentState
///
/// Closed set of level variants a scan nest is built from.
///

#[derive(Clone, Debug)]
pub enum SegmentState {
    Boundary(BoundaryColumnState),
    Remaining(RemainingSegmentsState),
}

impl ScanState for SegmentState {
    fn start_scan<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
    ) -> Result<bool, InternalError> {
        match self {
            Self::Boundary(state) => state.start_scan(cursor),
            Self::Remaining(state) => state.start_scan(cursor),
        }
    }

    fn advance<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
    ) -> Result<bool, InternalError> {
        match self {
            Self::Boundary(state) => state.advance(cursor),
            Self::Remaining(state) => state.advance(cursor),
        }
    }

    fn jump<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        value: &EncodedSegment,
    ) -> Result<bool, InternalError> {
        match self {
            Self::Boundary(state) => state.jump(cursor, value),
            Self::Remaining(state) => state.jump(cursor, value),
        }
    }
}
