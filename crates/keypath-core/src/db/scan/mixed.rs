//! Module: db::scan::mixed
//! Responsibility: compose per-column scan states into one ordered row stream.
//! Does not own: physical movement (cursor) or per-level bookkeeping (states).
//! Boundary: callers drive `next_row` / `jump`; the cursor is borrowed per call.

use crate::{
    db::{
        key::{EncodedSegment, KeyBuffer},
        scan::{
            cursor::OrderedCursor,
            spec::ScanSpec,
            state::{BoundaryColumnState, RemainingSegmentsState, ScanState, SegmentState},
        },
    },
    error::InternalError,
    obs::sink::{MetricsEvent, record},
};

///
/// ScanPhase
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ScanPhase {
    Fresh,
    Running,
    Done,
}

///
/// MixedOrderScan
///
/// Nested-loop driver over an ordered cursor. Every column up to the last
/// backward or range-bounded column gets a boundary state walking its
/// distinct values; the forward-only tail (plus row-locator segments) is
/// covered by a single remaining-segments state.
///
/// Levels are entered outer to inner and exhausted inner to outer. When a
/// level reports no position, the driver cuts the throwaway segment it left
/// behind and resumes the enclosing level.
///

#[derive(Debug)]
pub struct MixedOrderScan {
    prefix: KeyBuffer,
    levels: Vec<SegmentState>,
    boundary_depth: usize,
    phase: ScanPhase,
    rows: u64,
}

impl MixedOrderScan {
    pub fn new(spec: &ScanSpec) -> Result<Self, InternalError> {
        let boundary_depth = spec.boundary_depth();
        let mut levels: Vec<SegmentState> = spec.columns[..boundary_depth]
            .iter()
            .map(|column| {
                SegmentState::Boundary(BoundaryColumnState::new(
                    column.direction,
                    column.envelope.clone(),
                ))
            })
            .collect();
        if spec.has_forward_tail(boundary_depth) {
            levels.push(SegmentState::Remaining(RemainingSegmentsState::forward()));
        }

        if levels.is_empty() {
            return Err(InternalError::scan_unsupported(format!(
                "index '{}' scan has no column or row-locator segment left to traverse",
                spec.index
            )));
        }

        Ok(Self {
            prefix: spec.prefix.clone(),
            levels,
            boundary_depth,
            phase: ScanPhase::Fresh,
            rows: 0,
        })
    }

    /// Number of nested levels (boundary states plus an optional tail).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub const fn boundary_depth(&self) -> usize {
        self.boundary_depth
    }

    #[must_use]
    pub const fn rows_scanned(&self) -> u64 {
        self.rows
    }

    /// Produce the next stored key in requested order, or `None` when done.
    pub fn next_row<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
    ) -> Result<Option<KeyBuffer>, InternalError> {
        let found = match self.phase {
            ScanPhase::Done => return Ok(None),
            ScanPhase::Fresh => {
                cursor.key_mut().copy_from(&self.prefix);
                self.settle(cursor, 0, true)?
            }
            ScanPhase::Running => self.settle(cursor, self.levels.len() - 1, false)?,
        };

        Ok(self.emit(cursor, found))
    }

    /// Reposition the nest at the given leading column values, in logical
    /// scan order, and return the first row at or after that position.
    pub fn jump<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        values: &[EncodedSegment],
    ) -> Result<Option<KeyBuffer>, InternalError> {
        if values.len() > self.boundary_depth {
            return Err(InternalError::scan_unsupported(format!(
                "jump over {} columns exceeds the {} boundary columns of this scan",
                values.len(),
                self.boundary_depth
            )));
        }

        cursor.key_mut().copy_from(&self.prefix);
        let mut landed = values.len();
        let mut entered = values.len();
        for (level, value) in values.iter().enumerate() {
            if !self.levels[level].jump(cursor, value)? {
                landed = level;
                break;
            }
            // Past the requested value: inner levels start over from their
            // first value instead of taking the remaining requested ones.
            if cursor.key().last_segment() != Some(value.as_bytes()) {
                entered = level + 1;
                break;
            }
        }

        let found = if landed == values.len() {
            if entered == self.levels.len() {
                true
            } else {
                self.settle(cursor, entered, true)?
            }
        } else {
            cursor.key_mut().cut();
            match landed.checked_sub(1) {
                Some(level) => self.settle(cursor, level, false)?,
                None => false,
            }
        };

        Ok(self.emit(cursor, found))
    }

    /// Drain every remaining row.
    pub fn collect_rows<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
    ) -> Result<Vec<KeyBuffer>, InternalError> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row(cursor)? {
            rows.push(row);
        }

        Ok(rows)
    }

    fn emit<C: OrderedCursor + ?Sized>(&mut self, cursor: &C, found: bool) -> Option<KeyBuffer> {
        if found {
            self.phase = ScanPhase::Running;
            self.rows = self.rows.saturating_add(1);
            Some(cursor.key().clone())
        } else {
            self.phase = ScanPhase::Done;
            None
        }
    }

    // Run the nest from `level` until the innermost level holds a row or the
    // outermost level is exhausted.
    fn settle<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        mut level: usize,
        mut entering: bool,
    ) -> Result<bool, InternalError> {
        let innermost = self.levels.len() - 1;

        loop {
            let state = &mut self.levels[level];
            let positioned = if entering {
                state.start_scan(cursor)?
            } else {
                state.advance(cursor)?
            };

            if positioned {
                if level == innermost {
                    return Ok(true);
                }
                level += 1;
                entering = true;
                continue;
            }

            if !cursor.key_mut().cut() {
                return Err(InternalError::scan_invariant(
                    "exhausted scan level left no throwaway segment to cut",
                ));
            }
            let Some(outer) = level.checked_sub(1) else {
                return Ok(false);
            };
            level = outer;
            entering = false;
        }
    }
}

impl Drop for MixedOrderScan {
    fn drop(&mut self) {
        if self.rows > 0 {
            record(MetricsEvent::RowsScanned { rows: self.rows });
        }
    }
}
