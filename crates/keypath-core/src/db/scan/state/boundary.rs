use crate::{
    db::{
        direction::Direction,
        key::EncodedSegment,
        scan::{
            cursor::{OrderedCursor, TraverseDirection},
            envelope::SegmentEnvelope,
            state::ScanState,
        },
    },
    error::InternalError,
    obs::sink::{MetricsEvent, record},
};
use std::ops::Bound;

///
/// BoundaryColumnState
///
/// Walks the distinct values of one column with shallow sibling traversal.
/// Compares encoded segments directly against its envelope instead of
/// tracking a subtree root; the parent prefix is whatever the enclosing
/// states left in the cursor key.
///

#[derive(Clone, Debug)]
pub struct BoundaryColumnState {
    direction: Direction,
    envelope: SegmentEnvelope,
}

impl BoundaryColumnState {
    /// `direction` is the physical scan direction (`Asc` walks byte order).
    #[must_use]
    pub const fn new(direction: Direction, envelope: SegmentEnvelope) -> Self {
        Self {
            direction,
            envelope,
        }
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn envelope(&self) -> &SegmentEnvelope {
        &self.envelope
    }

    const fn step_direction(&self) -> TraverseDirection {
        if self.direction.is_asc() {
            TraverseDirection::Gt
        } else {
            TraverseDirection::Lt
        }
    }

    const fn seek_direction(&self) -> TraverseDirection {
        if self.direction.is_asc() {
            TraverseDirection::Ge
        } else {
            TraverseDirection::Le
        }
    }

    fn land<C: OrderedCursor + ?Sized>(
        &self,
        cursor: &mut C,
        direction: TraverseDirection,
    ) -> Result<bool, InternalError> {
        let found = cursor.traverse(direction, false)?;
        record(MetricsEvent::IndexTraverse);
        if !found {
            return Ok(false);
        }

        Ok(cursor
            .key()
            .last_segment()
            .is_some_and(|segment| self.envelope.contains(segment)))
    }
}

impl ScanState for BoundaryColumnState {
    fn start_scan<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
    ) -> Result<bool, InternalError> {
        let key = cursor.key_mut();
        // Contradictory range: leave the throwaway segment without a traversal.
        if self.envelope.is_empty() {
            key.append_before();
            return Ok(false);
        }
        let traverse = match self.envelope.start(self.direction) {
            Bound::Included(value) => {
                key.append_segment(value);
                self.seek_direction()
            }
            Bound::Excluded(value) => {
                key.append_segment(value);
                self.step_direction()
            }
            Bound::Unbounded => {
                if self.direction.is_asc() {
                    key.append_before();
                } else {
                    key.append_after();
                }
                self.step_direction()
            }
        };

        self.land(cursor, traverse)
    }

    fn advance<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
    ) -> Result<bool, InternalError> {
        self.land(cursor, self.step_direction())
    }

    fn jump<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        value: &EncodedSegment,
    ) -> Result<bool, InternalError> {
        if self.envelope.is_empty() || self.envelope.precedes_start(value, self.direction) {
            return self.start_scan(cursor);
        }
        cursor.key_mut().append_segment(value);

        self.land(cursor, self.seek_direction())
    }
}
