use crate::{
    db::{
        direction::Direction,
        key::{EncodedSegment, KeyBuffer},
        scan::{
            cursor::{OrderedCursor, TraverseDirection},
            envelope::continuation_advances,
            state::ScanState,
        },
    },
    error::InternalError,
    obs::sink::{MetricsEvent, record},
};

///
/// SubtreeState
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubtreeState {
    Initial,
    InsideSubtree,
    Exhausted,
}

///
/// RemainingSegmentsState
///
/// Scans every stored key below a remembered subtree root with deep
/// traversal. The root is an owned snapshot of the cursor key taken by
/// `start_scan`; leaving the subtree restores the key to that root plus a
/// BEFORE marker.
///

#[derive(Clone, Debug)]
pub struct RemainingSegmentsState {
    direction: Direction,
    root: KeyBuffer,
    last: KeyBuffer,
    subtree: SubtreeState,
}

impl RemainingSegmentsState {
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            root: KeyBuffer::new(),
            last: KeyBuffer::new(),
            subtree: SubtreeState::Initial,
        }
    }

    #[must_use]
    pub const fn forward() -> Self {
        Self::new(Direction::Asc)
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn subtree(&self) -> SubtreeState {
        self.subtree
    }

    /// Remembered subtree root, empty before the first `start_scan`.
    #[must_use]
    pub const fn root(&self) -> &KeyBuffer {
        &self.root
    }

    // Classify the landed key against the root: inside, outside, or corrupt.
    fn landed_inside(&self, key: &KeyBuffer) -> Result<bool, InternalError> {
        let diverge = key.first_diverging_byte(&self.root);
        if diverge >= self.root.encoded_len() {
            return Ok(true);
        }
        if diverge == key.encoded_len() {
            return Err(InternalError::scan_invariant(format!(
                "stored key of {} bytes is a proper prefix of the {}-byte subtree root",
                key.encoded_len(),
                self.root.encoded_len()
            )));
        }

        Ok(false)
    }

    fn exit<C: OrderedCursor + ?Sized>(&mut self, cursor: &mut C) -> bool {
        let key = cursor.key_mut();
        key.copy_from(&self.root);
        key.append_before();
        self.subtree = SubtreeState::Exhausted;
        record(MetricsEvent::SubtreeExit);

        false
    }
}

impl ScanState for RemainingSegmentsState {
    fn start_scan<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
    ) -> Result<bool, InternalError> {
        self.root.copy_from(cursor.key());
        self.subtree = SubtreeState::InsideSubtree;

        // Entering from the far end keeps a backward scan inside the subtree.
        let found = if self.direction.is_asc() {
            cursor.traverse(TraverseDirection::Gt, true)?
        } else {
            cursor.key_mut().append_after();
            cursor.traverse(TraverseDirection::Lt, true)?
        };
        record(MetricsEvent::IndexTraverse);

        if found && self.landed_inside(cursor.key())? {
            return Ok(true);
        }

        Ok(self.exit(cursor))
    }

    fn advance<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
    ) -> Result<bool, InternalError> {
        if self.subtree != SubtreeState::InsideSubtree {
            return Err(InternalError::scan_invariant(format!(
                "advance called on a remaining-segments state in {:?}",
                self.subtree
            )));
        }

        self.last.copy_from(cursor.key());
        let moved = if self.direction.is_asc() {
            cursor.step_next(true)?
        } else {
            cursor.step_prev(true)?
        };
        record(MetricsEvent::IndexTraverse);

        if !moved {
            return Ok(self.exit(cursor));
        }
        if !continuation_advances(self.direction, &self.last, cursor.key()) {
            return Err(InternalError::scan_invariant(format!(
                "cursor step moved against the {} scan direction",
                self.direction
            )));
        }
        if self.landed_inside(cursor.key())? {
            return Ok(true);
        }

        Ok(self.exit(cursor))
    }

    fn jump<C: OrderedCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        value: &EncodedSegment,
    ) -> Result<bool, InternalError> {
        cursor.key_mut().append_segment(value);

        self.start_scan(cursor)
    }
}
