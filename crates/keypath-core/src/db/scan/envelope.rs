use crate::db::{direction::Direction, key::EncodedSegment};
use std::{cmp::Ordering, ops::Bound};

///
/// continuation_advances
///
/// Directional strict-advancement comparator for scan steps.
/// `candidate` advances only when it is strictly after `anchor` under direction.
///

#[must_use]
pub(in crate::db) fn continuation_advances<K: Ord + ?Sized>(
    direction: Direction,
    anchor: &K,
    candidate: &K,
) -> bool {
    let ordering = match direction {
        Direction::Asc => candidate.cmp(anchor),
        Direction::Desc => anchor.cmp(candidate),
    };

    ordering == Ordering::Greater
}

///
/// SegmentEnvelope
///
/// Physical byte-order range for one key segment. Bounds are encoded
/// segments, so a descending column's logical range arrives here already
/// swapped.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SegmentEnvelope {
    lower: Bound<EncodedSegment>,
    upper: Bound<EncodedSegment>,
}

impl SegmentEnvelope {
    #[must_use]
    pub const fn new(lower: Bound<EncodedSegment>, upper: Bound<EncodedSegment>) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }

    #[must_use]
    pub const fn lower(&self) -> &Bound<EncodedSegment> {
        &self.lower
    }

    #[must_use]
    pub const fn upper(&self) -> &Bound<EncodedSegment> {
        &self.upper
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        matches!(
            (&self.lower, &self.upper),
            (Bound::Unbounded, Bound::Unbounded)
        )
    }

    /// Bound a traversal in `direction` starts from.
    #[must_use]
    pub const fn start(&self, direction: Direction) -> &Bound<EncodedSegment> {
        match direction {
            Direction::Asc => &self.lower,
            Direction::Desc => &self.upper,
        }
    }

    #[must_use]
    pub fn contains(&self, segment: &[u8]) -> bool {
        let lower_ok = match &self.lower {
            Bound::Unbounded => true,
            Bound::Included(boundary) => segment >= boundary.as_bytes(),
            Bound::Excluded(boundary) => segment > boundary.as_bytes(),
        };
        let upper_ok = match &self.upper {
            Bound::Unbounded => true,
            Bound::Included(boundary) => segment <= boundary.as_bytes(),
            Bound::Excluded(boundary) => segment < boundary.as_bytes(),
        };

        lower_ok && upper_ok
    }

    /// Whether `segment` lies before the envelope's start under `direction`.
    #[must_use]
    pub fn precedes_start(&self, segment: &[u8], direction: Direction) -> bool {
        match self.start(direction) {
            Bound::Unbounded => false,
            Bound::Included(boundary) => {
                continuation_advances(direction, segment, boundary.as_bytes())
            }
            Bound::Excluded(boundary) => {
                !continuation_advances(direction, boundary.as_bytes(), segment)
            }
        }
    }

    /// Whether no segment can satisfy both bounds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Bound::Included(lower), Bound::Included(upper)) => lower > upper,
            (
                Bound::Included(lower) | Bound::Excluded(lower),
                Bound::Included(upper) | Bound::Excluded(upper),
            ) => lower >= upper,
            _ => false,
        }
    }
}

impl Default for SegmentEnvelope {
    fn default() -> Self {
        Self::unbounded()
    }
}

///
/// TESTS
///
