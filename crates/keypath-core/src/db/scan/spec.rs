use crate::db::{direction::Direction, key::KeyBuffer, scan::envelope::SegmentEnvelope};

///
/// ColumnScan
///
/// Physical scan plan for one index column after the equality prefix.
/// `direction` is relative to stored byte order: `Asc` walks forward.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnScan {
    pub direction: Direction,
    pub envelope: SegmentEnvelope,
}

impl ColumnScan {
    #[must_use]
    pub const fn new(direction: Direction, envelope: SegmentEnvelope) -> Self {
        Self {
            direction,
            envelope,
        }
    }

    #[must_use]
    pub const fn forward() -> Self {
        Self::new(Direction::Asc, SegmentEnvelope::unbounded())
    }

    /// Whether a plain forward subtree walk can serve this column.
    #[must_use]
    pub const fn is_plain_forward(&self) -> bool {
        self.direction.is_asc() && self.envelope.is_unbounded()
    }
}

///
/// ScanSpec
///
/// Lowered, storage-ready description of one index scan: the encoded
/// equality prefix, per-column physical scans for the remaining index
/// columns, and how many row-locator segments trail every stored key.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanSpec {
    pub index: String,
    pub prefix: KeyBuffer,
    pub columns: Vec<ColumnScan>,
    pub row_locator_segments: usize,
}

impl ScanSpec {
    /// Number of leading columns that need per-value boundary traversal:
    /// everything up to the last backward or range-bounded column.
    #[must_use]
    pub fn boundary_depth(&self) -> usize {
        self.columns
            .iter()
            .rposition(|column| !column.is_plain_forward())
            .map_or(0, |last| last + 1)
    }

    /// Whether any column scans against stored byte order.
    #[must_use]
    pub fn is_mixed_order(&self) -> bool {
        let mut directions = self.columns.iter().map(|column| column.direction);
        match directions.next() {
            Some(first) => directions.any(|direction| direction != first),
            None => false,
        }
    }

    /// Whether the forward tail needs a subtree walk below the boundary columns.
    #[must_use]
    pub const fn has_forward_tail(&self, boundary_depth: usize) -> bool {
        boundary_depth < self.columns.len() || self.row_locator_segments > 0
    }
}
