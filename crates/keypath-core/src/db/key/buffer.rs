use crate::db::key::ordered::{EncodedSegment, KEY_AFTER, KEY_BEFORE};
use std::cmp::Ordering;

///
/// KeyBuffer
///
/// Owned composite key: concatenated segment bytes plus the end offset of each
/// segment. Ordering is plain byte order, which matches segment-wise order
/// because every segment encoding is prefix-free.
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct KeyBuffer {
    bytes: Vec<u8>,
    ends: Vec<usize>,
}

impl KeyBuffer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            ends: Vec::new(),
        }
    }

    /// Build a key from already-encoded segments, outermost first.
    #[must_use]
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a EncodedSegment>) -> Self {
        let mut key = Self::new();
        for segment in segments {
            key.append_segment(segment.as_bytes());
        }

        key
    }

    /// Number of segments in the key.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.ends.len()
    }

    /// Total encoded size in bytes.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Borrow segment `index`, outermost first.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&[u8]> {
        let end = *self.ends.get(index)?;
        let start = if index == 0 { 0 } else { self.ends[index - 1] };

        Some(&self.bytes[start..end])
    }

    #[must_use]
    pub fn last_segment(&self) -> Option<&[u8]> {
        self.depth().checked_sub(1).and_then(|last| self.segment(last))
    }

    /// Copy of the last segment as an encoded value.
    #[must_use]
    pub fn last_encoded(&self) -> Option<EncodedSegment> {
        self.last_segment()
            .map(|bytes| EncodedSegment::from_raw(bytes.to_vec()))
    }

    pub fn append_segment(&mut self, segment: &[u8]) {
        self.bytes.extend_from_slice(segment);
        self.ends.push(self.bytes.len());
    }

    /// Append a segment that sorts before every value at this position.
    pub fn append_before(&mut self) {
        self.append_segment(&[KEY_BEFORE]);
    }

    /// Append a segment that sorts after every value at this position.
    pub fn append_after(&mut self) {
        self.append_segment(&[KEY_AFTER]);
    }

    /// Remove the last segment. Returns `false` on an empty key.
    pub fn cut(&mut self) -> bool {
        let Some(_) = self.ends.pop() else {
            return false;
        };
        let end = self.ends.last().copied().unwrap_or(0);
        self.bytes.truncate(end);

        true
    }

    /// Keep only the first `depth` segments.
    pub fn truncate_depth(&mut self, depth: usize) {
        if depth >= self.depth() {
            return;
        }
        self.ends.truncate(depth);
        let end = self.ends.last().copied().unwrap_or(0);
        self.bytes.truncate(end);
    }

    /// Owned copy of the first `depth` segments.
    #[must_use]
    pub fn prefix(&self, depth: usize) -> Self {
        let mut out = self.clone();
        out.truncate_depth(depth);

        out
    }

    /// Overwrite this key with `other`, reusing the allocation.
    pub fn copy_from(&mut self, other: &Self) {
        self.bytes.clear();
        self.bytes.extend_from_slice(&other.bytes);
        self.ends.clear();
        self.ends.extend_from_slice(&other.ends);
    }

    /// Byte offset of the first difference against `other`; the shorter
    /// length when one key is a byte prefix of the other.
    #[must_use]
    pub fn first_diverging_byte(&self, other: &Self) -> usize {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .position(|(left, right)| left != right)
            .unwrap_or_else(|| self.bytes.len().min(other.bytes.len()))
    }

    /// Whether this key lies in the subtree rooted at `root`.
    #[must_use]
    pub fn is_under(&self, root: &Self) -> bool {
        self.first_diverging_byte(root) >= root.encoded_len()
    }

    /// Whether the last segment is a before/after marker.
    #[must_use]
    pub fn ends_with_marker(&self) -> bool {
        matches!(self.last_segment(), Some([KEY_BEFORE] | [KEY_AFTER]))
    }
}

impl Ord for KeyBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl PartialOrd for KeyBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

///
/// TESTS
///
