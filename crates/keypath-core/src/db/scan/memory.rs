use crate::{
    db::{
        key::{KEY_AFTER, KeyBuffer},
        scan::cursor::{OrderedCursor, TraverseDirection},
    },
    error::InternalError,
};
use std::{collections::BTreeMap, ops::Bound};

///
/// MemoryCursor
///
/// Reference `OrderedCursor` over an in-memory sorted key set. Stored keys
/// are full composite keys; shallow traversal derives sibling prefixes from
/// them on the fly.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryCursor {
    entries: BTreeMap<Vec<u8>, KeyBuffer>,
    key: KeyBuffer,
}

impl MemoryCursor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            key: KeyBuffer::new(),
        }
    }

    pub fn from_keys(keys: impl IntoIterator<Item = KeyBuffer>) -> Self {
        let mut cursor = Self::new();
        for key in keys {
            cursor.insert(key);
        }

        cursor
    }

    /// Insert one full key; returns `false` when it was already present.
    pub fn insert(&mut self, key: KeyBuffer) -> bool {
        self.entries
            .insert(key.as_bytes().to_vec(), key)
            .is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored keys in physical order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyBuffer> + '_ {
        self.entries.values()
    }

    fn nearest(&self, direction: TraverseDirection, probe: &[u8]) -> Option<&KeyBuffer> {
        match direction {
            TraverseDirection::Gt => self
                .entries
                .range::<[u8], _>((Bound::Excluded(probe), Bound::Unbounded))
                .next(),
            TraverseDirection::Ge => self
                .entries
                .range::<[u8], _>((Bound::Included(probe), Bound::Unbounded))
                .next(),
            TraverseDirection::Lt => self
                .entries
                .range::<[u8], _>((Bound::Unbounded, Bound::Excluded(probe)))
                .next_back(),
            TraverseDirection::Le => self
                .entries
                .range::<[u8], _>((Bound::Unbounded, Bound::Included(probe)))
                .next_back(),
        }
        .map(|(_, key)| key)
    }

    fn traverse_deep(&mut self, direction: TraverseDirection) -> bool {
        let Some(found) = self.nearest(direction, self.key.as_bytes()).cloned() else {
            return false;
        };
        self.key = found;

        true
    }

    fn traverse_shallow(&mut self, direction: TraverseDirection) -> Result<bool, InternalError> {
        let depth = self.key.depth();
        if depth == 0 {
            return Err(InternalError::cursor_invariant(format!(
                "shallow traversal ({direction}) requires a key with at least one segment"
            )));
        }

        // Greater-than and less-or-equal must treat every key below the
        // current prefix as equal to it; an AFTER byte closes that subtree.
        let mut probe = self.key.as_bytes().to_vec();
        let (direction, probe) = match direction {
            TraverseDirection::Gt => {
                probe.push(KEY_AFTER);
                (TraverseDirection::Gt, probe)
            }
            TraverseDirection::Le => {
                probe.push(KEY_AFTER);
                (TraverseDirection::Lt, probe)
            }
            other => (other, probe),
        };

        let parent = self.key.prefix(depth - 1);
        let Some(found) = self.nearest(direction, &probe) else {
            return Ok(false);
        };
        if found.depth() < depth || !found.is_under(&parent) {
            return Ok(false);
        }
        self.key = found.prefix(depth);

        Ok(true)
    }
}

impl OrderedCursor for MemoryCursor {
    fn key(&self) -> &KeyBuffer {
        &self.key
    }

    fn key_mut(&mut self) -> &mut KeyBuffer {
        &mut self.key
    }

    fn traverse(
        &mut self,
        direction: TraverseDirection,
        deep: bool,
    ) -> Result<bool, InternalError> {
        if deep {
            Ok(self.traverse_deep(direction))
        } else {
            self.traverse_shallow(direction)
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{direction::Direction, key::EncodedSegment},
        value::Value,
    };

    fn key(values: &[i64]) -> KeyBuffer {
        let segments: Vec<_> = values
            .iter()
            .map(|value| {
                EncodedSegment::encode(&Value::Int(*value), Direction::Asc)
                    .expect("int should encode")
            })
            .collect();

        KeyBuffer::from_segments(&segments)
    }

    fn cursor() -> MemoryCursor {
        MemoryCursor::from_keys([
            key(&[1, 1]),
            key(&[1, 2]),
            key(&[2, 1]),
            key(&[3, 5]),
            key(&[3, 6]),
        ])
    }

    #[test]
    fn deep_traversal_lands_on_full_keys() {
        let mut cursor = cursor();
        cursor.key_mut().copy_from(&key(&[1]));

        assert!(cursor.step_next(true).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[1, 1]));
        assert!(cursor.step_next(true).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[1, 2]));
        assert!(cursor.step_prev(true).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[1, 1]));
    }

    #[test]
    fn shallow_traversal_moves_between_sibling_prefixes() {
        let mut cursor = cursor();
        cursor.key_mut().copy_from(&key(&[1]));

        assert!(cursor.step_next(false).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[2]));
        assert!(cursor.step_next(false).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[3]));
        assert!(!cursor.step_next(false).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[3]));
        assert!(cursor.step_prev(false).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[2]));
    }

    #[test]
    fn shallow_traversal_stays_under_parent() {
        let mut cursor = cursor();
        cursor.key_mut().copy_from(&key(&[1, 2]));

        assert!(!cursor.step_next(false).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[1, 2]));
        assert!(cursor.step_prev(false).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[1, 1]));
    }

    #[test]
    fn shallow_inclusive_traversal_matches_existing_prefix() {
        let mut cursor = cursor();
        cursor.key_mut().copy_from(&key(&[3]));

        assert!(cursor.traverse(TraverseDirection::Ge, false).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[3]));
        assert!(cursor.traverse(TraverseDirection::Le, false).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[3]));
    }

    #[test]
    fn shallow_traversal_from_markers_finds_first_and_last_children() {
        let mut cursor = cursor();
        let mut before = key(&[3]);
        before.append_before();
        cursor.key_mut().copy_from(&before);
        assert!(cursor.step_next(false).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[3, 5]));

        let mut after = key(&[1]);
        after.append_after();
        cursor.key_mut().copy_from(&after);
        assert!(cursor.step_prev(false).expect("traverse"));
        assert_eq!(cursor.key(), &key(&[1, 2]));
    }

    #[test]
    fn shallow_traversal_at_depth_zero_is_an_invariant_violation() {
        let mut cursor = cursor();
        let err = cursor
            .step_next(false)
            .expect_err("empty key has no level to traverse");

        assert!(err.is_invariant_violation());
    }
}
