use crate::{db::direction::Direction, error::InternalError, value::Value};
use derive_more::Deref;
use thiserror::Error as ThisError;

const MAX_SEGMENT_LEN: usize = u16::MAX as usize;

/// Marker segment that sorts before every encoded value at its position.
pub(crate) const KEY_BEFORE: u8 = 0x00;

/// Marker segment that sorts after every encoded value at its position.
pub(crate) const KEY_AFTER: u8 = 0xFF;

///
/// OrderedValueEncodeError
///
/// Canonical index-encoding failures for one `Value` component.
///

#[derive(Debug, ThisError)]
pub enum OrderedValueEncodeError {
    #[error("ordered segment exceeds max length: {len} bytes (limit {max})")]
    SegmentTooLarge { len: usize, max: usize },
}

impl From<OrderedValueEncodeError> for InternalError {
    fn from(err: OrderedValueEncodeError) -> Self {
        Self::lowering_unsupported(format!(
            "index value is not canonically order-encodable: {err}"
        ))
    }
}

///
/// EncodedSegment
///
/// Canonical bytes for one index key segment, already laid out in the
/// column's stored direction. Segment encodings are prefix-free: no encoded
/// value is a strict byte prefix of another value for the same column.
///

#[derive(Clone, Debug, Deref, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EncodedSegment(Vec<u8>);

impl EncodedSegment {
    /// Encode one value for a column stored in `direction` order.
    pub fn encode(value: &Value, direction: Direction) -> Result<Self, OrderedValueEncodeError> {
        let mut out = encode_canonical_index_component(value)?;
        if !direction.is_asc() {
            invert_in_place(&mut out);
        }

        Ok(Self(out))
    }

    /// Wrap raw segment bytes taken from a stored key.
    #[must_use]
    pub(crate) const fn from_raw(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

/// Encode one scalar index component so lexicographic byte order matches
/// canonical `Value` order.
pub(crate) fn encode_canonical_index_component(
    value: &Value,
) -> Result<Vec<u8>, OrderedValueEncodeError> {
    let mut out = Vec::new();

    out.push(value.canonical_tag().to_u8());
    encode_component_payload(&mut out, value)?;

    Ok(out)
}

// Encode the variant-local payload after the canonical variant tag.
fn encode_component_payload(
    out: &mut Vec<u8>,
    value: &Value,
) -> Result<(), OrderedValueEncodeError> {
    match value {
        Value::Null => Ok(()),
        Value::Bool(v) => {
            out.push(u8::from(*v));
            Ok(())
        }
        Value::Int(v) => {
            out.extend_from_slice(&ordered_i64_bytes(*v));
            Ok(())
        }
        Value::Text(v) => {
            if v.len() > MAX_SEGMENT_LEN {
                return Err(OrderedValueEncodeError::SegmentTooLarge {
                    len: v.len(),
                    max: MAX_SEGMENT_LEN,
                });
            }
            push_terminated_bytes(out, v.as_bytes());
            Ok(())
        }
        Value::Uint(v) => {
            out.extend_from_slice(&v.to_be_bytes());
            Ok(())
        }
    }
}

// Byte strings are escaped so segment boundaries remain unambiguous.
fn push_terminated_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        if byte == 0 {
            out.extend_from_slice(&[0, 0xFF]);
        } else {
            out.push(byte);
        }
    }

    out.extend_from_slice(&[0, 0]);
}

fn invert_in_place(bytes: &mut [u8]) {
    for byte in bytes {
        *byte = !*byte;
    }
}

const fn ordered_i64_bytes(value: i64) -> [u8; 8] {
    let biased = value.cast_unsigned() ^ (1u64 << 63);
    biased.to_be_bytes()
}

///
/// TESTS
///
