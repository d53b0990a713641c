//! Module: db::key
//! Responsibility: order-preserving composite key bytes.
//! Does not own: traversal (see `db::scan`) or comparand resolution.
//! Boundary: every index key segment is built by `EncodedSegment::encode`.

mod buffer;
mod ordered;

pub use buffer::KeyBuffer;
pub(crate) use ordered::{KEY_AFTER, KEY_BEFORE};
pub use ordered::{EncodedSegment, OrderedValueEncodeError};
