//! Runtime catalog definitions.
//!
//! Types in `model` describe *what exists*: tables, their parent/child
//! hierarchy, and the indexes declared over them. Query-side references to
//! those tables live in `db::query`.

pub mod index;
pub mod schema;
pub mod table;
