//! Module: db
//! Responsibility: access-path selection and mixed-order index scans.
//! Does not own: catalog definitions (see `model`) or row storage.
//! Boundary: `plan` chooses and lowers, `scan` executes against a cursor.

pub mod direction;
pub mod key;
pub mod plan;
pub mod query;
pub mod scan;
