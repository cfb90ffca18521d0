//! # httpgen Reconcile
//!
//! Merges a freshly generated JSON request body with the body a user edited
//! in a previous run.
//!
//! Structure comes from the fresh document: which fields exist and how they
//! nest. Values come from the old document wherever a compatible slot
//! exists.
//!
//! | fresh field   | old field     | result                  |
//! |---------------|---------------|-------------------------|
//! | any           | absent        | fresh value             |
//! | object        | object        | recursive merge         |
//! | object        | non-object    | fresh object            |
//! | non-object    | any           | old value               |
//!
//! Fields only the old document has are dropped.
//!
//! ## Example
//!
//! ```rust
//! use httpgen_reconcile::merge_bodies;
//!
//! let fresh = r#"{"id":0,"note":"stringValue"}"#;
//! let old = r#"{"id":0,"note":"hello","extra":"z"}"#;
//!
//! let merged: serde_json::Value = serde_json::from_str(&merge_bodies(fresh, old)).unwrap();
//! assert_eq!(merged, serde_json::json!({"id": 0, "note": "hello"}));
//! ```

mod error;
mod merge;

pub use error::{ReconcileError, Result};
pub use merge::{merge_bodies, merge_values, try_merge_bodies};
