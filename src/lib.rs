//! # nestflat
//!
//! Canonical, information-preserving forms for nested data that may contain cycles and shared
//! sub-trees.
//!
//! ## Overview
//!
//! A [`Value`] graph can alias: the same record may be reachable along two paths, or a record
//! may contain itself. nestflat turns such a graph into two canonical forms:
//!
//! *   **The cycle-free tree** ([`Tree`]): every repeated compound is replaced by a path token
//!     pointing at the place it was first seen (`"~"` for the root, `"~a~b"` for `root.a.b`).
//! *   **The flat map** ([`FlatMap`]): one entry per leaf, keyed by its dot-joined path
//!     (`"a.b.0.c"`). Empty containers are kept as sentinels, so the map can be re-nested.
//!
//! On top of those, the derived operations compare, diff and filter values purely by flat-map
//! algebra.
//!
//! ## Architecture
//!
//! ### The Walk
//!
//! [`visitor::walk`] is a plain recursive "visit value, recurse into children" copier. For each
//! entry it calls a [`visitor::Replacer`] with the entry's *current holder* and nothing else.
//! The [`graph::PathTracker`] implements that callback: it keeps the stack of open ancestors
//! separate from the registry of every compound ever opened, and infers backtracking from
//! holder changes.
//!
//! ### Flat Maps
//!
//! [`flatten`] emits maximal paths in pre-order. [`flatten::unflatten`] rebuilds a tree,
//! choosing sequence or record from whether the indexing segment is a canonical integer, and
//! treats every segment as untrusted (see [`config::UnflattenConfig`]).
//!
//! ## Usage
//!
//! ```rust
//! use nestflat::{NestFlat, Value};
//! use serde_json::json;
//!
//! let a = Value::from(json!({ "keyA": { "keyE": ["v3", "v4"], "keyB": { "keyC": "v" } } }));
//! let flat = NestFlat::flatten_value(&a, false)?;
//! let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
//! assert_eq!(keys, ["keyA.keyE.0", "keyA.keyE.1", "keyA.keyB.keyC"]);
//!
//! a.insert("self", a.clone());
//! assert_eq!(
//!     NestFlat::to_text(&a)?,
//!     r#"{"keyA":{"keyE":["v3","v4"],"keyB":{"keyC":"v"}},"self":"~"}"#
//! );
//! # Ok::<(), nestflat::NestError>(())
//! ```
//!
//! ## Errors
//!
//! Only three things fail: values the text serializer cannot represent, inputs nested deeper
//! than the depth guard, and I/O during export. Missing paths, empty containers and refused
//! unflatten segments are ordinary results.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// --- PUBLIC API MODULES ---
pub mod access;
pub mod api;
pub mod config;
pub mod cycle;
pub mod error;
pub mod flatten;
pub mod format;
pub mod io;
pub mod map;
pub mod ops;
pub mod tree;
pub mod value;
pub mod visitor;

// --- INTERNAL IMPLEMENTATION MODULES (Hidden from Docs) ---
#[doc(hidden)]
pub mod graph;

// --- RE-EXPORTS ---

pub use access::{KeyPath, clear_global_root, set_global_root};
pub use api::NestFlat;
pub use config::{Config, DiffOptions, SegmentPolicy, UnflattenConfig, WalkConfig};
pub use error::{NestError, Result};
pub use map::FlatMap;
pub use ops::{Output, Query};
pub use tree::Tree;
pub use value::{Compound, Opaque, Value};
