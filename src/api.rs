//! The `NestFlat` facade.
//!
//! Each operation comes in two flavors: a plain entry point that runs with the default
//! limits, and a `*_with` variant that takes the configuration explicitly. Both forward to the
//! module functions in [`cycle`], [`flatten`], [`ops`] and [`io`].
//!
//! ```rust
//! use nestflat::{NestFlat, UnflattenConfig, Value};
//!
//! let value = Value::from(serde_json::json!({ "a": [1, 2] }));
//! let flat = NestFlat::flatten_value(&value, false)?;
//! let config = UnflattenConfig { max_depth: 8, ..UnflattenConfig::default() };
//! assert_eq!(NestFlat::unflatten_with(&flat, &config)?, NestFlat::unflatten(&flat)?);
//! # Ok::<(), nestflat::NestError>(())
//! ```

use crate::access::{KeyPath, access_by_path};
use crate::config::{Config, DiffOptions, UnflattenConfig, WalkConfig};
use crate::error::Result;
use crate::map::FlatMap;
use crate::ops::{Output, Query};
use crate::tree::Tree;
use crate::value::Value;
use crate::{cycle, flatten, io, ops};
use std::path::Path;

/// The main entry point.
///
/// Every call allocates its own traversal state; nothing is shared between calls.
#[derive(Debug)]
pub struct NestFlat;

impl NestFlat {
    // --- FLAT MAPS ---

    /// Flattens a cycle-free tree into a path map.
    pub fn flatten(tree: &Tree, sort_keys: bool) -> FlatMap {
        flatten::flatten(tree, sort_keys)
    }

    /// Makes `value` cycle-free, then flattens it.
    pub fn flatten_value(value: &Value, sort_keys: bool) -> Result<FlatMap> {
        Self::flatten_value_with(value, sort_keys, WalkConfig::default())
    }

    /// [`flatten_value`](Self::flatten_value) with an explicit walk configuration.
    pub fn flatten_value_with(value: &Value, sort_keys: bool, config: WalkConfig) -> Result<FlatMap> {
        let tree = cycle::make_cycle_free(value, config)?;
        Ok(flatten::flatten(&tree, sort_keys))
    }

    /// Rebuilds a nested tree. Denied segments are skipped.
    pub fn unflatten(flat: &FlatMap) -> Result<Tree> {
        Self::unflatten_with(flat, &UnflattenConfig::default())
    }

    /// [`unflatten`](Self::unflatten) with explicit limits and segment policy.
    pub fn unflatten_with(flat: &FlatMap, config: &UnflattenConfig) -> Result<Tree> {
        flatten::unflatten(flat, config)
    }

    // --- CYCLE-FREE FORMS ---

    /// Replaces every repeated compound by the path token of its first visitation.
    pub fn make_cycle_free(value: &Value) -> Result<Tree> {
        Self::make_cycle_free_with(value, WalkConfig::default())
    }

    /// [`make_cycle_free`](Self::make_cycle_free) with an explicit depth guard.
    pub fn make_cycle_free_with(value: &Value, config: WalkConfig) -> Result<Tree> {
        cycle::make_cycle_free(value, config)
    }

    /// Compact JSON text of the cycle-free tree.
    pub fn to_text(value: &Value) -> Result<String> {
        Self::to_text_with(value, WalkConfig::default())
    }

    /// [`to_text`](Self::to_text) with an explicit depth guard.
    pub fn to_text_with(value: &Value, config: WalkConfig) -> Result<String> {
        cycle::to_text(value, config)
    }

    /// The cycle-free tree, round-tripped through JSON text.
    pub fn to_object_form(value: &Value) -> Result<Tree> {
        Self::to_object_form_with(value, WalkConfig::default())
    }

    /// [`to_object_form`](Self::to_object_form) with an explicit depth guard.
    pub fn to_object_form_with(value: &Value, config: WalkConfig) -> Result<Tree> {
        cycle::to_object_form(value, config)
    }

    /// Own-entry lookup by dotted path or segment list. `None` root means the host root.
    pub fn access_by_path<'a>(path: impl Into<KeyPath<'a>>, root: Option<&Value>) -> Option<Value> {
        access_by_path(path, root)
    }

    // --- DERIVED OPERATIONS ---

    /// Keeps the leaves equal to the query value (or any of the query values).
    pub fn filter_by_value(value: &Value, query: impl Into<Query>, flatten_result: bool) -> Result<Output> {
        Self::filter_by_value_with(value, query, flatten_result, &Config::default())
    }

    /// [`filter_by_value`](Self::filter_by_value) with an explicit configuration.
    pub fn filter_by_value_with(
        value: &Value,
        query: impl Into<Query>,
        flatten_result: bool,
        config: &Config,
    ) -> Result<Output> {
        ops::filter_by_value(value, &query.into(), flatten_result, config)
    }

    /// Structural equality, ignoring record key order.
    pub fn are_equal(a: &Value, b: &Value) -> Result<bool> {
        Self::are_equal_with(a, b, &Config::default())
    }

    /// [`are_equal`](Self::are_equal) with an explicit configuration.
    pub fn are_equal_with(a: &Value, b: &Value, config: &Config) -> Result<bool> {
        ops::are_equal(a, b, config)
    }

    /// Structural equality that skips the given flat paths.
    pub fn are_equal_ignoring(a: &Value, b: &Value, ignored: &[&str]) -> Result<bool> {
        Self::are_equal_ignoring_with(a, b, ignored, &Config::default())
    }

    /// [`are_equal_ignoring`](Self::are_equal_ignoring) with an explicit configuration.
    pub fn are_equal_ignoring_with(a: &Value, b: &Value, ignored: &[&str], config: &Config) -> Result<bool> {
        ops::are_equal_ignoring(a, b, ignored, config)
    }

    /// Leaf-level diff from `a` to `b`.
    pub fn diff(a: &Value, b: &Value, sort_keys: bool, flatten_result: bool) -> Result<Output> {
        let options = DiffOptions {
            sort_keys,
            flatten_result,
        };
        Self::diff_with(a, b, options, &Config::default())
    }

    /// [`diff`](Self::diff) with explicit options and configuration.
    pub fn diff_with(a: &Value, b: &Value, options: DiffOptions, config: &Config) -> Result<Output> {
        ops::diff(a, b, options, config)
    }

    // --- EXPORT ---

    /// Pretty JSON of the cycle-free tree with `indent` spaces.
    pub fn export_as_text(value: &Value, indent: usize) -> Result<String> {
        Self::export_as_text_with(value, indent, WalkConfig::default())
    }

    /// [`export_as_text`](Self::export_as_text) with an explicit depth guard.
    pub fn export_as_text_with(value: &Value, indent: usize, config: WalkConfig) -> Result<String> {
        cycle::to_pretty_text(value, indent, config)
    }

    /// Writes the pretty JSON of the cycle-free tree to `path`.
    pub fn export_to_file<P: AsRef<Path>>(path: P, value: &Value, indent: usize) -> Result<()> {
        Self::export_to_file_with(path, value, indent, WalkConfig::default())
    }

    /// [`export_to_file`](Self::export_to_file) with an explicit depth guard.
    pub fn export_to_file_with<P: AsRef<Path>>(
        path: P,
        value: &Value,
        indent: usize,
        config: WalkConfig,
    ) -> Result<()> {
        io::export_to_file(path, value, indent, config)
    }
}
