//! Derived operations: value filtering, equality and diff.
//!
//! Each operation first normalizes its inputs through the cycle-free walk and flattening, then
//! works on flat maps only. Cycles and shared sub-trees therefore compare by where they were
//! first seen, and nesting depth never matters.

use crate::config::{Config, DiffOptions};
use crate::cycle::make_cycle_free;
use crate::error::Result;
use crate::flatten::{flatten, unflatten};
use crate::format::{DELETED_MARKER, PATH_SEPARATOR};
use crate::map::FlatMap;
use crate::tree::Tree;
use crate::value::Value;

/// The leaf value(s) a filter keeps.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Keep leaves equal to this value.
    Single(Tree),
    /// Keep leaves equal to any of these values.
    Many(Vec<Tree>),
}

impl Query {
    /// Returns true if `leaf` is selected by the query.
    ///
    /// Empty-container markers stand for containers, not values, and are never selected.
    pub fn matches(&self, leaf: &Tree) -> bool {
        if leaf.is_empty_container() {
            return false;
        }
        match self {
            Self::Single(q) => q == leaf,
            Self::Many(qs) => qs.contains(leaf),
        }
    }
}

impl From<Tree> for Query {
    fn from(tree: Tree) -> Self {
        Self::Single(tree)
    }
}

impl From<Vec<Tree>> for Query {
    fn from(trees: Vec<Tree>) -> Self {
        Self::Many(trees)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self::Single(Tree::from(s))
    }
}

impl From<i64> for Query {
    fn from(n: i64) -> Self {
        Self::Single(Tree::from(n))
    }
}

/// A result whose shape the caller selected.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// The flat map.
    Flat(FlatMap),
    /// The re-nested tree.
    Nested(Tree),
}

impl Output {
    /// Returns the flat map, if this is the flat shape.
    pub fn into_flat(self) -> Option<FlatMap> {
        match self {
            Self::Flat(map) => Some(map),
            Self::Nested(_) => None,
        }
    }

    /// Returns the tree, if this is the nested shape.
    pub fn into_nested(self) -> Option<Tree> {
        match self {
            Self::Nested(tree) => Some(tree),
            Self::Flat(_) => None,
        }
    }

    fn shaped(map: FlatMap, flatten_result: bool, config: &Config) -> Result<Self> {
        if flatten_result {
            return Ok(Self::Flat(map));
        }
        Ok(Self::Nested(unflatten(&map, &config.unflatten)?))
    }
}

/// Cycle-free walk followed by flattening.
pub fn canonical_flat(value: &Value, sort_keys: bool, config: &Config) -> Result<FlatMap> {
    let tree = make_cycle_free(value, config.walk)?;
    Ok(flatten(&tree, sort_keys))
}

/// Keeps only the leaves of `value` selected by `query`.
pub fn filter_by_value(
    value: &Value,
    query: &Query,
    flatten_result: bool,
    config: &Config,
) -> Result<Output> {
    let mut flat = canonical_flat(value, false, config)?;
    flat.retain(|_, leaf| query.matches(leaf));
    Output::shaped(flat, flatten_result, config)
}

/// Structural equality of two value graphs, insensitive to record key order.
pub fn are_equal(a: &Value, b: &Value, config: &Config) -> Result<bool> {
    let fa = canonical_flat(a, true, config)?;
    let fb = canonical_flat(b, true, config)?;
    Ok(fa.eq_ordered(&fb))
}

/// Like [`are_equal`], but leaves at or below any of `ignored` paths are not compared.
pub fn are_equal_ignoring(a: &Value, b: &Value, ignored: &[&str], config: &Config) -> Result<bool> {
    let keep = |key: &str, _: &Tree| !ignored.iter().any(|path| is_at_or_below(key, path));
    let mut fa = canonical_flat(a, true, config)?;
    let mut fb = canonical_flat(b, true, config)?;
    fa.retain(keep);
    fb.retain(keep);
    Ok(fa.eq_ordered(&fb))
}

/// Leaf-level changes that turn `a` into `b`.
///
/// Keys added or changed in `b` carry `b`'s value; keys only in `a` carry
/// [`DELETED_MARKER`]. Unchanged keys are omitted.
pub fn diff(a: &Value, b: &Value, options: DiffOptions, config: &Config) -> Result<Output> {
    let fa = canonical_flat(a, options.sort_keys, config)?;
    let fb = canonical_flat(b, options.sort_keys, config)?;

    let mut out = FlatMap::new();
    for (key, right) in &fb {
        if fa.get(key) != Some(right) {
            out.insert(key.clone(), right.clone());
        }
    }
    for key in fa.keys() {
        if !fb.contains_key(key) {
            out.insert(key.clone(), Tree::from(DELETED_MARKER));
        }
    }
    if options.sort_keys {
        out.sort_keys();
    }
    Output::shaped(out, options.flatten_result, config)
}

fn is_at_or_below(key: &str, path: &str) -> bool {
    match key.strip_prefix(path) {
        Some(rest) => rest.is_empty() || rest.starts_with(PATH_SEPARATOR),
        None => false,
    }
}
