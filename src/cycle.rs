//! The cycle-safe serializer.
//!
//! Composes the generic [`walk`] with a fresh [`PathTracker`]: every compound is either
//! recorded as newly seen, or replaced by the path token of its first visitation. The result
//! is a tree with no aliasing and no cycles, safe for any recursive consumer.
//!
//! ```rust
//! use nestflat::{cycle, Value};
//!
//! let a = Value::record();
//! a.insert("b", Value::from(1));
//! a.insert("c", a.clone());
//! assert_eq!(cycle::to_text(&a, Default::default())?, r#"{"b":1,"c":"~"}"#);
//! # Ok::<(), nestflat::NestError>(())
//! ```

use crate::config::WalkConfig;
use crate::error::Result;
use crate::graph::PathTracker;
use crate::io::render_text;
use crate::tree::Tree;
use crate::value::Value;
use crate::visitor::walk;

/// Produces the cycle-free tree of `value`.
pub fn make_cycle_free(value: &Value, config: WalkConfig) -> Result<Tree> {
    tracing::debug!(max_depth = config.max_depth, "cycle-free walk started");
    let mut tracker = PathTracker::new(value);
    let (tree, stats) = walk(value, &mut tracker, config)?;
    tracing::debug!(
        entries = stats.entries,
        substituted = stats.substituted,
        compounds = tracker.registry().len(),
        "cycle-free walk finished"
    );
    Ok(tree)
}

/// Produces the compact JSON text of the cycle-free tree.
///
/// Fails with [`NestError::UnserializableValue`](crate::NestError::UnserializableValue) if
/// the tree holds an opaque leaf.
pub fn to_text(value: &Value, config: WalkConfig) -> Result<String> {
    let tree = make_cycle_free(value, config)?;
    Ok(serde_json::to_string(&tree)?)
}

/// Produces the pretty-printed JSON text of the cycle-free tree with `indent` spaces.
pub fn to_pretty_text(value: &Value, indent: usize, config: WalkConfig) -> Result<String> {
    let tree = make_cycle_free(value, config)?;
    render_text(&tree, indent)
}

/// Round-trips the cycle-free text through the JSON parser.
///
/// The result holds only plain containers and scalars.
pub fn to_object_form(value: &Value, config: WalkConfig) -> Result<Tree> {
    let text = to_text(value, config)?;
    let json: serde_json::Value = serde_json::from_str(&text)?;
    Ok(Tree::from(json))
}
