//! Conversion between nested trees and flat path maps.
//!
//! # Flatten
//! A pre-order walk that emits one entry per leaf. Sequence positions become numeric segments;
//! empty containers are kept as empty-container sentinels so nothing is lost.
//!
//! # Unflatten
//! Each key is split on `.` and written into a freshly built tree. The kind of an intermediate
//! container is inferred from the segment that indexes into it: a canonical non-negative
//! integer makes a sequence, anything else a record. Keys are treated as untrusted input:
//! segments on the deny-list, indices above the configured maximum, and writes that would
//! exceed the per-call slot budget are handled per [`SegmentPolicy`]. Keys deeper than the
//! configured maximum fail the call.
//!
//! Conflicting keys such as `a` and `a.b` are resolved by last write wins on the shared slot.

use crate::config::{SegmentPolicy, UnflattenConfig};
use crate::error::{NestError, Result};
use crate::format::{PATH_SEPARATOR, join_key, parse_index};
use crate::map::FlatMap;
use crate::tree::Tree;

/// Flattens a cycle-free tree.
///
/// With `sort_keys` the map is ordered by key; otherwise it is in traversal order.
pub fn flatten(tree: &Tree, sort_keys: bool) -> FlatMap {
    let mut out = FlatMap::new();
    // Explicit stack: depth is bounded by memory, not by the call stack.
    let mut stack: Vec<(String, &Tree)> = vec![(String::new(), tree)];

    while let Some((key, node)) = stack.pop() {
        match node {
            empty if empty.is_empty_container() => {
                out.insert(key, empty.clone());
            }
            Tree::Seq(items) => {
                for (i, item) in items.iter().enumerate().rev() {
                    stack.push((join_key(&key, &i.to_string()), item));
                }
            }
            Tree::Record(entries) => {
                for (k, v) in entries.iter().rev() {
                    stack.push((join_key(&key, k), v));
                }
            }
            leaf => {
                out.insert(key, leaf.clone());
            }
        }
    }

    if sort_keys {
        out.sort_keys();
    }
    out
}

/// Rebuilds a nested tree from a flat map.
///
/// The empty key addresses the root itself. An empty map yields an empty record. A key with
/// more than `max_depth` segments fails the whole call with [`NestError::DepthExceeded`].
pub fn unflatten(flat: &FlatMap, config: &UnflattenConfig) -> Result<Tree> {
    let mut root: Option<Tree> = None;
    let mut slots_left = config.max_slots;
    for (key, value) in flat {
        let Some(segments) = plan_segments(key, config)? else {
            continue;
        };
        let cost = growth_cost(root.as_ref(), &segments);
        if cost > slots_left {
            refuse_growth(key, config)?;
            continue;
        }
        slots_left -= cost;
        write_path(&mut root, &segments, value.clone());
    }
    Ok(root.unwrap_or_else(Tree::empty_record))
}

/// Splits `key` and applies the segment policy. `None` means the write is skipped.
fn plan_segments<'k>(key: &'k str, config: &UnflattenConfig) -> Result<Option<Vec<&'k str>>> {
    if key.is_empty() {
        return Ok(Some(Vec::new()));
    }
    let mut segments = Vec::new();
    for (depth, segment) in key.split(PATH_SEPARATOR).enumerate() {
        if depth >= config.max_depth {
            return Err(NestError::DepthExceeded {
                limit: config.max_depth,
            });
        }
        let refused = config.is_denied(segment)
            || parse_index(segment).is_some_and(|idx| idx > config.max_index);
        if !refused {
            segments.push(segment);
            continue;
        }
        match config.segment_policy {
            SegmentPolicy::Skip => {
                tracing::warn!(key, segment, "refused segment, skipping write");
                return Ok(None);
            }
            SegmentPolicy::Redirect => {
                tracing::warn!(key, segment, "refused segment, writing through parent");
            }
            SegmentPolicy::Reject => {
                return Err(NestError::PathInjectionRejected {
                    key: key.to_owned(),
                    segment: segment.to_owned(),
                });
            }
        }
    }
    // A key made only of refused segments must not overwrite the root.
    if segments.is_empty() {
        return Ok(None);
    }
    Ok(Some(segments))
}

/// Number of new sequence slots writing `segments` into `root` would materialize.
fn growth_cost(root: Option<&Tree>, segments: &[&str]) -> usize {
    let mut cost = 0_usize;
    let mut cur = root;
    for segment in segments {
        let idx = parse_index(segment);
        cur = match (cur, idx) {
            (Some(Tree::Seq(items)), Some(idx)) => {
                cost = cost.saturating_add(idx.saturating_add(1).saturating_sub(items.len()));
                items.get(idx)
            }
            (Some(Tree::Record(entries)), _) => entries.get(*segment),
            // A fresh sequence, or a scalar replaced by one.
            (_, Some(idx)) => {
                cost = cost.saturating_add(idx.saturating_add(1));
                None
            }
            (_, None) => None,
        };
    }
    cost
}

/// Applies the segment policy to a write that would exceed the slot budget.
fn refuse_growth(key: &str, config: &UnflattenConfig) -> Result<()> {
    if config.segment_policy == SegmentPolicy::Reject {
        return Err(NestError::SlotBudgetExceeded {
            key: key.to_owned(),
            limit: config.max_slots,
        });
    }
    tracing::warn!(key, limit = config.max_slots, "slot budget exhausted, skipping write");
    Ok(())
}

fn write_path(root: &mut Option<Tree>, segments: &[&str], value: Tree) {
    let Some((last, parents)) = segments.split_last() else {
        *root = Some(value);
        return;
    };
    let mut cur = root.get_or_insert(Tree::Null);
    for segment in parents {
        match slot_in(cur, segment) {
            Some(next) => cur = next,
            None => return,
        }
    }
    if let Some(slot) = slot_in(cur, last) {
        *slot = value;
    }
}

/// Returns the slot addressed by `segment` inside `container`, creating it if needed.
fn slot_in<'t>(container: &'t mut Tree, segment: &str) -> Option<&'t mut Tree> {
    coerce_container(container, segment);
    match container {
        Tree::Seq(items) => {
            let idx = parse_index(segment)?;
            if idx >= items.len() {
                items.resize(idx + 1, Tree::Null);
            }
            items.get_mut(idx)
        }
        Tree::Record(entries) => Some(entries.entry(segment.to_owned()).or_insert(Tree::Null)),
        _ => None,
    }
}

/// Makes `slot` a container that `segment` can index into.
fn coerce_container(slot: &mut Tree, segment: &str) {
    match slot {
        Tree::Seq(items) if parse_index(segment).is_none() => {
            let items = std::mem::take(items);
            *slot = Tree::Record(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), item))
                    .collect(),
            );
        }
        Tree::Seq(_) | Tree::Record(_) => {}
        other => {
            if !matches!(other, Tree::Null) {
                tracing::debug!(segment, "replacing scalar slot with a container");
            }
            *other = if parse_index(segment).is_some() {
                Tree::Seq(Vec::new())
            } else {
                Tree::empty_record()
            };
        }
    }
}
