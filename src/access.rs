//! Path lookup on a live value graph.
//!
//! Lookups walk own entries only and stop with `None` at the first missing segment. When no
//! root is given, the host root installed with [`set_global_root`] is used. Values are
//! `Rc`-based, so the host root is per thread.

use crate::format::PATH_SEPARATOR;
use crate::value::Value;
use std::cell::RefCell;

thread_local! {
    static GLOBAL_ROOT: RefCell<Option<Value>> = const { RefCell::new(None) };
}

/// Installs the host root used by [`access_by_path`] when no root is passed.
///
/// Returns the previously installed root.
pub fn set_global_root(root: Value) -> Option<Value> {
    GLOBAL_ROOT.with(|slot| slot.borrow_mut().replace(root))
}

/// Removes the host root and returns it.
pub fn clear_global_root() -> Option<Value> {
    GLOBAL_ROOT.with(|slot| slot.borrow_mut().take())
}

/// A lookup path: a dotted string or pre-split segments.
#[derive(Debug, Clone, Copy)]
pub enum KeyPath<'a> {
    /// `"a.b.0"`
    Dotted(&'a str),
    /// `["a", "b", "0"]`
    Segments(&'a [&'a str]),
}

impl<'a> From<&'a str> for KeyPath<'a> {
    fn from(path: &'a str) -> Self {
        Self::Dotted(path)
    }
}

impl<'a> From<&'a [&'a str]> for KeyPath<'a> {
    fn from(segments: &'a [&'a str]) -> Self {
        Self::Segments(segments)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for KeyPath<'a> {
    fn from(segments: &'a [&'a str; N]) -> Self {
        Self::Segments(segments)
    }
}

/// Walks `root` (or the host root) one segment at a time.
///
/// Returns `None` as soon as a segment is absent, or when there is no root at all.
pub fn access_by_path<'a>(path: impl Into<KeyPath<'a>>, root: Option<&Value>) -> Option<Value> {
    let start = match root {
        Some(root) => root.clone(),
        None => GLOBAL_ROOT.with(|slot| slot.borrow().clone())?,
    };
    match path.into() {
        KeyPath::Dotted(dotted) => descend(start, dotted.split(PATH_SEPARATOR)),
        KeyPath::Segments(segments) => descend(start, segments.iter().copied()),
    }
}

fn descend<'s>(start: Value, mut segments: impl Iterator<Item = &'s str>) -> Option<Value> {
    segments.try_fold(start, |cur, segment| cur.get(segment))
}
