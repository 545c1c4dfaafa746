//! The generic depth-first walk and its per-entry callback.
//!
//! [`walk`] behaves like a recursive "visit value, recurse into children" serializer: it copies
//! a [`Value`] graph into an owned [`Tree`] in pre-order and, for every entry of every
//! compound, asks a [`Replacer`] whether to keep the entry or substitute a string for it. The
//! callback only learns the *current holder* of each entry. There are no enter or exit events,
//! so a replacer that needs ancestry has to infer it (see [`PathTracker`](crate::graph::PathTracker)).

use crate::config::WalkConfig;
use crate::error::{NestError, Result};
use crate::tree::Tree;
use crate::value::{Compound, Value};
use std::fmt;

/// The key under which an entry sits in its holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    /// Position in a sequence.
    Index(usize),
    /// Key in a record.
    Name(&'a str),
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// The replacer's verdict for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replaced {
    /// Emit the entry, recursing into it if it is a compound.
    Keep,
    /// Emit this string scalar instead and do not recurse.
    Substitute(String),
}

/// Per-entry callback of [`walk`].
pub trait Replacer {
    /// Called once per entry, in pre-order, with the compound that holds it.
    ///
    /// Never called for the root value itself.
    fn replace(&mut self, holder: Compound<'_>, key: Key<'_>, value: &Value) -> Result<Replaced>;
}

/// Counters reported by a finished walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Entries offered to the replacer.
    pub entries: usize,
    /// Entries replaced by a substitute string.
    pub substituted: usize,
}

/// Walks `root` depth-first and returns its tree copy.
///
/// Fails with [`NestError::DepthExceeded`] when a compound sits deeper than
/// `config.max_depth`. The root compound is depth 1.
pub fn walk<R: Replacer + ?Sized>(
    root: &Value,
    replacer: &mut R,
    config: WalkConfig,
) -> Result<(Tree, WalkStats)> {
    let mut walker = Walker {
        replacer,
        max_depth: config.max_depth,
        stats: WalkStats::default(),
    };
    let tree = walker.node(root, 1)?;
    Ok((tree, walker.stats))
}

struct Walker<'r, R: ?Sized> {
    replacer: &'r mut R,
    max_depth: usize,
    stats: WalkStats,
}

impl<R: Replacer + ?Sized> Walker<'_, R> {
    fn node(&mut self, value: &Value, depth: usize) -> Result<Tree> {
        let tree = match value {
            Value::Null => Tree::Null,
            Value::Bool(b) => Tree::Bool(*b),
            Value::Number(n) => Tree::Number(n.clone()),
            Value::String(s) => Tree::String(s.clone()),
            Value::Opaque(o) => Tree::Opaque(o.clone()),
            Value::Seq(rc) => {
                self.check_depth(depth)?;
                let items = rc.borrow();
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(self.entry(Compound::Seq(rc), Key::Index(i), item, depth)?);
                }
                Tree::Seq(out)
            }
            Value::Record(rc) => {
                self.check_depth(depth)?;
                let entries = rc.borrow();
                let mut out = indexmap::IndexMap::with_capacity(entries.len());
                for (k, v) in entries.iter() {
                    let child = self.entry(Compound::Record(rc), Key::Name(k), v, depth)?;
                    out.insert(k.clone(), child);
                }
                Tree::Record(out)
            }
        };
        Ok(tree)
    }

    fn entry(&mut self, holder: Compound<'_>, key: Key<'_>, value: &Value, depth: usize) -> Result<Tree> {
        self.stats.entries += 1;
        match self.replacer.replace(holder, key, value)? {
            Replaced::Keep => self.node(value, depth + 1),
            Replaced::Substitute(s) => {
                self.stats.substituted += 1;
                Ok(Tree::String(s))
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(NestError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}
