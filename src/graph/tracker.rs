use super::id::CompoundId;
use crate::error::{NestError, Result};
use crate::format::path_token;
use crate::value::{Compound, Value};
use crate::visitor::{Key, Replaced, Replacer};
use indexmap::IndexMap;

/// Every compound opened during one walk, with the token of its first visitation.
///
/// Append-only. Insertion order is visitation order.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    tokens: IndexMap<CompoundId, String>,
}

impl VisitedRegistry {
    /// Returns the token recorded for `id`, if it was visited before.
    pub fn token_of(&self, id: CompoundId) -> Option<&str> {
        self.tokens.get(&id).map(String::as_str)
    }

    /// Records the first visitation of `id`. An existing entry is left untouched.
    pub fn register(&mut self, id: CompoundId, token: String) {
        self.tokens.entry(id).or_insert(token);
    }

    /// Number of distinct compounds visited.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if nothing has been visited.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates `(id, token)` pairs in visitation order.
    pub fn iter(&self) -> impl Iterator<Item = (CompoundId, &str)> {
        self.tokens.iter().map(|(id, t)| (*id, t.as_str()))
    }
}

/// The outcome of [`PathTracker::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// First visitation; the compound is now open on the ancestor stack.
    Fresh,
    /// Visited before, anywhere in the walk. Carries the token of the first visitation.
    Seen(String),
}

/// Traversal state for one cycle-free walk.
///
/// Tells "on the current ancestor chain" apart from "visited previously elsewhere". The driver
/// only reports the holder of each entry, so when the holder changes the tracker locates it on
/// the ancestor stack and truncates everything opened below it. That turns "current parent is
/// now X" into "backtracked to X".
///
/// `segments[i]` is the key under which `ancestors[i + 1]` was entered, so
/// `segments.len() == ancestors.len() - 1` whenever the root is a compound.
#[derive(Debug, Default)]
pub struct PathTracker {
    ancestors: Vec<CompoundId>,
    segments: Vec<String>,
    registry: VisitedRegistry,
    last: Option<CompoundId>,
}

impl PathTracker {
    /// Creates a tracker for a walk starting at `root`.
    ///
    /// A compound root is registered under the bare sentinel token.
    pub fn new(root: &Value) -> Self {
        let mut tracker = Self::default();
        if let Some(compound) = root.as_compound() {
            let id = compound.id();
            tracker.registry.register(id, path_token::<&str>(&[]));
            tracker.ancestors.push(id);
            tracker.last = Some(id);
        }
        tracker
    }

    /// Opens `container` below the current ancestor, entered under `segment`.
    pub fn enter(&mut self, container: CompoundId, segment: String) {
        self.ancestors.push(container);
        self.segments.push(segment);
        self.last = Some(container);
    }

    /// Signals that `holder` is the parent of the entry being visited.
    ///
    /// If it differs from the last noted holder, the ancestor and segment stacks are unwound to
    /// just below it. Fails if `holder` is not an open ancestor.
    pub fn note_current(&mut self, holder: CompoundId) -> Result<()> {
        if self.last == Some(holder) {
            return Ok(());
        }
        let pos = self
            .ancestors
            .iter()
            .rposition(|id| *id == holder)
            .ok_or_else(|| {
                NestError::Internal(format!("holder {holder:?} is not on the ancestor stack"))
            })?;
        self.ancestors.truncate(pos + 1);
        self.segments.truncate(pos);
        self.last = Some(holder);
        Ok(())
    }

    /// Resolves a compound reached under `key` of the current holder.
    ///
    /// Any earlier visitation counts, not only an ancestor: a cross reference is substituted
    /// just like a true cycle.
    pub fn resolve(&mut self, key: Key<'_>, value: CompoundId) -> Resolution {
        if let Some(token) = self.registry.token_of(value) {
            return Resolution::Seen(token.to_owned());
        }
        let segment = key.to_string();
        let token = {
            let mut path: Vec<&str> = self.segments.iter().map(String::as_str).collect();
            path.push(&segment);
            path_token(path.as_slice())
        };
        self.registry.register(value, token);
        self.enter(value, segment);
        Resolution::Fresh
    }

    /// The currently open compounds, root first.
    pub fn ancestors(&self) -> &[CompoundId] {
        &self.ancestors
    }

    /// The keys leading from the root to the innermost open compound.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// All compounds visited so far.
    pub fn registry(&self) -> &VisitedRegistry {
        &self.registry
    }
}

impl Replacer for PathTracker {
    fn replace(&mut self, holder: Compound<'_>, key: Key<'_>, value: &Value) -> Result<Replaced> {
        self.note_current(holder.id())?;
        let Some(compound) = value.as_compound() else {
            return Ok(Replaced::Keep);
        };
        match self.resolve(key, compound.id()) {
            Resolution::Fresh => Ok(Replaced::Keep),
            Resolution::Seen(token) => {
                tracing::trace!(%key, %token, "substituting repeated compound");
                Ok(Replaced::Substitute(token))
            }
        }
    }
}
