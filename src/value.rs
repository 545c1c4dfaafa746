//! The input data model: a graph of values that may share or cycle.
//!
//! Scalars are copied by value. Compounds (sequences and records) live behind
//! `Rc<RefCell<..>>`, so cloning a compound [`Value`] aliases it. That is how callers build
//! shared sub-trees and self-references:
//!
//! ```rust
//! use nestflat::Value;
//!
//! let a = Value::record();
//! a.insert("b", Value::from(1));
//! a.insert("c", a.clone()); // a.c = a
//! assert!(a.get("c").is_some_and(|c| c.same_compound(&a)));
//! ```

use crate::graph::CompoundId;
use crate::tree::Tree;
use indexmap::IndexMap;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a sequence.
pub type SeqRef = Rc<RefCell<Vec<Value>>>;
/// Shared handle to a record. Entries keep insertion order.
pub type RecordRef = Rc<RefCell<IndexMap<String, Value>>>;

/// A node of the input graph.
#[derive(Clone, Default)]
pub enum Value {
    /// The null scalar.
    #[default]
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar.
    Number(serde_json::Number),
    /// A string scalar.
    String(String),
    /// A non-plain-data value carried through untouched.
    Opaque(Opaque),
    /// A sequence compound.
    Seq(SeqRef),
    /// A record compound.
    Record(RecordRef),
}

/// A borrowed view of the compound inside a [`Value`].
#[derive(Clone, Copy)]
pub enum Compound<'a> {
    /// A sequence.
    Seq(&'a SeqRef),
    /// A record.
    Record(&'a RecordRef),
}

impl Compound<'_> {
    /// Identity of the underlying allocation.
    pub fn id(&self) -> CompoundId {
        match self {
            Self::Seq(rc) => CompoundId::of(rc),
            Self::Record(rc) => CompoundId::of(rc),
        }
    }
}

impl Value {
    /// Creates a fresh, empty sequence.
    pub fn seq() -> Self {
        Self::Seq(Rc::new(RefCell::new(Vec::new())))
    }

    /// Creates a fresh, empty record.
    pub fn record() -> Self {
        Self::Record(Rc::new(RefCell::new(IndexMap::new())))
    }

    /// Returns the compound view, or `None` for scalars.
    pub fn as_compound(&self) -> Option<Compound<'_>> {
        match self {
            Self::Seq(rc) => Some(Compound::Seq(rc)),
            Self::Record(rc) => Some(Compound::Record(rc)),
            _ => None,
        }
    }

    /// True if `self` and `other` are the very same compound allocation.
    pub fn same_compound(&self, other: &Value) -> bool {
        match (self.as_compound(), other.as_compound()) {
            (Some(a), Some(b)) => a.id() == b.id(),
            _ => false,
        }
    }

    /// Sets `key` on a record. Returns `false` (and does nothing) for any other value.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> bool {
        match self {
            Self::Record(rc) => {
                rc.borrow_mut().insert(key.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Appends to a sequence. Returns `false` (and does nothing) for any other value.
    pub fn push(&self, value: Value) -> bool {
        match self {
            Self::Seq(rc) => {
                rc.borrow_mut().push(value);
                true
            }
            _ => false,
        }
    }

    /// Own-entry lookup by key on a record, or by canonical index on a sequence.
    ///
    /// The returned value is a clone: compounds stay aliased, scalars are copied.
    pub fn get(&self, segment: &str) -> Option<Value> {
        match self {
            Self::Record(rc) => rc.borrow().get(segment).cloned(),
            Self::Seq(rc) => {
                let idx = crate::format::parse_index(segment)?;
                rc.borrow().get(idx).cloned()
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Number(n) => write!(f, "Number({n})"),
            Self::String(s) => write!(f, "String({s:?})"),
            Self::Opaque(o) => write!(f, "{o:?}"),
            // Compounds may be cyclic; print identity only.
            Self::Seq(rc) => write!(f, "Seq({:?}, len={})", CompoundId::of(rc), rc.borrow().len()),
            Self::Record(rc) => {
                write!(f, "Record({:?}, len={})", CompoundId::of(rc), rc.borrow().len())
            }
        }
    }
}

/// A value that is not plain data: a function, a handle, a date object.
///
/// It is passed through the cycle-free walk and flattening as an opaque leaf, compared by
/// identity, and refused by the text serializer.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    handle: Rc<dyn Any>,
}

impl Opaque {
    /// Wraps any `'static` value.
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            handle: Rc::new(value),
        }
    }

    /// The Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Downcasts the wrapped value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.handle, &other.handle)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.type_name)
    }
}

// --- CONVERSIONS ---

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n).into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Self::Opaque(o)
    }
}

/// Builds a fresh, unshared graph from JSON.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match json {
            J::Null => Self::Null,
            J::Bool(b) => Self::Bool(b),
            J::Number(n) => Self::Number(n),
            J::String(s) => Self::String(s),
            J::Array(items) => Self::Seq(Rc::new(RefCell::new(
                items.into_iter().map(Value::from).collect(),
            ))),
            J::Object(entries) => Self::Record(Rc::new(RefCell::new(
                entries.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ))),
        }
    }
}

/// Builds a fresh, unshared graph from an owned tree.
impl From<Tree> for Value {
    fn from(tree: Tree) -> Self {
        match tree {
            Tree::Null => Self::Null,
            Tree::Bool(b) => Self::Bool(b),
            Tree::Number(n) => Self::Number(n),
            Tree::String(s) => Self::String(s),
            Tree::Opaque(o) => Self::Opaque(o),
            Tree::Seq(items) => Self::Seq(Rc::new(RefCell::new(
                items.into_iter().map(Value::from).collect(),
            ))),
            Tree::Record(entries) => Self::Record(Rc::new(RefCell::new(
                entries.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ))),
        }
    }
}
