//! The owned, acyclic nested tree.
//!
//! A [`Tree`] is what the cycle-free walk produces and what flattening consumes. Nothing in a
//! tree is shared: every container is owned by exactly one parent.

use crate::value::Opaque;
use indexmap::IndexMap;
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

/// A cycle-free nested value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Tree {
    /// The null scalar.
    #[default]
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar.
    Number(serde_json::Number),
    /// A string scalar. Reference tokens are strings too.
    String(String),
    /// A pass-through non-plain-data leaf.
    Opaque(Opaque),
    /// An owned sequence.
    Seq(Vec<Tree>),
    /// An owned record, in insertion order.
    Record(IndexMap<String, Tree>),
}

impl Tree {
    /// A fresh empty record.
    pub fn empty_record() -> Self {
        Self::Record(IndexMap::new())
    }

    /// True for `Seq` and `Record`.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Seq(_) | Self::Record(_))
    }

    /// True for an empty `Seq` or an empty `Record`, the flat-map sentinels.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Self::Seq(items) => items.is_empty(),
            Self::Record(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// Record entry lookup.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        match self {
            Self::Record(entries) => entries.get(key),
            _ => None,
        }
    }

    /// The string payload, if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Opaque(o) => Err(S::Error::custom(format!(
                "opaque value of type `{}` has no text form",
                o.type_name()
            ))),
            Self::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Record(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl From<serde_json::Value> for Tree {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match json {
            J::Null => Self::Null,
            J::Bool(b) => Self::Bool(b),
            J::Number(n) => Self::Number(n),
            J::String(s) => Self::String(s),
            J::Array(items) => Self::Seq(items.into_iter().map(Tree::from).collect()),
            J::Object(entries) => {
                Self::Record(entries.into_iter().map(|(k, v)| (k, Tree::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Tree {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Tree {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Tree {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for Tree {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
