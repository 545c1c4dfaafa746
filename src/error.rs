//! Centralized error handling for nestflat.
//!
//! Every fallible operation in the crate returns [`Result`]. The library never panics on
//! user data: traversal failures, refused unflatten writes and I/O problems all surface as a
//! [`NestError`] variant.
//!
//! ## Error Categories
//!
//! - **Unserializable values** ([`NestError::UnserializableValue`]): the text serializer met a
//!   value it cannot represent (an [`Opaque`](crate::Opaque) handle, a non-finite number).
//! - **Depth guard** ([`NestError::DepthExceeded`]): the input nests deeper than the configured
//!   maximum. Self-references are not nesting; they are substituted long before this trips.
//! - **Path injection** ([`NestError::PathInjectionRejected`]): only produced when
//!   [`SegmentPolicy::Reject`](crate::config::SegmentPolicy::Reject) is selected. The default
//!   policy skips the offending write and keeps going. The same holds for
//!   [`NestError::SlotBudgetExceeded`], raised when one call would materialize too many
//!   sequence slots.
//! - **I/O** ([`NestError::Io`]): exporting text to a file or writer failed.
//! - **Internal** ([`NestError::Internal`]): the path tracker saw a holder that is not on its
//!   ancestor stack. This indicates a bug in the traversal driver.
//!
//! ## Usage
//!
//! ```rust
//! use nestflat::{NestError, NestFlat, Value};
//! use serde_json::json;
//!
//! let value = Value::from(json!({ "a": { "b": 1 } }));
//! match NestFlat::to_text(&value) {
//!     Ok(text) => assert_eq!(text, r#"{"a":{"b":1}}"#),
//!     Err(NestError::DepthExceeded { limit }) => eprintln!("nested deeper than {limit}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```

use std::io;
use std::sync::Arc;

/// A specialized `Result` type for nestflat operations.
pub type Result<T> = std::result::Result<T, NestError>;

/// The master error enum covering all failure domains in nestflat.
///
/// This type is `Clone`; I/O errors are wrapped in `Arc` to make cloning cheap.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NestError {
    /// The underlying text serializer cannot represent a value.
    ///
    /// The string carries the serializer's message, e.g. the type label of the opaque handle.
    #[error("Unserializable value: {0}")]
    UnserializableValue(String),

    /// The traversal guard tripped before the walk reached a leaf.
    #[error("Nesting depth exceeded the limit of {limit}")]
    DepthExceeded {
        /// The configured maximum depth.
        limit: usize,
    },

    /// An unflatten key segment would have written through a denied slot.
    #[error("Path injection rejected: segment `{segment}` in key `{key}`")]
    PathInjectionRejected {
        /// The full flat key that carried the segment.
        key: String,
        /// The offending segment.
        segment: String,
    },

    /// An unflatten key would have grown sequences past the per-call slot budget.
    #[error("Slot budget of {limit} exceeded by key `{key}`")]
    SlotBudgetExceeded {
        /// The full flat key whose write was refused.
        key: String,
        /// The configured slot budget.
        limit: usize,
    },

    /// Low-level I/O failure while exporting text.
    #[error("I/O Error: {0}")]
    Io(Arc<io::Error>),

    /// A traversal invariant was violated. Please report it with a reproduction case.
    #[error("Internal Logic Error: {0}")]
    Internal(String),
}

impl From<io::Error> for NestError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for NestError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Self::Io(Arc::new(io::Error::from(err)));
        }
        Self::UnserializableValue(err.to_string())
    }
}
