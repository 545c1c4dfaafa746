//! Per-call configuration.
//!
//! Config structs are small, `Clone`, and passed explicitly. Nothing is global.

/// Default depth guard for the cycle-free walk and for unflatten keys.
///
/// Kept below the 128-level nesting limit of the `serde_json` parser so that anything the
/// walk accepts can also be round-tripped through text.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default largest sequence index unflatten will materialize.
pub const DEFAULT_MAX_INDEX: usize = 1 << 16;

/// Default number of sequence slots one unflatten call may materialize in total.
pub const DEFAULT_MAX_SLOTS: usize = 1 << 20;

/// Segment names that could reach shared base-object state in dynamic hosts.
pub const DEFAULT_DENIED_SEGMENTS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// Configuration for the cycle-free walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkConfig {
    /// Maximum compound nesting depth. The root compound is depth 1.
    pub max_depth: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// What unflatten does with a key that contains a denied or out-of-range segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentPolicy {
    /// Skip the whole write and keep unflattening the remaining keys.
    #[default]
    Skip,
    /// Drop the offending segment and write through its parent instead. A write past the slot
    /// budget has no parent to fall back to and is skipped.
    Redirect,
    /// Abort with [`NestError::PathInjectionRejected`](crate::NestError::PathInjectionRejected)
    /// or [`NestError::SlotBudgetExceeded`](crate::NestError::SlotBudgetExceeded).
    Reject,
}

/// Configuration for unflatten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnflattenConfig {
    /// Segment names that are never written through.
    pub denied_segments: Vec<String>,
    /// Handling of denied segments, oversized indices and writes past the slot budget.
    pub segment_policy: SegmentPolicy,
    /// Largest index accepted for a sequence slot.
    pub max_index: usize,
    /// Total sequence slots (elements and gap fillers) one call may materialize.
    pub max_slots: usize,
    /// Maximum number of segments in one key. Longer keys fail with
    /// [`NestError::DepthExceeded`](crate::NestError::DepthExceeded).
    pub max_depth: usize,
}

impl UnflattenConfig {
    pub(crate) fn is_denied(&self, segment: &str) -> bool {
        self.denied_segments.iter().any(|d| d == segment)
    }
}

impl Default for UnflattenConfig {
    fn default() -> Self {
        Self {
            denied_segments: DEFAULT_DENIED_SEGMENTS.iter().map(|s| (*s).to_owned()).collect(),
            segment_policy: SegmentPolicy::default(),
            max_index: DEFAULT_MAX_INDEX,
            max_slots: DEFAULT_MAX_SLOTS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration shared by the derived operations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Cycle-free walk settings.
    pub walk: WalkConfig,
    /// Settings used when a result is re-nested.
    pub unflatten: UnflattenConfig,
}

/// Options for [`diff`](crate::ops::diff).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Sort the result by flat key.
    pub sort_keys: bool,
    /// Return the flat map instead of re-nesting it.
    pub flatten_result: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            sort_keys: false,
            flatten_result: true,
        }
    }
}
