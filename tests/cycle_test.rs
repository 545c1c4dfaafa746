#![allow(missing_docs)]

use nestflat::{
    Compound, NestError, NestFlat, Opaque, Tree, Value, WalkConfig,
    cycle,
    format::decompose_token,
    graph::PathTracker,
    visitor::{Key, Replaced, Replacer, walk},
};
use serde_json::json;

// --- HELPERS ---

fn chain(len: usize) -> Value {
    let root = Value::record();
    let mut cur = root.clone();
    for _ in 0..len {
        let next = Value::record();
        cur.insert("n", next.clone());
        cur = next;
    }
    root
}

/// A replacer that never substitutes, i.e. a naive serializer.
struct KeepEverything;

impl Replacer for KeepEverything {
    fn replace(&mut self, _: Compound<'_>, _: Key<'_>, _: &Value) -> nestflat::Result<Replaced> {
        Ok(Replaced::Keep)
    }
}

// --- TESTS ---

/// Self references collapse to the root token.
#[test]
fn test_self_reference_becomes_root_token() -> nestflat::Result<()> {
    let a = Value::from(json!({ "b": 1 }));
    a.insert("c", a.clone());
    a.insert("d", a.get("c").unwrap_or_default());

    assert_eq!(NestFlat::to_text(&a)?, r#"{"b":1,"c":"~","d":"~"}"#);
    assert_eq!(
        NestFlat::make_cycle_free(&a)?,
        Tree::from(json!({ "b": 1, "c": "~", "d": "~" }))
    );
    Ok(())
}

/// A self-referencing sequence.
#[test]
fn test_self_reference_in_sequence() -> nestflat::Result<()> {
    let s = Value::from(json!([1]));
    s.push(s.clone());
    assert_eq!(NestFlat::to_text(&s)?, r#"[1,"~"]"#);
    Ok(())
}

/// A shared (non-cyclic) sub-tree is kept at its first path and referenced afterwards.
#[test]
fn test_shared_reference_points_at_first_visit() -> nestflat::Result<()> {
    let a = Value::from(json!({ "b": { "c": "str", "d": "str2" }, "e": "str" }));
    a.insert("l", a.get("b").unwrap_or_default());

    let tree = NestFlat::make_cycle_free(&a)?;
    assert_eq!(
        tree,
        Tree::from(json!({ "b": { "c": "str", "d": "str2" }, "e": "str", "l": "~b" }))
    );
    Ok(())
}

/// Tokens record the full first-visitation path, including sequence indices.
#[test]
fn test_token_through_sequence_index() -> nestflat::Result<()> {
    let shared = Value::from(json!({ "x": 1 }));
    let root = Value::from(json!({ "k": ["first"] }));
    if let Some(k) = root.get("k") {
        k.push(shared.clone());
    }
    root.insert("m", shared);

    let tree = NestFlat::make_cycle_free(&root)?;
    assert_eq!(tree.get("m").and_then(Tree::as_str), Some("~k~1"));
    Ok(())
}

/// The tracker must forget finished siblings when the walk backtracks.
#[test]
fn test_backtracking_unwinds_path_segments() -> nestflat::Result<()> {
    let shared = Value::from(json!({ "v": true }));
    let root = Value::from(json!({ "a": { "b": {} } }));
    let d = Value::record();
    d.insert("e", shared.clone());
    root.insert("d", d);
    root.insert("f", shared);

    let tree = NestFlat::make_cycle_free(&root)?;
    assert_eq!(
        tree,
        Tree::from(json!({ "a": { "b": {} }, "d": { "e": { "v": true } }, "f": "~d~e" }))
    );
    Ok(())
}

/// Deep back-references point at ancestors several levels up.
#[test]
fn test_reference_to_outer_ancestor() -> nestflat::Result<()> {
    let root = Value::from(json!({ "a": { "b": { "c": {} } } }));
    let a = root.get("a").unwrap_or_default();
    let c = a.get("b").and_then(|b| b.get("c")).unwrap_or_default();
    c.insert("up", a);
    c.insert("top", root.clone());

    assert_eq!(
        NestFlat::to_text(&root)?,
        r#"{"a":{"b":{"c":{"up":"~a","top":"~"}}}}"#
    );
    Ok(())
}

/// Literal sentinels in keys are escaped, and the token still decomposes.
#[test]
fn test_sentinel_in_key_is_escaped() -> nestflat::Result<()> {
    let inner = Value::from(json!({ "q": 0 }));
    let root = Value::record();
    root.insert("x~y", inner.clone());
    root.insert("z", inner);

    let tree = NestFlat::make_cycle_free(&root)?;
    let token = tree.get("z").and_then(Tree::as_str).unwrap_or_default();
    assert_eq!(token, "~x\\x7ey");
    assert_eq!(decompose_token(token), Some(vec!["x~y".to_string()]));
    Ok(())
}

/// Opaque values pass through the walk but have no text form.
#[test]
fn test_opaque_value_is_unserializable() -> nestflat::Result<()> {
    let handle = Opaque::new(42_u8);
    let root = Value::record();
    root.insert("h", Value::from(handle.clone()));

    let tree = NestFlat::make_cycle_free(&root)?;
    assert_eq!(tree.get("h"), Some(&Tree::Opaque(handle.clone())));
    assert_eq!(handle.downcast_ref::<u8>(), Some(&42));

    let err = NestFlat::to_text(&root).err();
    assert!(matches!(err, Some(NestError::UnserializableValue(_))));
    Ok(())
}

/// The object form contains only plain data.
#[test]
fn test_object_form_round_trips_text() -> nestflat::Result<()> {
    let a = Value::from(json!({ "b": 1, "c": { "d": [true, null] } }));
    a.insert("e", a.clone());
    assert_eq!(
        NestFlat::to_object_form(&a)?,
        Tree::from(json!({ "b": 1, "c": { "d": [true, null] }, "e": "~" }))
    );
    Ok(())
}

/// The depth guard fails fast instead of exhausting the stack.
#[test]
fn test_depth_guard() {
    let deep = chain(150);
    let err = NestFlat::make_cycle_free(&deep).err();
    assert!(matches!(err, Some(NestError::DepthExceeded { limit: 100 })));

    let relaxed = WalkConfig { max_depth: 200 };
    assert!(cycle::make_cycle_free(&deep, relaxed).is_ok());
    // Deeper than the JSON parser accepts.
    let err = cycle::to_object_form(&deep, relaxed).err();
    assert!(matches!(err, Some(NestError::UnserializableValue(_))));
}

/// Without a tracker the walk follows the cycle until the guard trips.
#[test]
fn test_naive_replacer_is_stopped_by_guard() {
    let a = Value::record();
    a.insert("me", a.clone());
    let err = walk(&a, &mut KeepEverything, WalkConfig::default()).err();
    assert!(matches!(err, Some(NestError::DepthExceeded { .. })));
}

/// Tracker bookkeeping when driven by hand.
#[test]
fn test_tracker_state() -> nestflat::Result<()> {
    let root = Value::from(json!({ "a": {}, "b": {} }));
    let a = root.get("a").unwrap_or_default();
    let b = root.get("b").unwrap_or_default();
    let (Some(root_c), Some(a_c), Some(b_c)) = (root.as_compound(), a.as_compound(), b.as_compound())
    else {
        unreachable!("all three are records");
    };

    let mut tracker = PathTracker::new(&root);
    assert_eq!(tracker.replace(root_c, Key::Name("a"), &a)?, Replaced::Keep);
    assert_eq!(tracker.ancestors(), [root_c.id(), a_c.id()]);
    assert_eq!(tracker.segments(), ["a"]);

    // Sibling: the holder switches back to the root.
    assert_eq!(tracker.replace(root_c, Key::Name("b"), &b)?, Replaced::Keep);
    assert_eq!(tracker.ancestors(), [root_c.id(), b_c.id()]);
    assert_eq!(tracker.segments(), ["b"]);

    // Cross reference from b to a.
    assert_eq!(
        tracker.replace(b_c, Key::Name("x"), &a)?,
        Replaced::Substitute("~a".into())
    );
    assert_eq!(tracker.registry().len(), 3);

    // A holder that was never opened is an invariant violation.
    let stranger = Value::record();
    let Some(stranger_c) = stranger.as_compound() else {
        unreachable!("record");
    };
    let err = tracker.note_current(stranger_c.id()).err();
    assert!(matches!(err, Some(NestError::Internal(_))));
    Ok(())
}

/// Every call starts from fresh state.
#[test]
fn test_independent_calls() -> nestflat::Result<()> {
    let shared = Value::from(json!({ "x": 1 }));
    let first = Value::record();
    first.insert("p", shared.clone());
    let second = Value::record();
    second.insert("q", shared);

    assert_eq!(NestFlat::to_text(&first)?, r#"{"p":{"x":1}}"#);
    assert_eq!(NestFlat::to_text(&second)?, r#"{"q":{"x":1}}"#);
    Ok(())
}
