#![allow(missing_docs)]

use nestflat::{FlatMap, NestFlat, Output, Query, Tree, Value, format::DELETED_MARKER, io::render_text};
use serde_json::json;

fn flat(entries: serde_json::Value) -> FlatMap {
    match entries {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        _ => FlatMap::new(),
    }
}

// --- FILTER ---

fn filter_input() -> Value {
    let a = Value::from(json!({
        "b": { "c": "str", "d": "str2" },
        "e": "str",
        "f": { "g": { "h": "str", "i": "str3" }, "j": "str4" },
        "k": ["str", "str2"]
    }));
    a.insert("l", a.get("b").unwrap_or_default());
    a
}

#[test]
fn test_filter_single_value_nested() -> nestflat::Result<()> {
    let out = NestFlat::filter_by_value(&filter_input(), "str", false)?;
    assert_eq!(
        out,
        Output::Nested(Tree::from(json!({
            "b": { "c": "str" },
            "e": "str",
            "f": { "g": { "h": "str" } },
            "k": ["str"]
        })))
    );
    Ok(())
}

#[test]
fn test_filter_single_value_flat() -> nestflat::Result<()> {
    let out = NestFlat::filter_by_value(&filter_input(), "str2", true)?;
    assert_eq!(out, Output::Flat(flat(json!({ "b.d": "str2", "k.1": "str2" }))));
    Ok(())
}

/// An empty container is a structure, not a value, so querying for one selects nothing.
#[test]
fn test_filter_never_selects_empty_containers() -> nestflat::Result<()> {
    let a = Value::from(json!({ "x": [], "y": {}, "z": { "w": [] } }));
    let by_seq = NestFlat::filter_by_value(&a, Tree::Seq(vec![]), true)?;
    assert_eq!(by_seq, Output::Flat(FlatMap::new()));

    let query = Query::Many(vec![Tree::empty_record(), Tree::Seq(vec![])]);
    assert!(!query.matches(&Tree::empty_record()));
    let by_any = NestFlat::filter_by_value(&a, query, true)?;
    assert_eq!(by_any, Output::Flat(FlatMap::new()));
    Ok(())
}

/// Several query values; sequence holes come back as null.
#[test]
fn test_filter_many_values() -> nestflat::Result<()> {
    let a = Value::from(json!({
        "b": { "c": "str", "d": 2 },
        "e": "str",
        "f": { "g": { "h": "str", "i": null }, "j": "str4" },
        "k": ["str", 2, 3, "str4", null]
    }));
    a.insert("l", a.get("b").unwrap_or_default());
    let query = Query::Many(vec![Tree::from(2_i64), Tree::from(3_i64), Tree::Null]);

    let flat_out = nestflat::ops::filter_by_value(&a, &query, true, &Default::default())?;
    assert_eq!(
        flat_out.into_flat(),
        Some(flat(json!({ "b.d": 2, "f.g.i": null, "k.1": 2, "k.2": 3, "k.4": null })))
    );

    let nested = NestFlat::filter_by_value(&a, query, false)?;
    assert_eq!(
        nested.into_nested(),
        Some(Tree::from(json!({
            "b": { "d": 2 },
            "f": { "g": { "i": null } },
            "k": [null, 2, 3, null, null]
        })))
    );
    Ok(())
}

/// Filtering a cyclic value, then exporting the flat result.
#[test]
fn test_filter_cyclic_then_export() -> nestflat::Result<()> {
    let a = Value::from(json!({ "b": 1, "c": { "d": 2, "e": 2 } }));
    a.insert("f", a.clone());

    let filtered = NestFlat::filter_by_value(&a, 2_i64, true)?.into_flat().unwrap_or_default();
    assert_eq!(render_text(&filtered, 2)?, "{\n  \"c.d\": 2,\n  \"c.e\": 2\n}");
    Ok(())
}

// --- EQUALITY ---

fn key_sample(leaf: &str, reordered: bool) -> Value {
    let inner = if reordered {
        json!({ "keyE": ["value3", "value4"], "keyD": "value2", "keyB": { "keyC": leaf } })
    } else {
        json!({ "keyB": { "keyC": leaf }, "keyD": "value2", "keyE": ["value3", "value4"] })
    };
    Value::from(json!({ "keyA": inner }))
}

#[test]
fn test_equal_despite_key_order_and_cycles() -> nestflat::Result<()> {
    let a = key_sample("value", false);
    a.insert("circular", a.clone());
    let b = key_sample("value", true);
    b.insert("circular", b.clone());

    assert!(NestFlat::are_equal(&a, &b)?);
    Ok(())
}

#[test]
fn test_not_equal_on_different_leaf() -> nestflat::Result<()> {
    let a = key_sample("value", false);
    let b = key_sample("DIFFERENT_VALUE", true);
    assert!(!NestFlat::are_equal(&a, &b)?);
    Ok(())
}

#[test]
fn test_equal_ignoring_paths() -> nestflat::Result<()> {
    let a = key_sample("value", false);
    let b = key_sample("DIFFERENT_VALUE", false);
    assert!(NestFlat::are_equal_ignoring(&a, &b, &["keyA.keyB.keyC"])?);
    assert!(NestFlat::are_equal_ignoring(&a, &b, &["keyA.keyB"])?);
    // A sibling with a common name prefix is not ignored.
    assert!(!NestFlat::are_equal_ignoring(&a, &b, &["keyA.key"])?);
    Ok(())
}

#[test]
fn test_equality_is_reflexive_for_cyclic_values() -> nestflat::Result<()> {
    let x = Value::from(json!({ "a": [1, { "b": null }] }));
    x.insert("me", x.clone());
    assert!(NestFlat::are_equal(&x, &x)?);
    Ok(())
}

/// Absence differs from any present value, including null and empty containers.
#[test]
fn test_missing_key_is_not_null() -> nestflat::Result<()> {
    let a = Value::from(json!({ "a": 1 }));
    assert!(!NestFlat::are_equal(&a, &Value::from(json!({ "a": 1, "b": null })))?);
    assert!(!NestFlat::are_equal(&a, &Value::from(json!({ "a": 1, "b": {} })))?);
    assert!(!NestFlat::are_equal(
        &Value::from(json!({ "b": [] })),
        &Value::from(json!({ "b": {} }))
    )?);
    Ok(())
}

// --- DIFF ---

#[test]
fn test_diff_sorted_flat() -> nestflat::Result<()> {
    let a = Value::from(json!({ "c": { "d": 2, "e": 1 }, "f": null, "b": 1 }));
    let b = Value::from(json!({ "b": 2, "f": "not null", "c": { "d": 2, "e": 2 } }));

    let diff = NestFlat::diff(&a, &b, true, true)?.into_flat().unwrap_or_default();
    assert!(diff.eq_ordered(&flat(json!({ "b": 2, "c.e": 2, "f": "not null" }))));
    Ok(())
}

/// Changed array elements show up per index.
#[test]
fn test_diff_arrays() -> nestflat::Result<()> {
    let a = Value::from(json!({ "a": [1], "b": [] }));
    let b = Value::from(json!({ "a": [2], "b": [] }));
    assert_eq!(
        NestFlat::diff(&a, &b, true, true)?,
        Output::Flat(flat(json!({ "a.0": 2 })))
    );
    Ok(())
}

#[test]
fn test_diff_of_same_value_is_empty_record() -> nestflat::Result<()> {
    let a = Value::from(json!({ "a": { "b": [1, 2, 3] } }));
    assert_eq!(
        NestFlat::diff(&a, &a, false, false)?,
        Output::Nested(Tree::empty_record())
    );
    Ok(())
}

/// Keys only on the left are marked deleted; additions carry the right value.
#[test]
fn test_diff_directionality() -> nestflat::Result<()> {
    let a = Value::from(json!({ "x": 1, "y": { "z": 2 }, "k": [1, 2] }));
    let b = Value::from(json!({ "x": 1, "w": true, "k": [1] }));

    let diff = NestFlat::diff(&a, &b, false, true)?.into_flat().unwrap_or_default();
    assert!(diff.eq_ordered(&flat(json!({
        "w": true,
        "y.z": DELETED_MARKER,
        "k.1": DELETED_MARKER
    }))));

    let nested = NestFlat::diff(&a, &b, true, false)?;
    assert_eq!(
        nested,
        Output::Nested(Tree::from(json!({
            "k": [null, DELETED_MARKER],
            "w": true,
            "y": { "z": DELETED_MARKER }
        })))
    );
    Ok(())
}
