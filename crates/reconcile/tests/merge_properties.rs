use httpgen_reconcile::{merge_bodies, try_merge_bodies};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::btree_map("[a-e]", inner, 0..4)
                .prop_map(|fields| Value::Object(fields.into_iter().collect())),
        ]
    })
}

fn object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-e]", value(), 0..5)
        .prop_map(|fields| Value::Object(fields.into_iter().collect::<Map<_, _>>()))
}

fn parse(text: &str) -> Value {
    serde_json::from_str(text).expect("merged body is JSON")
}

proptest! {
    #[test]
    fn proptest_merge_is_idempotent(fresh in object(), old in object()) {
        let fresh_text = fresh.to_string();
        let once = merge_bodies(&fresh_text, &old.to_string());
        let twice = merge_bodies(&fresh_text, &once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn proptest_merge_is_deterministic(fresh in object(), old in object()) {
        let a = merge_bodies(&fresh.to_string(), &old.to_string());
        let b = merge_bodies(&fresh.to_string(), &old.to_string());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn proptest_merged_keys_match_fresh_keys(fresh in object(), old in object()) {
        let merged = parse(&merge_bodies(&fresh.to_string(), &old.to_string()));
        let fresh_keys: Vec<_> = fresh.as_object().unwrap().keys().cloned().collect();
        let merged_keys: Vec<_> = merged.as_object().unwrap().keys().cloned().collect();
        prop_assert_eq!(fresh_keys, merged_keys);
    }

    #[test]
    fn proptest_new_fields_survive(fresh in object(), old in object()) {
        let merged = parse(&merge_bodies(&fresh.to_string(), &old.to_string()));
        let old_map = old.as_object().unwrap();
        for (key, fresh_value) in fresh.as_object().unwrap() {
            if !old_map.contains_key(key) {
                prop_assert_eq!(&merged[key], fresh_value);
            }
        }
    }

    #[test]
    fn proptest_old_scalars_take_precedence(
        fresh_value in leaf(),
        old_value in leaf(),
    ) {
        let fresh = json!({"k": fresh_value});
        let old = json!({"k": old_value.clone()});
        let merged = parse(&merge_bodies(&fresh.to_string(), &old.to_string()));
        prop_assert_eq!(&merged["k"], &old_value);
    }
}

#[test]
fn structure_precedence_drops_old_only_subfields() {
    let fresh = json!({"k": {"a": 0, "b": 0}});
    let old = json!({"k": {"a": 1, "b": 2, "c": 3}});
    let merged = parse(&merge_bodies(&fresh.to_string(), &old.to_string()));
    assert_eq!(merged, json!({"k": {"a": 1, "b": 2}}));
}

#[test]
fn malformed_inputs_fall_back() {
    let valid = "{\n  \"a\": 1\n}";
    assert_eq!(merge_bodies("not json", valid), valid);
    assert_eq!(merge_bodies(valid, "not json"), valid);
}

#[test]
fn order_note_scenario() {
    let fresh = r#"{"id":0,"note":"stringValue"}"#;
    let old = r#"{"id":0,"note":"hello","extra":"z"}"#;
    let merged = try_merge_bodies(fresh, old).unwrap();
    assert_eq!(merged, "{\n  \"id\": 0,\n  \"note\": \"hello\"\n}");
}

#[test]
fn stored_number_text_is_kept_verbatim() {
    let fresh = r#"{"amount":0,"ref":0,"rate":0}"#;
    let old = r#"{"amount":10.50,"ref":123456789012345678901234,"rate":1e-7}"#;
    assert_eq!(
        merge_bodies(fresh, old),
        "{\n  \"amount\": 10.50,\n  \"ref\": 123456789012345678901234,\n  \"rate\": 1e-7\n}"
    );
}

#[test]
fn deep_documents_merge_level_by_level() {
    let fresh = json!({
        "customer": {
            "name": "stringValue",
            "address": {"street": "stringValue", "geo": {"lat": 0, "lng": 0}}
        },
        "lines": [{"sku": "stringValue", "qty": 0}]
    });
    let old = json!({
        "customer": {
            "name": "Ada",
            "address": {"street": "Main 1", "geo": "unknown"},
            "vip": true
        },
        "lines": [{"sku": "A-1", "qty": 3}, {"sku": "B-2", "qty": 1}]
    });
    let merged = parse(&merge_bodies(&fresh.to_string(), &old.to_string()));
    assert_eq!(
        merged,
        json!({
            "customer": {
                "name": "Ada",
                "address": {"street": "Main 1", "geo": {"lat": 0, "lng": 0}}
            },
            "lines": [{"sku": "A-1", "qty": 3}, {"sku": "B-2", "qty": 1}]
        })
    );
}
