//! Integration tests for vtable configuration entities
//!
//! Exercises decoding and encoding of realistic vtable lists.

use binconf_config::{
    Address, ConfigError, DuplicatePolicy, JsonEntity, Vtable, VtableContainer, VtableItem,
};
use serde_json::{json, Value};

fn addr(v: u64) -> Address {
    Address::new(v)
}

fn item_addresses(v: &Vtable) -> Vec<String> {
    v.items().iter().map(|i| i.address().to_string()).collect()
}

#[test]
fn test_end_to_end_example() {
    let input = json!({
        "name": "A::vtable",
        "address": "0x1000",
        "items": [
            { "address": "0x1000", "targetAddress": "0x2000", "targetName": "A::f" },
            { "address": "0x1008", "targetAddress": "0x2010" }
        ]
    });

    let vtable = Vtable::from_json_value(&input).unwrap();
    assert_eq!(vtable.name(), "A::vtable");
    assert_eq!(vtable.address(), addr(0x1000));
    assert_eq!(vtable.items().len(), 2);

    let second = vtable.items().iter().nth(1).unwrap();
    assert_eq!(second.target_function_address(), addr(0x2010));
    assert_eq!(second.target_function_name(), "");

    assert_eq!(vtable.to_json_value(), input);
}

#[test]
fn test_dense_container_roundtrip() {
    let input = json!([
        {
            "name": "Base::vtable",
            "address": "0x4000",
            "items": [
                { "address": "0x4000", "targetAddress": "0x1100", "targetName": "Base::~Base" },
                { "address": "0x4008", "targetAddress": "0x1180", "targetName": "Base::run" }
            ]
        },
        {
            "name": "Derived::vtable",
            "address": "0x4020",
            "items": [
                { "address": "0x4020", "targetAddress": "0x1200", "targetName": "Derived::~Derived" },
                { "address": "0x4028", "targetAddress": "0x1280", "targetName": "Derived::run" }
            ]
        }
    ]);

    let container = VtableContainer::from_json_value(&input).unwrap();
    assert_eq!(container.len(), 2);
    assert_eq!(container.to_json_value(), input);
}

#[test]
fn test_sparse_values_survive_roundtrip() {
    let mut vtable = Vtable::new(addr(0x5000));
    vtable.add_item(VtableItem::new(addr(0x5000)));

    let mut named = VtableItem::new(addr(0x5008));
    named.set_target_function_name("orphan");
    vtable.add_item(named);

    let encoded = vtable.to_json_value();
    assert_eq!(
        encoded,
        json!({
            "address": "0x5000",
            "items": [
                { "address": "0x5000" },
                { "address": "0x5008", "targetName": "orphan" }
            ]
        })
    );

    let decoded = Vtable::from_json_value(&encoded).unwrap();
    assert_eq!(decoded.address(), vtable.address());
    assert_eq!(decoded.name(), vtable.name());
    assert_eq!(decoded.items().len(), vtable.items().len());

    for (got, want) in decoded.items().iter().zip(vtable.items()) {
        assert_eq!(got.address(), want.address());
        assert_eq!(got.target_function_address(), want.target_function_address());
        assert_eq!(got.target_function_name(), want.target_function_name());
    }
}

#[test]
fn test_items_are_sorted_after_decode() {
    let vtable = Vtable::from_json_value(&json!({
        "address": "0x10",
        "items": [
            { "address": "0x20" },
            { "address": "0x10" },
            { "address": "0x30" }
        ]
    }))
    .unwrap();

    assert_eq!(item_addresses(&vtable), vec!["0x10", "0x20", "0x30"]);

    let encoded = vtable.to_json_value();
    let order: Vec<&str> = encoded["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["address"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["0x10", "0x20", "0x30"]);
}

#[test]
fn test_container_is_sorted_after_decode() {
    let container = VtableContainer::from_json_value(&json!([
        { "address": "0x300" },
        { "address": "0x100" },
        { "address": "0x200" }
    ]))
    .unwrap();

    let order: Vec<Address> = container.ids().copied().collect();
    assert_eq!(order, vec![addr(0x100), addr(0x200), addr(0x300)]);
}

#[test]
fn test_duplicate_item_is_rejected_by_default() {
    let mut vtable = Vtable::new(addr(0x1000));
    let mut first = VtableItem::new(addr(0x1000));
    first.set_target_function_name("first");
    let mut second = VtableItem::new(addr(0x1000));
    second.set_target_function_name("second");

    assert!(vtable.add_item(first));
    assert!(!vtable.add_item(second));

    assert_eq!(vtable.items().len(), 1);
    assert_eq!(
        vtable.item(addr(0x1000)).unwrap().target_function_name(),
        "first"
    );
}

#[test]
fn test_duplicate_item_replaced_when_configured() {
    let mut vtable = Vtable::new(addr(0x1000));
    vtable.items_mut().set_policy(DuplicatePolicy::Replace);

    let mut first = VtableItem::new(addr(0x1000));
    first.set_target_function_name("first");
    let mut second = VtableItem::new(addr(0x1000));
    second.set_target_function_name("second");

    vtable.add_item(first);
    vtable.add_item(second);

    assert_eq!(vtable.items().len(), 1);
    assert_eq!(
        vtable.item(addr(0x1000)).unwrap().target_function_name(),
        "second"
    );
}

#[test]
fn test_duplicate_items_in_json_keep_first() {
    let vtable = Vtable::from_json_value(&json!({
        "items": [
            { "address": "0x8", "targetName": "kept" },
            { "address": "0x8", "targetName": "dropped" }
        ]
    }))
    .unwrap();

    assert_eq!(vtable.items().len(), 1);
    assert_eq!(vtable.item(addr(0x8)).unwrap().target_function_name(), "kept");
}

#[test]
fn test_duplicate_vtables_with_replace_policy() {
    let mut container = VtableContainer::with_policy(DuplicatePolicy::Replace);
    container
        .read_json_value(&json!([
            { "address": "0x40", "name": "old" },
            { "address": "0x40", "name": "new" }
        ]))
        .unwrap();

    assert_eq!(container.len(), 1);
    assert_eq!(container.find(&addr(0x40)).unwrap().name(), "new");
}

#[test]
fn test_malformed_root_rejection() {
    let err = Vtable::from_json_value(&json!("not an object")).unwrap_err();
    assert!(matches!(err, ConfigError::MalformedInput { .. }));

    let empty = Vtable::from_json_value(&json!({})).unwrap();
    assert!(!empty.address().is_defined());
    assert_eq!(empty.name(), "");
    assert!(empty.items().is_empty());
}

#[test]
fn test_mistyped_fields_fall_back_to_defaults() {
    let vtable = Vtable::from_json_value(&json!({
        "name": ["not", "a", "string"],
        "address": true,
        "items": "nope"
    }))
    .unwrap();

    assert!(!vtable.address().is_defined());
    assert_eq!(vtable.name(), "");
    assert!(vtable.items().is_empty());
    assert_eq!(vtable.to_json_value(), json!({}));
}

#[test]
fn test_identity_ordering() {
    let mut a = VtableItem::new(addr(0x10));
    a.set_target_function_name("a");
    let mut b = VtableItem::new(addr(0x10));
    b.set_target_function_address(addr(0x999));
    let c = VtableItem::new(addr(0x20));

    assert_eq!(a, b);
    assert!(a < c);
    assert!(b < c);

    let mut tables = vec![Vtable::new(addr(0x30)), Vtable::new(addr(0x10))];
    tables.sort();
    assert_eq!(tables[0].address(), addr(0x10));
}

#[test]
fn test_container_lookup_and_erase() {
    let mut container = VtableContainer::new();
    let mut v = Vtable::new(addr(0x100));
    v.set_name("A::vtable");
    assert!(container.insert(v));
    assert!(container.insert(Vtable::new(addr(0x200))));

    container.find_mut(&addr(0x200)).unwrap().set_name("B::vtable");
    assert_eq!(container.find(&addr(0x200)).unwrap().name(), "B::vtable");

    assert!(container.erase(&addr(0x100)).is_some());
    assert!(!container.contains(&addr(0x100)));
    assert_eq!(container.len(), 1);
}

#[test]
fn test_empty_container_encodes_as_empty_array() {
    assert_eq!(VtableContainer::new().to_json_value(), Value::Array(Vec::new()));
}

#[test]
fn test_container_policy_reaches_slots() {
    let input = json!([{
        "address": "0x10",
        "items": [
            { "address": "0x10", "targetName": "old" },
            { "address": "0x10", "targetName": "new" }
        ]
    }]);

    let mut replaced = VtableContainer::with_policy(DuplicatePolicy::Replace);
    replaced.read_json_value(&input).unwrap();
    let vtable = replaced.find(&addr(0x10)).unwrap();
    assert_eq!(vtable.items().len(), 1);
    assert_eq!(vtable.items().policy(), DuplicatePolicy::Replace);
    assert_eq!(vtable.item(addr(0x10)).unwrap().target_function_name(), "new");

    let kept = VtableContainer::from_json_value(&input).unwrap();
    let vtable = kept.find(&addr(0x10)).unwrap();
    assert_eq!(vtable.item(addr(0x10)).unwrap().target_function_name(), "old");
}

#[test]
fn test_vtable_decode_with_policy() {
    let input = json!({
        "items": [
            { "address": "0x8", "targetName": "first" },
            { "address": "0x8", "targetName": "second" }
        ]
    });

    let vtable = Vtable::from_json_value_with_policy(&input, DuplicatePolicy::Replace).unwrap();
    assert_eq!(vtable.item(addr(0x8)).unwrap().target_function_name(), "second");
}
