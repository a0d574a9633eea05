//! Tests for map and list emission.

use std::rc::Rc;

use amber_core::{List, Map, Real, Value};

use super::test_util::{render_value, render_value_weak, try_render_value};
use crate::error::SolidifyError;

#[test]
fn single_entry_map() {
    let map = Map::from_pairs([(Value::str("a"), Value::Nil)]);
    let expected = concat!(
        "    be_nested_map(1,\n",
        "    ( (struct bmapnode*) &(const bmapnode[]) {\n",
        "        { be_const_key(a, -1), be_const_nil() },\n",
        "    }))",
    );
    assert_eq!(render_value(&Value::Map(Rc::new(map)), None, None), expected);
}

#[test]
fn weak_mode_uses_weak_keys() {
    let map = Map::from_pairs([(Value::str("a"), Value::Nil)]);
    let expected = concat!(
        "    be_nested_map(1,\n",
        "    ( (struct bmapnode*) &(const bmapnode[]) {\n",
        "        { be_const_key_weak(a, -1), be_const_nil() },\n",
        "    }))",
    );
    assert_eq!(render_value_weak(&Value::Map(Rc::new(map)), None, None), expected);
}

#[test]
fn keys_and_values_are_encoded() {
    let map = Map::from_pairs([
        (Value::str("k_X"), Value::Int(1)),
        (Value::Int(7), Value::str("v?")),
    ]);
    let text = render_value(&Value::Map(Rc::new(map)), None, None);
    assert!(text.contains("be_const_key(k_X_, "));
    assert!(text.contains("be_const_key_int(7, "));
    assert!(text.contains("be_nested_str(v_X3F)"));
    assert!(text.contains("be_nested_map(2,"));
}

#[test]
fn every_entry_is_emitted_once() {
    let map = Map::from_pairs((0..12).map(|i| (Value::Int(i), Value::Int(i * 10))));
    let count = map.count();
    let text = render_value(&Value::Map(Rc::new(map)), None, None);
    assert_eq!(text.matches("be_const_key_int(").count(), count);
}

#[test]
fn chain_links_match_the_slot_layout() {
    let map = Map::from_pairs((0..12).map(|i| (Value::Int(i), Value::Nil)));
    let text = render_value(&Value::Map(Rc::new(map.clone())), None, None);
    for (_, slot) in map.iter() {
        let Value::Int(key) = &slot.key else {
            panic!("int keys only")
        };
        let next = slot.next.map_or(-1, |n| n as i64);
        assert!(
            text.contains(&format!("be_const_key_int({key}, {next})")),
            "missing entry for key {key} with link {next}"
        );
    }
}

#[test]
fn string_keys_flow_into_member_values() {
    let map = Map::from_pairs([(
        Value::str("read"),
        Value::NativeFunc { is_static: false },
    )]);
    let text = render_value(&Value::Map(Rc::new(map)), Some("file"), None);
    assert!(text.contains("be_const_key(read, -1), be_const_func(be_ntv_file_read)"));
}

#[test]
fn invalid_key_is_rejected() {
    let map = Map::from_pairs([(Value::Real(Real::Double(1.0)), Value::Nil)]);
    let err = try_render_value(&Value::Map(Rc::new(map)), false, None, None).unwrap_err();
    assert!(matches!(err, SolidifyError::UnsupportedKeyType("real")));
}

#[test]
fn list_in_source_order() {
    let list = List::from(vec![Value::Int(1), Value::str("s"), Value::Nil]);
    let expected = concat!(
        "    be_nested_list(3,\n",
        "    ( (struct bvalue*) &(const bvalue[]) {\n",
        "        be_const_int(1),\n",
        "        be_nested_str(s),\n",
        "        be_const_nil(),\n",
        "    }))",
    );
    assert_eq!(render_value(&Value::List(Rc::new(list)), None, None), expected);
}

#[test]
fn empty_list() {
    let list = List::new();
    let expected = concat!(
        "    be_nested_list(0,\n",
        "    ( (struct bvalue*) &(const bvalue[]) {\n",
        "    }))",
    );
    assert_eq!(render_value(&Value::List(Rc::new(list)), None, None), expected);
}

#[test]
fn list_elements_carry_an_empty_key() {
    let list = List::from(vec![Value::NativeFunc { is_static: false }]);
    let text = render_value(&Value::List(Rc::new(list)), Some("mod"), None);
    assert!(text.contains("be_const_func(be_ntv_mod_)"));
}
