//! Tests for closure emission: banners, prefixes, borrowed methods,
//! inner classes.

use std::rc::Rc;

use amber_core::{Class, Closure, Map, Prototype, VA_STATICMETHOD, Value};

use super::test_util::render;

fn method_value(name: &str, class: &Rc<Class>) -> Value {
    let mut proto = Prototype::named(name);
    proto.parent_class = Some(Rc::downgrade(class));
    Value::closure(Rc::new(Closure::new(Rc::new(proto))))
}

#[test]
fn top_level_closure_with_prefix() {
    let clo = Rc::new(Closure::new(Rc::new(Prototype::named("f"))));
    let text = render(&Value::closure(clo), Some("demo"));
    assert!(text.contains("be_local_closure(demo_f,   /* name */\n"));
}

#[test]
fn closure_name_is_encoded() {
    let clo = Rc::new(Closure::new(Rc::new(Prototype::named("init?"))));
    let text = render(&Value::closure(clo), None);
    assert!(text.contains("be_local_closure(init_X3F,   /* name */\n"));
    // the banner keeps the raw name
    assert!(text.contains("** Solidified function: init?\n"));
}

#[test]
fn method_of_its_own_class_is_emitted_in_full() {
    let class = Class::build("A", 1, None, |weak| {
        let mut members = Map::new();
        let mut proto = Prototype::named("m");
        proto.parent_class = Some(weak.clone());
        members.insert(
            Value::str("m"),
            Value::closure(Rc::new(Closure::new(Rc::new(proto)))),
        );
        Some(members)
    });
    let text = render(&Value::Class(class), None);

    let fwd = text
        .find("extern const bclass be_class_A;")
        .expect("forward declaration present");
    let body = text
        .find("be_local_closure(class_A_m,")
        .expect("method body present");
    assert!(fwd < body, "forward declaration precedes the method");
}

#[test]
fn borrowed_method_gets_a_stub_only() {
    let owner = Class::named("B");
    let class = Class::build("A", 0, None, |_| {
        let mut members = Map::new();
        members.insert(Value::str("m"), method_value("m", &owner));
        Some(members)
    });
    let text = render(&Value::Class(class), None);

    assert!(text.contains("// Borrowed method 'm' from class 'B'\n"));
    assert!(text.contains("extern bclosure *class_B_m;\n"));
    assert!(!text.contains("be_local_closure(class_B_m,"));
    // the member map still points at the foreign symbol
    assert!(text.contains("be_const_closure(class_B_m_closure)"));
}

#[test]
fn live_upvalues_leave_a_marker_but_keep_the_body() {
    let mut clo = Closure::new(Rc::new(Prototype::named("f")));
    clo.nupvals = 2;
    let text = render(&Value::closure(Rc::new(clo)), None);
    assert!(text.contains("--> Unsupported upvals in closure <---"));
    assert!(text.contains("be_local_closure(f,"));
}

#[test]
fn inner_class_constant_is_emitted_first() {
    let inner = Class::named("Inner");
    let mut proto = Prototype::named("f");
    proto.constants = vec![Value::Int(0), Value::Class(inner)];
    let clo = Rc::new(Closure::new(Rc::new(proto)));
    let text = render(&Value::closure(clo), None);

    let class_body = text.find("be_local_class(Inner,").expect("inner class emitted");
    let closure_body = text.find("be_local_closure(f,").expect("closure emitted");
    assert!(class_body < closure_body, "inner class precedes the closure");
    assert!(text.contains("/* K1   */  be_const_class(be_class_Inner),\n"));
}

#[test]
fn static_method_self_class_is_not_reemitted() {
    let self_class = Class::named("A");
    let mut proto = Prototype::named("m");
    proto.varg = VA_STATICMETHOD;
    proto.constants = vec![Value::Class(self_class), Value::Int(1)];
    let clo = Rc::new(Closure::new(Rc::new(proto)));
    let text = render(&Value::closure(clo), None);

    assert!(!text.contains("be_local_class(A,"));
    // the constant itself still refers to the class
    assert!(text.contains("/* K0   */  be_const_class(be_class_A),\n"));
}

#[test]
fn non_static_class_constant_at_index_zero_is_emitted() {
    let inner = Class::named("Inner");
    let mut proto = Prototype::named("f");
    proto.constants = vec![Value::Class(inner)];
    let clo = Rc::new(Closure::new(Rc::new(proto)));
    let text = render(&Value::closure(clo), None);
    assert!(text.contains("be_local_class(Inner,"));
}
