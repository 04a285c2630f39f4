use crate::{Class, Value};

fn obj() -> Value {
    Value::object::<&str>([])
}

#[test]
fn direct_self_reference_is_circular() {
    let a = obj();
    a.insert("circular", a.clone());
    assert!(a.is_circular());

    let list = Value::array([]);
    list.push(list.clone());
    assert!(list.is_circular());
}

#[test]
fn deep_back_reference_is_circular() {
    let root = Value::array([]);
    let mut tail = root.clone();
    for _ in 0..6 {
        let next = Value::object::<&str>([]);
        tail.push(Value::object([("a", next.clone())]));
        let inner = Value::array([]);
        next.insert("list", inner.clone());
        tail = inner;
    }
    tail.push(root.clone());
    assert!(root.is_circular());
}

#[test]
fn shared_siblings_are_not_circular() {
    let shared = obj();
    let parent = Value::object([("x", shared.clone()), ("y", shared)]);
    assert!(!parent.is_circular());
    assert!(!Value::from(1).is_circular());
}

#[test]
fn jsonable_scalars_and_containers() {
    assert!(Value::Null.is_jsonable());
    assert!(Value::from(-1.5).is_jsonable());
    assert!(Value::from("").is_jsonable());
    assert!(Value::object([("deep", Value::array([Value::from(1)]))]).is_jsonable());
    assert!(!Value::Undefined.is_jsonable());
    assert!(!Value::symbol("abc").is_jsonable());
    assert!(!Value::from(f64::NAN).is_jsonable());
    assert!(!Value::from(f64::INFINITY).is_jsonable());
}

#[test]
fn complex_members_are_not_jsonable() {
    let class = Class::new("Something");
    assert!(!Value::object([("complex", Value::instance::<&str>(&class, []))]).is_jsonable());
    assert!(!Value::object([("date", Value::now())]).is_jsonable());
    assert!(!Value::object([("func", Value::anonymous_function())]).is_jsonable());
    assert!(!Value::array([Value::map([])]).is_jsonable());
}

#[test]
fn cycles_are_not_jsonable() {
    let a = obj();
    let sub = obj();
    a.insert("sub", sub.clone());
    sub.insert("circular", a.clone());
    assert!(!a.is_jsonable());
}

#[test]
fn deep_shared_dag_is_walked_once() {
    // 2^40 paths to the leaf, 41 distinct containers.
    let mut value = Value::array([Value::from(1)]);
    for _ in 0..40 {
        value = Value::array([value.clone(), value]);
    }
    assert!(!value.is_circular());
    assert!(value.is_jsonable());

    value.push(Value::Undefined);
    assert!(!value.is_jsonable());
}
