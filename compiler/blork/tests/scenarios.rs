//! End-to-end checks through the public surface.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use blork::{blork, CheckError, Class, ConfigError, TypeExpr, TypeShape, Value, ValueError};
use pretty_assertions::assert_eq;

fn nums(items: &[i32]) -> Value {
    Value::array(items.iter().copied().map(Value::from))
}

fn value_error(result: Result<(), CheckError>) -> ValueError {
    let err = result.expect_err("expected a value failure");
    err.downcast_value::<ValueError>()
        .cloned()
        .unwrap_or_else(|| panic!("not a value error: {err}"))
}

#[test]
fn precedence() {
    assert!(blork::check(&Value::from("abc"), "string & lower | upper", "").is_ok());
    assert!(blork::check(&Value::from("ABC"), "string & lower | upper", "").is_ok());
    assert!(blork::check(&Value::from("ABCabc"), "string & lower | upper", "").is_err());

    // `a | b & c` is `a | (b & c)`
    assert!(blork::check(&Value::from(1), "num | str & lower", "").is_ok());
    assert!(blork::check(&Value::from("ABC"), "num | str & lower", "").is_err());
    assert!(blork::check(&Value::from("ABC"), "(num | str) & upper", "").is_ok());
}

#[test]
fn non_empty() {
    assert!(blork::check(&Value::from(""), "string+", "").is_err());
    assert!(blork::check(&Value::from("a"), "string+", "").is_ok());
    assert!(blork::check(&nums(&[]), "array+", "").is_err());
    assert!(blork::check(&nums(&[1]), "array+", "").is_ok());
}

#[test]
fn tuple_exactness() {
    let pair = TypeExpr::list([TypeExpr::Number, TypeExpr::Number]);
    let triple = TypeExpr::list([TypeExpr::Number, TypeExpr::Number, TypeExpr::Number]);
    let err = value_error(blork::check(&nums(&[1, 2, 3]), pair.clone(), ""));
    assert_eq!(err.reason, "Must have 2 items");
    assert!(blork::check(&nums(&[1, 2]), triple, "").is_err());
    assert!(blork::check(&nums(&[1, 2]), pair, "").is_ok());
}

#[test]
fn array_of_reports_the_index() {
    let ty = TypeExpr::list([TypeExpr::Number]);
    let mixed = Value::array([Value::from(1), Value::from(2), Value::from("x")]);
    let err = value_error(blork::check(&mixed, ty.clone(), "values"));
    assert_eq!(err.prefix, "values[2]");
    assert_eq!(err.value, Some(Value::from("x")));
    assert!(blork::check(&nums(&[1, 2, 3]), ty, "values").is_ok());
}

#[test]
fn circular_value_is_accepted() {
    let value = Value::object::<&str>([]);
    value.insert("self", value.clone());
    let ty = TypeExpr::shape([(
        "self",
        TypeExpr::shape([("self", TypeExpr::grammar("object"))]),
    )]);
    assert!(blork::check(&value, ty, "").is_ok());
}

#[test]
fn circular_type_is_rejected() {
    let ty = TypeShape::new();
    ty.insert("self", ty.clone());
    let value = Value::object([(
        "self",
        Value::object([("self", Value::object::<&str>([]))]),
    )]);
    let err = blork::check(&value, ty, "").unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("circular references"));
}

#[test]
fn circular_type_from_value() {
    let template = Value::object::<&str>([]);
    template.insert("self", template.clone());
    let ty = TypeExpr::from_value(&template).unwrap();
    let value = Value::object([(
        "self",
        Value::object([("self", Value::object::<&str>([]))]),
    )]);
    assert_eq!(
        blork::check(&value, ty, "").unwrap_err().as_config(),
        Some(&ConfigError::CircularType)
    );
}

#[test]
fn unknown_checker() {
    let err = blork::check(&Value::from(1), "definitelyNotARealChecker", "").unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("definitelyNotARealChecker"));
}

#[test]
fn duplicate_registration() {
    let engine = blork();
    engine.add("dup", |_| true, None, None).unwrap();
    assert_eq!(
        engine.add("dup", |_| true, None, None).unwrap_err(),
        ConfigError::DuplicateChecker { name: "dup".into() }
    );
}

#[test]
fn end_to_end() {
    let ty = TypeExpr::shape([("name", "string+"), ("age", "int & +int")]);
    let alice = Value::object([("name", Value::from("Alice")), ("age", Value::from(30))]);
    assert!(blork::check(&alice, ty.clone(), "").is_ok());

    let bad = Value::object([("name", Value::from("")), ("age", Value::from(-1))]);
    let err = blork::check(&bad, ty, "").unwrap_err();
    assert!(!err.is_config());
    let message = err.to_string();
    assert!(message.contains("name"), "{message}");
    assert!(message.contains("non-empty string"), "{message}");
}

#[test]
fn nested_records() {
    let engine = blork();
    let address = TypeShape::new()
        .field("street", "str+")
        .field("zip", "numeric{5}");
    let user = TypeShape::new()
        .field("name", "str+")
        .field("emails", "lower+[]")
        .field("addresses", TypeExpr::list([address]))
        .field("nick", "str?");
    let value = Value::object([
        ("name", Value::from("Ada")),
        ("emails", Value::array([Value::from("ada")])),
        (
            "addresses",
            Value::array([Value::object([
                ("street", Value::from("Main")),
                ("zip", Value::from("1234")),
            ])]),
        ),
    ]);
    assert_eq!(
        engine.check(&value, user, "user").unwrap_err().to_string(),
        "user.addresses[0].zip: Must be numeric string with size 5 (received \"1234\")"
    );
}

#[test]
fn instances() {
    let shape = Class::new("Shape");
    let circle = Class::extending("Circle", &shape);
    let value = Value::instance(&circle, [("radius", Value::from(2))]);
    assert!(blork::check(&value, &shape, "").is_ok());
    let ty = TypeShape::new().class(&circle).field("radius", "+num");
    assert!(blork::check(&value, ty.clone(), "").is_ok());
    let err = value_error(blork::check(&Value::object([("radius", Value::from(2))]), ty, "c"));
    assert_eq!(err.reason, "Must be an instance of Circle");
}

#[test]
fn free_function_args_and_assert() {
    let types = [TypeExpr::from("str"), TypeExpr::from("num")];
    assert!(blork::args(&[Value::from("a"), Value::from(1)], &types).is_ok());
    let err = value_error(blork::args(&[Value::from("a")], &types));
    assert_eq!(err.prefix, "arguments[1]");
    assert_eq!(
        blork::assert(false, "be larger", "n").unwrap_err().to_string(),
        "n: Must be larger"
    );
    assert_eq!(
        blork::checker("str[]").unwrap().description(),
        "plain array containing string"
    );
}

#[test]
fn long_and_circular_values_are_rendered_safely() {
    let value = Value::object([("text", Value::from("x".repeat(100)))]);
    value.insert("self", value.clone());
    let err = blork::check(&value, "str", "").unwrap_err().to_string();
    assert!(err.contains('…'), "{err}");
    assert!(err.contains('↻'), "{err}");
}

#[test]
fn shared_acyclic_values_check_quickly() {
    let mut value = Value::array([Value::from(1)]);
    for _ in 0..32 {
        value = Value::array([value.clone(), value]);
    }
    assert!(blork::check(&value, "circular | any[]", "").is_ok());
    assert!(blork::check(&value, "json", "").is_ok());
    assert!(blork::check(&value, "circular", "").is_err());
}
