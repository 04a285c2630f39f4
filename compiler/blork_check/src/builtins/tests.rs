use blork_value::{Class, Value};
use pretty_assertions::assert_eq;

use super::{builtin_checkers, is_kebab, Case, CASE_PATTERNS, CASE_SOURCES};

fn passes(name: &str, value: &Value) -> bool {
    let checkers = builtin_checkers();
    let checker = checkers
        .get(name)
        .unwrap_or_else(|| panic!("no built-in named {name}"));
    checker.check(value)
}

fn s(text: &str) -> Value {
    Value::from(text)
}

#[test]
fn test_aliases_share_a_checker() {
    let checkers = builtin_checkers();
    assert!(checkers["str"].ptr_eq(&checkers["string"]));
    assert!(checkers["+int"].ptr_eq(&checkers["+integer"]));
    assert_eq!(checkers["num"].description(), "finite number");
    assert_eq!(checkers["arguments"].description(), checkers["arraylike"].description());
}

#[test]
fn test_numbers() {
    assert!(passes("num", &Value::from(1.5)));
    assert!(!passes("num", &Value::from(f64::INFINITY)));
    assert!(passes("+num", &Value::from(0)));
    assert!(!passes("+num", &Value::from(-0.5)));
    assert!(passes("-num", &Value::from(-0.5)));
    assert!(passes("int", &Value::from(-3)));
    assert!(!passes("int", &Value::from(1.5)));
    assert!(passes("+int", &Value::from(3)));
    assert!(!passes("+int", &Value::from(-1)));
    assert!(passes("-int", &Value::from(-1)));
    assert!(passes("nan", &Value::from(f64::NAN)));
    assert!(passes("zero", &Value::from(0)));
    assert!(passes("one", &Value::from(1)));
    assert!(!passes("num", &s("1")));
}

#[test]
fn test_string_cases() {
    assert!(passes("lower", &s("abc")));
    assert!(!passes("lower", &s("")));
    assert!(!passes("lower", &s("aBc")));
    assert!(passes("upper", &s("ABC")));
    assert!(passes("camel", &s("myVar2")));
    assert!(!passes("camel", &s("MyVar")));
    assert!(passes("pascal", &s("MyVar")));
    assert!(passes("snake", &s("my_var_2")));
    assert!(!passes("snake", &s("my__var")));
    assert!(!passes("snake", &s("my_var_")));
    assert!(passes("screaming", &s("MY_VAR")));
    assert!(passes("kebab", &s("my-var")));
    assert!(passes("slug", &s("a1-b2")));
    assert!(!passes("kebab", &s("-my-var")));
    assert!(passes("train", &s("My-Var")));
    assert!(passes("alphanumeric", &s("a1B2")));
    assert!(!passes("alphabetic", &s("a1")));
    assert!(passes("numeric", &s("0123")));
    assert!(!passes("numeric", &Value::from(123)));
}

#[test]
fn test_case_patterns_compile_in_order() {
    for (source, pattern) in CASE_SOURCES.iter().zip(CASE_PATTERNS.iter()) {
        assert!(pattern.is_some(), "pattern {source} did not compile");
    }
    let samples = [
        (Case::Alphanumeric, "a1B2", "a-1"),
        (Case::Alphabetic, "aB", "a1"),
        (Case::Numeric, "0123", "1.5"),
        (Case::Lower, "abc", "abC"),
        (Case::Upper, "ABC", "AbC"),
        (Case::Camel, "myVar2", "MyVar"),
        (Case::Pascal, "MyVar", "myVar"),
        (Case::Snake, "my_var_2", "my_Var"),
        (Case::Screaming, "MY_VAR_2", "MY__VAR"),
        (Case::Kebab, "my-var-2", "my-Var"),
        (Case::Train, "My-Var-2x", "My-var"),
    ];
    assert_eq!(samples.len(), CASE_SOURCES.len());
    for (case, good, bad) in samples {
        assert!(case.matches(good), "{case:?} should match {good:?}");
        assert!(!case.matches(bad), "{case:?} should reject {bad:?}");
        assert!(!case.matches(""), "{case:?} should reject an empty string");
    }
}

#[test]
fn test_name_rules() {
    assert!(is_kebab("my-checker"));
    assert!(is_kebab("dup"));
    assert!(!is_kebab(""));
    assert!(!is_kebab("MyChecker"));
    assert!(!is_kebab("my_checker"));
    assert!(!is_kebab("my--checker"));
    assert!(Case::Train.matches("Content-Type"));
    assert!(Case::Train.matches("X-1a"));
    assert!(!Case::Train.matches("Content-type"));
    assert!(!Case::Train.matches("Content-T"));
}

#[test]
fn test_objects() {
    let class = Class::new("Thing");
    assert!(passes("object", &Value::object::<&str>([])));
    assert!(!passes("object", &Value::instance::<&str>(&class, [])));
    assert!(passes("objectlike", &Value::instance::<&str>(&class, [])));
    assert!(passes("objectlike", &Value::now()));
    assert!(!passes("objectlike", &Value::Null));
    assert!(passes("array", &Value::array([])));
    assert!(!passes("array", &Value::object::<&str>([])));
    assert!(passes("iterable", &Value::set([])));
    assert!(!passes("iterable", &s("abc")));
    assert!(passes("function", &Value::anonymous_function()));
    assert!(passes("regexp", &Value::regexp("a")));
    assert!(passes("symbol", &Value::symbol("a")));
    assert!(passes("map", &Value::map([])));
}

#[test]
fn test_arraylike() {
    assert!(passes("arraylike", &Value::array([])));
    assert!(passes("args", &Value::object([("length", Value::from(2))])));
    assert!(!passes("args", &Value::object([("length", Value::from(-1))])));
    assert!(!passes("args", &Value::object([("length", Value::from("2"))])));
    assert!(!passes("args", &s("abc")));
}

#[test]
fn test_dates() {
    let hour = 3_600_000.0;
    let now = blork_value::now_millis();
    assert!(passes("future", &Value::date(now + hour)));
    assert!(passes("past", &Value::date(now - hour)));
    assert!(!passes("future", &Value::date(f64::NAN)));
    assert!(passes("date", &Value::date(f64::NAN)));
}

#[test]
fn test_other() {
    let cyclic = Value::object::<&str>([]);
    cyclic.insert("me", cyclic.clone());
    assert!(passes("circular", &cyclic));
    assert!(!passes("json", &cyclic));
    assert!(passes("json", &Value::object([("a", Value::array([Value::Null]))])));
    assert!(passes("empty", &s("")));
    assert!(!passes("empty", &s("a")));
    assert!(passes("any", &Value::Undefined));
    assert!(passes("mixed", &Value::symbol("x")));
    assert!(passes("primitive", &Value::Undefined));
    assert!(!passes("primitive", &Value::array([])));
    assert!(passes("truthy", &s("a")));
    assert!(passes("falsy", &Value::from(0)));
    assert!(passes("defined", &Value::Null));
    assert!(passes("void", &Value::Undefined));
}
