use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_message_parts() {
    let full = ValueFailure::new("Must be string", Some(Value::from(1)), "user.name");
    assert_eq!(full.message(), "user.name: Must be string (received 1)");

    let bare = ValueFailure::new("Must be string", Some(Value::Null), "");
    assert_eq!(bare.message(), "Must be string (received null)");

    let assertion = ValueFailure::new("Must be unique", None, "ids");
    assert_eq!(assertion.message(), "ids: Must be unique");
}

#[test]
fn test_default_factory_builds_value_error() {
    let factory = default_error_factory();
    let err = CheckError::Value(factory(ValueFailure::new(
        "Must be integer",
        Some(Value::from(1.5)),
        "age",
    )));
    assert!(!err.is_config());
    assert_eq!(err.to_string(), "age: Must be integer (received 1.5)");
    let value_error = err.downcast_value::<ValueError>().unwrap();
    assert_eq!(value_error.reason, "Must be integer");
    assert_eq!(value_error.prefix, "age");
    assert_eq!(value_error.value, Some(Value::from(1.5)));
}

#[test]
fn test_config_errors_name_the_problem() {
    let err = CheckError::from(ConfigError::UnknownChecker {
        name: "definitelyNotARealChecker".to_owned(),
    });
    assert!(err.is_config());
    assert!(err.to_string().contains("definitelyNotARealChecker"));
    assert_eq!(err.downcast_value::<ValueError>().map(|e| e.message.clone()), None);
    assert_eq!(
        ConfigError::CircularType.to_string(),
        "Blork type must not contain circular references"
    );
}

#[derive(Debug, thiserror::Error)]
#[error("bad input at {path}")]
struct InputError {
    path: String,
}

#[test]
fn test_custom_factory_keeps_its_type() {
    let factory = error_factory(|failure: ValueFailure| InputError {
        path: failure.prefix,
    });
    let err = CheckError::Value(factory(ValueFailure::new("Must be string", None, "a.b")));
    assert_eq!(err.to_string(), "bad input at a.b");
    assert_eq!(err.downcast_value::<InputError>().unwrap().path, "a.b");
    assert!(err.downcast_value::<ValueError>().is_none());
}
