//! Unit tests for the Subject value

use serde_json::json;

use crate::domain::entities::Subject;
use crate::errors::ValidationError;

#[test]
fn test_subject_from_json_integer_and_string() {
    assert_eq!(Subject::from_json(&json!(123), "subject").unwrap(), Subject::Int(123));
    assert_eq!(
        Subject::from_json(&json!("user@example.com"), "subject").unwrap(),
        Subject::Text("user@example.com".to_string())
    );
}

#[test]
fn test_subject_from_json_rejects_other_types() {
    for value in [json!(1.5), json!(null), json!(true), json!({"a": 1}), json!([1])] {
        let err = Subject::from_json(&value, "subject").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field } if field == "subject"));
    }
}

#[test]
fn test_subject_from_json_rejects_empty_string() {
    let err = Subject::from_json(&json!(""), "subject").unwrap_err();
    assert!(matches!(err, ValidationError::RequiredField { .. }));
}

#[test]
fn test_int_and_text_subjects_differ() {
    assert_ne!(Subject::Int(123), Subject::Text("123".to_string()));
}

#[test]
fn test_subject_from_form() {
    assert_eq!(Subject::from_form("42", true), Subject::Int(42));
    assert_eq!(Subject::from_form("42", false), Subject::Text("42".to_string()));
    assert_eq!(Subject::from_form("alice", true), Subject::Text("alice".to_string()));
}

#[test]
fn test_subject_serializes_untagged() {
    assert_eq!(serde_json::to_value(Subject::Int(7)).unwrap(), json!(7));
    assert_eq!(serde_json::to_value(Subject::from("x")).unwrap(), json!("x"));

    let parsed: Subject = serde_json::from_value(json!(7)).unwrap();
    assert_eq!(parsed, Subject::Int(7));
    assert_eq!(Subject::Int(7).to_json(), json!(7));
}
