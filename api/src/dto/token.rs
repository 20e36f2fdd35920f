use serde::{Deserialize, Serialize};
use serde_json::Value;

use tl_core::errors::ValidationError;
use tl_core::Subject;

/// Body of `POST /generate-token`
///
/// Fields are optional so that a missing value is reported per field
/// instead of as a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateTokenRequest {
    /// Integer or string identity; `user_id` and `id` are accepted too
    #[serde(default, alias = "user_id", alias = "id")]
    pub subject: Option<Value>,

    /// Requested lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<Value>,
}

impl GenerateTokenRequest {
    pub fn subject(&self) -> Result<Subject, ValidationError> {
        required_subject(self.subject.as_ref())
    }

    pub fn expires_in(&self) -> Result<Option<i64>, ValidationError> {
        match &self.expires_in {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| ValidationError::InvalidFormat {
                    field: "expires_in".to_string(),
                }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTokenResponse {
    pub subject: Value,
    pub token: String,
    pub expires_in: i64,
}

/// Body of `POST /verify-token`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyTokenRequest {
    #[serde(default, alias = "uuid-token")]
    pub token: Option<String>,

    /// Expected subject, checked against the token when present
    #[serde(default, alias = "user_id", alias = "id")]
    pub subject: Option<Value>,
}

impl VerifyTokenRequest {
    pub fn token(&self) -> Result<&str, ValidationError> {
        required_token(self.token.as_deref())
    }

    pub fn expected_subject(&self) -> Result<Option<Subject>, ValidationError> {
        match &self.subject {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Subject::from_json(value, "subject").map(Some),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
    pub valid: bool,
    pub subject: Value,
    pub id: String,
    /// Expiration as seconds since the Unix epoch
    pub exp: i64,
}

/// Failure envelope of `POST /verify-token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyFailureResponse {
    pub valid: bool,
    pub message: String,
}

impl VerifyFailureResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// JSON body of `POST /login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "user_id", alias = "id")]
    pub subject: Option<Value>,

    #[serde(default, alias = "uuid-token")]
    pub token: Option<String>,
}

/// Form-encoded body of `POST /login`; every value arrives as text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default, alias = "user_id", alias = "id")]
    pub subject: Option<String>,

    #[serde(default, alias = "uuid-token")]
    pub token: Option<String>,
}

/// Login credentials after the body format has been resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub subject: Subject,
    pub token: String,
}

impl LoginRequest {
    pub fn credentials(&self) -> Result<LoginCredentials, ValidationError> {
        Ok(LoginCredentials {
            subject: required_subject(self.subject.as_ref())?,
            token: required_token(self.token.as_deref())?.to_string(),
        })
    }
}

impl LoginForm {
    /// `coerce_int` turns numeric text into an integer subject
    pub fn credentials(&self, coerce_int: bool) -> Result<LoginCredentials, ValidationError> {
        let subject = match self.subject.as_deref() {
            Some(raw) if !raw.is_empty() => Subject::from_form(raw, coerce_int),
            _ => {
                return Err(ValidationError::RequiredField {
                    field: "subject".to_string(),
                })
            }
        };
        Ok(LoginCredentials {
            subject,
            token: required_token(self.token.as_deref())?.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Value>,
}

impl LoginResponse {
    pub fn success(subject: &Subject) -> Self {
        Self {
            success: true,
            message: format!("Successfully authenticated as {}", subject),
            subject: Some(subject.to_json()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            subject: None,
        }
    }
}

/// Body of `POST /revoke-token`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevokeTokenRequest {
    #[serde(default, alias = "uuid-token")]
    pub token: Option<String>,
}

impl RevokeTokenRequest {
    pub fn token(&self) -> Result<&str, ValidationError> {
        required_token(self.token.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeTokenResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Value>,
}

impl RevokeTokenResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            id: None,
            subject: None,
        }
    }
}

fn required_subject(value: Option<&Value>) -> Result<Subject, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::RequiredField {
            field: "subject".to_string(),
        }),
        Some(value) => Subject::from_json(value, "subject"),
    }
}

fn required_token(token: Option<&str>) -> Result<&str, ValidationError> {
    match token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ValidationError::RequiredField {
            field: "token".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_request_accepts_aliases() {
        let request: GenerateTokenRequest =
            serde_json::from_value(json!({"user_id": 123, "expires_in": 60})).unwrap();
        assert_eq!(request.subject().unwrap(), Subject::Int(123));
        assert_eq!(request.expires_in().unwrap(), Some(60));

        let request: GenerateTokenRequest =
            serde_json::from_value(json!({"id": "user@example.com"})).unwrap();
        assert_eq!(request.subject().unwrap(), Subject::from("user@example.com"));
        assert_eq!(request.expires_in().unwrap(), None);
    }

    #[test]
    fn test_generate_request_field_errors() {
        let request: GenerateTokenRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.subject().unwrap_err().field(), "subject");

        let request: GenerateTokenRequest =
            serde_json::from_value(json!({"subject": [1], "expires_in": "soon"})).unwrap();
        assert!(matches!(
            request.subject(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert_eq!(request.expires_in().unwrap_err().field(), "expires_in");
    }

    #[test]
    fn test_verify_request_reads_uuid_token_alias() {
        let request: VerifyTokenRequest =
            serde_json::from_value(json!({"uuid-token": "abc", "id": "bob"})).unwrap();
        assert_eq!(request.token().unwrap(), "abc");
        assert_eq!(request.expected_subject().unwrap(), Some(Subject::from("bob")));
    }

    #[test]
    fn test_blank_token_is_missing() {
        let request: RevokeTokenRequest = serde_json::from_value(json!({"token": "  "})).unwrap();
        assert_eq!(request.token().unwrap_err().field(), "token");
    }

    #[test]
    fn test_login_form_coercion() {
        let form: LoginForm = serde_urlencoded::from_str("user_id=123&token=t").unwrap();

        assert_eq!(form.credentials(true).unwrap().subject, Subject::Int(123));
        assert_eq!(form.credentials(false).unwrap().subject, Subject::from("123"));
    }

    #[test]
    fn test_login_form_requires_both_fields() {
        let form: LoginForm = serde_urlencoded::from_str("token=t").unwrap();
        assert_eq!(form.credentials(true).unwrap_err().field(), "subject");

        let form: LoginForm = serde_urlencoded::from_str("id=alice").unwrap();
        assert_eq!(form.credentials(false).unwrap_err().field(), "token");
    }
}
