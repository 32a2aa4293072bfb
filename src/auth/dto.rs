use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::ApiError, validation};

/// Request body for user registration. Fields stay raw JSON so a missing or
/// mistyped field is reported alongside the other violations.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

/// A registration that passed validation.
#[derive(Debug)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login input that passed validation.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewAccount, ApiError> {
        let mut errors = Vec::new();
        let name = validation::name(self.name.as_ref(), &mut errors);
        let email = validation::email(self.email.as_ref(), &mut errors);
        let password = validation::password(self.password.as_ref(), &mut errors);
        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => Ok(NewAccount {
                name,
                email,
                password,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, ApiError> {
        let mut errors = Vec::new();
        let email = validation::email(self.email.as_ref(), &mut errors);
        let password = validation::password(self.password.as_ref(), &mut errors);
        match (email, password) {
            (Some(email), Some(password)) => Ok(Credentials { email, password }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_reports_all_violations() {
        let req = RegisterRequest {
            name: Some("J".into()),
            email: Some(Value::from(42)),
            password: None,
        };
        match req.validate() {
            Err(ApiError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn register_normalizes_valid_input() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"name":" John Smith ","email":"JS@test.com","password":"pswd1234"}"#,
        )
        .unwrap();
        let account = req.validate().expect("valid");
        assert_eq!(account.name, "John Smith");
        assert_eq!(account.email, "js@test.com");
        assert_eq!(account.password, "pswd1234");
    }

    #[test]
    fn login_requires_both_fields() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        match req.validate() {
            Err(ApiError::Validation(errors)) => {
                assert_eq!(errors, vec!["email is required", "password is required"])
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
