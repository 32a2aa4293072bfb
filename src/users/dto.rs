use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::ApiError, users::repo_types::User, validation};

/// Public part of the user returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

/// Request body for a profile update. Only these two fields are writable.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
}

#[derive(Debug)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<ProfileUpdate, ApiError> {
        let mut errors = Vec::new();
        let name = validation::name(self.name.as_ref(), &mut errors);
        let email = validation::email(self.email.as_ref(), &mut errors);
        match (name, email) {
            (Some(name), Some(email)) => Ok(ProfileUpdate { name, email }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}
