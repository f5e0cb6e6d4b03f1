use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::users::repo_types::User;

/// Request body for create and update. Every field is required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserPayload {
    /// name for user
    #[schema(example = "Ann", max_length = 80)]
    pub name: String,
    /// email for user
    #[schema(example = "a@x.com", max_length = 80)]
    pub email: String,
    /// password for user
    #[schema(example = "p1", max_length = 80)]
    pub password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Acknowledgement returned by create and update.
#[derive(Debug, Serialize, ToSchema)]
pub struct Confirmation {
    #[schema(example = "User Created Successfully")]
    pub message: String,
    pub id: i64,
}

impl Confirmation {
    pub fn created(id: i64) -> Self {
        Self {
            message: "User Created Successfully".into(),
            id,
        }
    }

    pub fn updated(id: i64) -> Self {
        Self {
            message: "User Updated Successfully".into(),
            id,
        }
    }
}
