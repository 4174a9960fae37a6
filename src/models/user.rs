use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account as stored in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// bcrypt hash. Never serialized back to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
}

impl User {
    pub fn new(input: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: input.username,
            password_hash: input.password_hash,
            firstname: input.firstname,
            lastname: input.lastname,
            created_at: Utc::now(),
        }
    }
}
