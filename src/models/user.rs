use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: 0,
            name,
            email,
            avatar: None,
            bio: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
