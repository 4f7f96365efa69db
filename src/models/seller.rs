use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Actor who creates and owns courses. Its rating is derived from reactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Seller {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Seller {
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: 0,
            name,
            email,
            headline: None,
            bio: None,
            avatar: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
