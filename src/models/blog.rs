use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin-authored article. Likes and dislikes live in the reaction table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
