use crate::models;
use crate::views::course::Listing;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What anyone can see about a seller. The email stays private.
#[derive(Debug, Serialize)]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub tally: models::Tally,
    pub courses: Vec<Listing>,
}

impl Profile {
    pub fn new(seller: models::Seller, tally: models::Tally, courses: Vec<models::Course>) -> Self {
        Self {
            id: seller.id,
            name: seller.name,
            headline: seller.headline,
            bio: seller.bio,
            avatar: seller.avatar,
            created_at: seller.created_at,
            tally,
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }
}
