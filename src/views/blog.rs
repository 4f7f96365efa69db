use crate::models;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Listing {
    #[serde(flatten)]
    pub blog: models::Blog,
    #[serde(flatten)]
    pub tally: models::Tally,
}

#[derive(Debug, Serialize)]
pub struct Detail {
    #[serde(flatten)]
    pub blog: models::Blog,
    #[serde(flatten)]
    pub tally: models::Tally,
    pub comments: Vec<models::Comment>,
}
