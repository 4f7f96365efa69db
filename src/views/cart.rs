use crate::models;
use crate::views::course::Listing;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct Cart {
    pub courses: Vec<Listing>,
    /// sum of final prices
    pub total: i64,
    pub total_before_discount: i64,
}

impl From<Vec<models::Course>> for Cart {
    fn from(courses: Vec<models::Course>) -> Self {
        let courses: Vec<Listing> = courses.into_iter().map(Into::into).collect();
        Self {
            total: saturating_sum(courses.iter().map(|c| c.final_price)),
            total_before_discount: saturating_sum(courses.iter().map(|c| c.price)),
            courses,
        }
    }
}

fn saturating_sum(prices: impl Iterator<Item = i64>) -> i64 {
    prices.fold(0, i64::saturating_add)
}
