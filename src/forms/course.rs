use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Seller-editable course fields. Lesson totals are derived, never sent.
#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct CourseForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub title: String,
    #[validate(min_length = 1)]
    pub description: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub category: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 50)]
    pub level: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 50)]
    pub language: String,
    pub thumbnail: Option<String>,
    /// minor currency units
    #[validate(minimum = 0)]
    #[validate(maximum = 1_000_000_000_000)]
    pub price: i64,
    #[serde(default)]
    #[validate(minimum = 0)]
    #[validate(maximum = 100)]
    pub discount: i32,
}

impl CourseForm {
    pub fn update(self, course: &mut models::Course) {
        course.title = self.title;
        course.description = self.description;
        course.category = self.category;
        course.level = self.level;
        course.language = self.language;
        course.thumbnail = self.thumbnail;
        course.price = self.price;
        course.discount = self.discount;
    }

    pub fn into_course(self, seller_id: i32) -> models::Course {
        let now = chrono::Utc::now();
        let mut course = models::Course {
            seller_id,
            created_at: now,
            updated_at: now,
            ..Default::default()
        };
        self.update(&mut course);
        course
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl CatalogQuery {
    /// Blank parameters count as absent.
    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    pub fn search(&self) -> Option<&str> {
        non_blank(self.search.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
