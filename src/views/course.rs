use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Catalogue entry. Carries the price after discount.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Listing {
    pub id: i32,
    pub seller_id: i32,
    pub title: String,
    pub category: String,
    pub level: String,
    pub language: String,
    pub thumbnail: Option<String>,
    pub price: i64,
    pub discount: i32,
    pub final_price: i64,
    pub total_hours: f64,
    pub total_number_of_lessons: i32,
    pub created_at: DateTime<Utc>,
}

impl From<models::Course> for Listing {
    fn from(course: models::Course) -> Self {
        Self {
            final_price: course.final_price(),
            id: course.id,
            seller_id: course.seller_id,
            title: course.title,
            category: course.category,
            level: course.level,
            language: course.language,
            thumbnail: course.thumbnail,
            price: course.price,
            discount: course.discount,
            total_hours: course.total_hours,
            total_number_of_lessons: course.total_number_of_lessons,
            created_at: course.created_at,
        }
    }
}

/// Lesson as shown to anyone browsing: no video link.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineLesson {
    pub id: i32,
    pub lesson_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
}

impl From<models::Lesson> for OutlineLesson {
    fn from(lesson: models::Lesson) -> Self {
        Self {
            id: lesson.id,
            lesson_number: lesson.lesson_number,
            title: lesson.title,
            description: lesson.description,
            duration_minutes: lesson.duration_minutes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Detail {
    #[serde(flatten)]
    pub course: Listing,
    pub description: String,
    pub lessons: Vec<OutlineLesson>,
    pub comments: Vec<models::Comment>,
}

impl Detail {
    pub fn new(
        course: models::Course,
        lessons: Vec<models::Lesson>,
        comments: Vec<models::Comment>,
    ) -> Self {
        let description = course.description.clone();
        Self {
            course: course.into(),
            description,
            lessons: lessons.into_iter().map(Into::into).collect(),
            comments,
        }
    }
}

/// A course as its seller sees it.
#[derive(Debug, Serialize)]
pub struct Owned {
    #[serde(flatten)]
    pub course: models::Course,
    pub final_price: i64,
    pub students: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons: Option<Vec<models::Lesson>>,
}

impl From<models::CourseStats> for Owned {
    fn from(stats: models::CourseStats) -> Self {
        Self {
            final_price: stats.course.final_price(),
            course: stats.course,
            students: stats.students,
            lessons: None,
        }
    }
}

impl Owned {
    pub fn with_lessons(course: models::Course, lessons: Vec<models::Lesson>) -> Self {
        Self {
            final_price: course.final_price(),
            course,
            students: 0,
            lessons: Some(lessons),
        }
    }
}
