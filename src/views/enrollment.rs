use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct EnrolledCourse {
    pub course_id: i32,
    pub title: String,
    pub thumbnail: Option<String>,
    pub total_hours: f64,
    pub total_number_of_lessons: i32,
    pub progress: i32,
    pub completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
    pub currently_in: i32,
    pub enrolled_at: DateTime<Utc>,
}
