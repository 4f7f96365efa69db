use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct LessonForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    #[validate(minimum = 0)]
    pub duration_minutes: i32,
    /// 1-based slot to put the lesson in; the lesson there and those after
    /// it move down. Appended when absent.
    #[validate(minimum = 1)]
    pub position: Option<i32>,
}

impl LessonForm {
    /// Splits the form into the lesson to save and the requested position.
    pub fn into_lesson(self, course_id: i32, lesson_id: i32) -> (models::Lesson, Option<i32>) {
        let lesson = models::Lesson {
            id: lesson_id,
            course_id,
            lesson_number: 0,
            title: self.title,
            description: self.description,
            video_url: self.video_url,
            duration_minutes: self.duration_minutes,
        };
        (lesson, self.position)
    }
}
