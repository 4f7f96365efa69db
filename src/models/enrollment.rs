use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's relationship to a purchased course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    pub user_id: i32,
    pub course_id: i32,
    /// percent, 0..=100
    pub progress: i32,
    pub completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
    /// lesson number the user is currently on, 0 before the first lesson
    pub currently_in: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EnrollmentError {
    #[error("Course has no lessons yet")]
    NoLessons,
    #[error("Lesson {lesson} does not exist, the course has {total} lessons")]
    LessonOutOfRange { lesson: i32, total: i32 },
}

impl Enrollment {
    pub fn new(user_id: i32, course_id: i32) -> Self {
        Self {
            user_id,
            course_id,
            progress: 0,
            completed: false,
            completed_date: None,
            currently_in: 0,
            created_at: Utc::now(),
        }
    }

    /// Moves the lesson pointer. Progress is the share of lessons reached and
    /// never goes down; reaching the last lesson completes the course once.
    pub fn record_progress(
        &mut self,
        lesson_number: i32,
        total_lessons: i32,
        now: DateTime<Utc>,
    ) -> Result<(), EnrollmentError> {
        if total_lessons <= 0 {
            return Err(EnrollmentError::NoLessons);
        }
        if lesson_number < 1 || lesson_number > total_lessons {
            return Err(EnrollmentError::LessonOutOfRange {
                lesson: lesson_number,
                total: total_lessons,
            });
        }

        self.currently_in = lesson_number;
        let reached = lesson_number * 100 / total_lessons;
        self.progress = self.progress.max(reached).min(100);

        if lesson_number == total_lessons && !self.completed {
            self.completed = true;
            self.progress = 100;
            self.completed_date = Some(now);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn progress_is_share_of_lessons_reached() {
        let mut enrollment = Enrollment::new(1, 2);
        enrollment.record_progress(1, 3, at(9)).unwrap();

        assert_eq!(enrollment.currently_in, 1);
        assert_eq!(enrollment.progress, 33);
        assert!(!enrollment.completed);
        assert_eq!(enrollment.completed_date, None);
    }

    #[test]
    fn going_back_keeps_progress() {
        let mut enrollment = Enrollment::new(1, 2);
        enrollment.record_progress(3, 4, at(9)).unwrap();
        enrollment.record_progress(1, 4, at(10)).unwrap();

        assert_eq!(enrollment.currently_in, 1);
        assert_eq!(enrollment.progress, 75);
    }

    #[test]
    fn last_lesson_completes_once() {
        let mut enrollment = Enrollment::new(1, 2);
        enrollment.record_progress(2, 2, at(9)).unwrap();
        assert!(enrollment.completed);
        assert_eq!(enrollment.progress, 100);
        assert_eq!(enrollment.completed_date, Some(at(9)));

        enrollment.record_progress(1, 2, at(10)).unwrap();
        enrollment.record_progress(2, 2, at(11)).unwrap();
        assert_eq!(enrollment.completed_date, Some(at(9)));
        assert_eq!(enrollment.progress, 100);
    }

    #[test]
    fn out_of_range_lessons_are_rejected() {
        let mut enrollment = Enrollment::new(1, 2);

        assert_eq!(
            enrollment.record_progress(0, 5, at(9)),
            Err(EnrollmentError::LessonOutOfRange { lesson: 0, total: 5 })
        );
        assert_eq!(
            enrollment.record_progress(6, 5, at(9)),
            Err(EnrollmentError::LessonOutOfRange { lesson: 6, total: 5 })
        );
        assert_eq!(
            enrollment.record_progress(1, 0, at(9)),
            Err(EnrollmentError::NoLessons)
        );
        assert_eq!(enrollment.currently_in, 0);
        assert_eq!(enrollment.progress, 0);
    }
}
