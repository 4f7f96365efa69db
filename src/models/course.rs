use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: i32,
    pub seller_id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub language: String,
    pub thumbnail: Option<String>,
    /// minor currency units
    pub price: i64,
    /// percent, 0..=100
    pub discount: i32,
    pub total_hours: f64,
    pub total_number_of_lessons: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn final_price(&self) -> i64 {
        discounted_price(self.price, self.discount)
    }
}

/// A seller's course together with how many users are enrolled in it.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct CourseStats {
    #[sqlx(flatten)]
    pub course: Course,
    pub students: i64,
}

/// Highest accepted price in minor units.
pub const MAX_PRICE: i64 = 1_000_000_000_000;

/// Floored `price * (100 - discount) / 100`, computed in `i128` so no stored
/// price can overflow it.
pub fn discounted_price(price: i64, discount: i32) -> i64 {
    let discount = i128::from(discount.clamp(0, 100));
    let discounted = i128::from(price) * (100 - discount) / 100;
    i64::try_from(discounted).unwrap_or(price)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lesson {
    pub id: i32,
    pub course_id: i32,
    pub lesson_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: i32,
}

/// Ordered lessons of one course. Every mutation goes through here so lesson
/// numbers stay `1..=n` without gaps and the course totals can be derived.
#[derive(Debug, Default)]
pub struct Syllabus {
    lessons: Vec<Lesson>,
}

impl Syllabus {
    /// `lessons` may come in any order; they are sorted by (number, id).
    pub fn new(mut lessons: Vec<Lesson>) -> Self {
        lessons.sort_by_key(|lesson| (lesson.lesson_number, lesson.id));
        Self { lessons }
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn get(&self, lesson_id: i32) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id == lesson_id)
    }

    /// Insert before the lesson currently at the 1-based `position`; append when
    /// `position` is missing or past the end.
    pub fn insert(&mut self, lesson: Lesson, position: Option<i32>) {
        let index = self.index_for(position);
        self.lessons.insert(index, lesson);
    }

    pub fn remove(&mut self, lesson_id: i32) -> Option<Lesson> {
        let index = self.lessons.iter().position(|lesson| lesson.id == lesson_id)?;
        Some(self.lessons.remove(index))
    }

    /// Replace a lesson in place, or move it when `position` is given.
    pub fn replace(&mut self, lesson: Lesson, position: Option<i32>) -> bool {
        let Some(index) = self.lessons.iter().position(|l| l.id == lesson.id) else {
            return false;
        };

        match position {
            Some(_) => {
                self.lessons.remove(index);
                let index = self.index_for(position);
                self.lessons.insert(index, lesson);
            }
            None => self.lessons[index] = lesson,
        }
        true
    }

    fn index_for(&self, position: Option<i32>) -> usize {
        match position {
            Some(position) if position >= 1 => {
                usize::try_from(position - 1).map_or(self.lessons.len(), |index| {
                    index.min(self.lessons.len())
                })
            }
            Some(_) => 0,
            None => self.lessons.len(),
        }
    }

    /// Assigns `1..=n` in current order and returns `(id, number)` of every
    /// lesson whose number changed.
    pub fn renumber(&mut self) -> Vec<(i32, i32)> {
        let mut changed = vec![];
        for (index, lesson) in self.lessons.iter_mut().enumerate() {
            let number = index as i32 + 1;
            if lesson.lesson_number != number {
                lesson.lesson_number = number;
                changed.push((lesson.id, number));
            }
        }
        changed
    }

    pub fn total_number_of_lessons(&self) -> i32 {
        self.lessons.len() as i32
    }

    pub fn total_hours(&self) -> f64 {
        let minutes: i64 = self
            .lessons
            .iter()
            .map(|lesson| i64::from(lesson.duration_minutes.max(0)))
            .sum();
        (minutes as f64 / 60.0 * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: i32, number: i32, minutes: i32) -> Lesson {
        Lesson {
            id,
            course_id: 1,
            lesson_number: number,
            title: format!("lesson {}", id),
            duration_minutes: minutes,
            ..Default::default()
        }
    }

    fn numbers(syllabus: &Syllabus) -> Vec<(i32, i32)> {
        syllabus
            .lessons()
            .iter()
            .map(|l| (l.id, l.lesson_number))
            .collect()
    }

    #[test]
    fn discount_is_applied_and_clamped() {
        assert_eq!(discounted_price(10_000, 25), 7_500);
        assert_eq!(discounted_price(999, 0), 999);
        assert_eq!(discounted_price(999, 150), 0);
        assert_eq!(discounted_price(999, -5), 999);
        assert_eq!(discounted_price(1_999, 33), 1_339);
    }

    #[test]
    fn discount_of_huge_prices_does_not_overflow() {
        assert_eq!(discounted_price(MAX_PRICE, 25), 750_000_000_000);
        assert_eq!(discounted_price(i64::MAX, 10), 8_301_034_833_169_298_226);
        assert_eq!(discounted_price(i64::MAX, 0), i64::MAX);
    }

    #[test]
    fn new_sorts_by_number_then_id() {
        let syllabus = Syllabus::new(vec![lesson(3, 2, 10), lesson(1, 1, 10), lesson(2, 1, 10)]);
        let ids: Vec<i32> = syllabus.lessons().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn append_then_renumber() {
        let mut syllabus = Syllabus::new(vec![lesson(1, 1, 30), lesson(2, 2, 30)]);
        syllabus.insert(lesson(9, 0, 15), None);

        assert_eq!(syllabus.renumber(), vec![(9, 3)]);
        assert_eq!(numbers(&syllabus), vec![(1, 1), (2, 2), (9, 3)]);
        assert_eq!(syllabus.total_number_of_lessons(), 3);
        assert_eq!(syllabus.total_hours(), 1.25);
    }

    #[test]
    fn insert_at_position_shifts_following_lessons() {
        let mut syllabus = Syllabus::new(vec![lesson(1, 1, 5), lesson(2, 2, 5), lesson(3, 3, 5)]);
        syllabus.insert(lesson(4, 0, 5), Some(2));

        assert_eq!(syllabus.renumber(), vec![(4, 2), (2, 3), (3, 4)]);
        assert_eq!(numbers(&syllabus), vec![(1, 1), (4, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn out_of_range_positions_are_clamped() {
        let mut syllabus = Syllabus::new(vec![lesson(1, 1, 5)]);
        syllabus.insert(lesson(2, 0, 5), Some(40));
        syllabus.insert(lesson(3, 0, 5), Some(-2));
        syllabus.renumber();

        assert_eq!(numbers(&syllabus), vec![(3, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn remove_closes_the_gap() {
        let mut syllabus = Syllabus::new(vec![lesson(1, 1, 20), lesson(2, 2, 20), lesson(3, 3, 20)]);
        let removed = syllabus.remove(2).unwrap();

        assert_eq!(removed.id, 2);
        assert_eq!(syllabus.renumber(), vec![(3, 2)]);
        assert_eq!(syllabus.total_hours(), 0.67);
        assert!(syllabus.remove(2).is_none());
    }

    #[test]
    fn replace_moves_lesson_when_position_given() {
        let mut syllabus = Syllabus::new(vec![lesson(1, 1, 5), lesson(2, 2, 5), lesson(3, 3, 5)]);
        let mut moved = lesson(3, 3, 45);
        moved.title = "intro".to_string();

        assert!(syllabus.replace(moved, Some(1)));
        syllabus.renumber();
        assert_eq!(numbers(&syllabus), vec![(3, 1), (1, 2), (2, 3)]);
        assert_eq!(syllabus.get(3).unwrap().title, "intro");
        assert!(!syllabus.replace(lesson(77, 1, 5), None));
    }

    #[test]
    fn empty_syllabus_has_no_hours() {
        let syllabus = Syllabus::default();
        assert!(syllabus.is_empty());
        assert_eq!(syllabus.total_hours(), 0.0);
    }
}
