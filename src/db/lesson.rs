use crate::models::{self, Syllabus};
use sqlx::{PgConnection, PgPool};
use tracing::Instrument;

pub async fn fetch_by_course(pool: &PgPool, course_id: i32) -> Result<Vec<models::Lesson>, String> {
    let query_span = tracing::info_span!("Fetch lessons by course id.");
    sqlx::query_as::<_, models::Lesson>(
        r#"SELECT * FROM lesson WHERE course_id = $1 ORDER BY lesson_number, id"#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch lessons, error: {:?}", err);
        "".to_string()
    })
}

/// Locks the course row and loads its lessons, so concurrent lesson edits of
/// one course are applied one after another.
async fn lock_syllabus(conn: &mut PgConnection, course_id: i32) -> Result<Syllabus, sqlx::Error> {
    sqlx::query(r#"SELECT id FROM course WHERE id = $1 FOR UPDATE"#)
        .bind(course_id)
        .execute(&mut *conn)
        .await?;

    let lessons = sqlx::query_as::<_, models::Lesson>(
        r#"SELECT * FROM lesson WHERE course_id = $1 ORDER BY lesson_number, id"#,
    )
    .bind(course_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Syllabus::new(lessons))
}

/// Writes changed lesson numbers and the derived course totals.
async fn save_syllabus(
    conn: &mut PgConnection,
    course_id: i32,
    syllabus: &mut Syllabus,
) -> Result<(), sqlx::Error> {
    for (lesson_id, number) in syllabus.renumber() {
        sqlx::query(r#"UPDATE lesson SET lesson_number = $2 WHERE id = $1"#)
            .bind(lesson_id)
            .bind(number)
            .execute(&mut *conn)
            .await?;
    }

    sqlx::query(
        r#"
        UPDATE course
        SET total_hours = $2, total_number_of_lessons = $3, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(course_id)
    .bind(syllabus.total_hours())
    .bind(syllabus.total_number_of_lessons())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Adds a lesson before `position` (or at the end) and renumbers the course.
pub async fn insert(
    pool: &PgPool,
    mut lesson: models::Lesson,
    position: Option<i32>,
) -> Result<models::Lesson, String> {
    let query_span = tracing::info_span!("Saving new lesson into the database");
    async {
        let mut tx = pool.begin().await?;
        let course_id = lesson.course_id;
        let mut syllabus = lock_syllabus(&mut *tx, course_id).await?;

        lesson.id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO lesson (course_id, lesson_number, title, description, video_url, duration_minutes)
            VALUES ($1, 0, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(lesson.course_id)
        .bind(&lesson.title)
        .bind(&lesson.description)
        .bind(&lesson.video_url)
        .bind(lesson.duration_minutes)
        .fetch_one(&mut *tx)
        .await?;
        lesson.lesson_number = 0;

        let lesson_id = lesson.id;
        syllabus.insert(lesson, position);
        save_syllabus(&mut *tx, course_id, &mut syllabus).await?;
        tx.commit().await?;

        Ok::<_, sqlx::Error>(syllabus.get(lesson_id).cloned().unwrap_or_default())
    }
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to insert lesson: {:?}", err);
        "Failed to insert".to_string()
    })
}

/// Saves lesson fields, optionally moving it to `position`. `None` when the
/// lesson does not belong to the course.
pub async fn update(
    pool: &PgPool,
    lesson: models::Lesson,
    position: Option<i32>,
) -> Result<Option<models::Lesson>, String> {
    let query_span = tracing::info_span!("Updating lesson");
    async {
        let mut tx = pool.begin().await?;
        let course_id = lesson.course_id;
        let lesson_id = lesson.id;
        let mut syllabus = lock_syllabus(&mut *tx, course_id).await?;

        let number = match syllabus.get(lesson_id) {
            Some(current) => current.lesson_number,
            None => return Ok(None),
        };

        sqlx::query(
            r#"
            UPDATE lesson
            SET title = $2, description = $3, video_url = $4, duration_minutes = $5
            WHERE id = $1
            "#,
        )
        .bind(lesson.id)
        .bind(&lesson.title)
        .bind(&lesson.description)
        .bind(&lesson.video_url)
        .bind(lesson.duration_minutes)
        .execute(&mut *tx)
        .await?;

        syllabus.replace(
            models::Lesson {
                lesson_number: number,
                ..lesson
            },
            position,
        );
        save_syllabus(&mut *tx, course_id, &mut syllabus).await?;
        tx.commit().await?;

        Ok::<_, sqlx::Error>(syllabus.get(lesson_id).cloned())
    }
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to update lesson: {:?}", err);
        "".to_string()
    })
}

/// Removes a lesson and closes the gap. `false` when the lesson does not
/// belong to the course.
pub async fn delete(pool: &PgPool, course_id: i32, lesson_id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Delete lesson", course_id, lesson_id);
    async {
        let mut tx = pool.begin().await?;
        let mut syllabus = lock_syllabus(&mut *tx, course_id).await?;

        if syllabus.remove(lesson_id).is_none() {
            return Ok(false);
        }

        sqlx::query(r#"DELETE FROM lesson WHERE id = $1"#)
            .bind(lesson_id)
            .execute(&mut *tx)
            .await?;

        save_syllabus(&mut *tx, course_id, &mut syllabus).await?;
        tx.commit().await?;

        Ok::<_, sqlx::Error>(true)
    }
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to delete lesson: {:?}", err);
        "".to_string()
    })
}
