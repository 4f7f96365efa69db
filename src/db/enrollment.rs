use crate::models;
use crate::views;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(
    pool: &PgPool,
    user_id: i32,
    course_id: i32,
) -> Result<Option<models::Enrollment>, String> {
    tracing::info!("Fetch enrollment user {} course {}", user_id, course_id);
    sqlx::query_as::<_, models::Enrollment>(
        r#"SELECT * FROM enrollment WHERE user_id = $1 AND course_id = $2 LIMIT 1"#,
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch enrollment, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_user(
    pool: &PgPool,
    user_id: i32,
) -> Result<Vec<views::enrollment::EnrolledCourse>, String> {
    let query_span = tracing::info_span!("Fetch enrollments by user id.");
    sqlx::query_as::<_, views::enrollment::EnrolledCourse>(
        r#"
        SELECT
            c.id AS course_id,
            c.title,
            c.thumbnail,
            c.total_hours,
            c.total_number_of_lessons,
            e.progress,
            e.completed,
            e.completed_date,
            e.currently_in,
            e.created_at AS enrolled_at
        FROM enrollment e
        JOIN course c ON c.id = e.course_id
        WHERE e.user_id = $1
        ORDER BY e.created_at DESC, c.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch enrollments, error: {:?}", err);
        "".to_string()
    })
}

/// Enrolls one course and drops it from cart and wishlist. `false` when the
/// user was already enrolled.
pub async fn insert(pool: &PgPool, enrollment: &models::Enrollment) -> Result<bool, String> {
    let query_span = tracing::info_span!("Saving new enrollment into the database");
    async {
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO enrollment (user_id, course_id, progress, completed, currently_in, created_at)
            VALUES ($1, $2, 0, FALSE, 0, $3)
            ON CONFLICT (user_id, course_id) DO NOTHING
            "#,
        )
        .bind(enrollment.user_id)
        .bind(enrollment.course_id)
        .bind(enrollment.created_at)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        for table in ["cart", "wishlist"] {
            sqlx::query(&format!(
                "DELETE FROM {} WHERE user_id = $1 AND course_id = $2",
                table
            ))
            .bind(enrollment.user_id)
            .bind(enrollment.course_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok::<_, sqlx::Error>(inserted)
    }
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

/// Purchase: enrolls every course in the cart and empties it in one
/// transaction. Returns the ids of the courses that got enrolled.
pub async fn checkout(pool: &PgPool, user_id: i32) -> Result<Vec<i32>, String> {
    let query_span = tracing::info_span!("Checkout user's cart", user_id);
    async {
        let mut tx = pool.begin().await?;

        let course_ids = sqlx::query_scalar::<_, i32>(
            r#"DELETE FROM cart WHERE user_id = $1 RETURNING course_id"#,
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        let enrolled = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO enrollment (user_id, course_id, progress, completed, currently_in, created_at)
            SELECT $1, course_id, 0, FALSE, 0, NOW() FROM UNNEST($2::int4[]) AS course_id
            ON CONFLICT (user_id, course_id) DO NOTHING
            RETURNING course_id
            "#,
        )
        .bind(user_id)
        .bind(&course_ids)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query(r#"DELETE FROM wishlist WHERE user_id = $1 AND course_id = ANY($2)"#)
            .bind(user_id)
            .bind(&enrolled)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok::<_, sqlx::Error>(enrolled)
    }
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to checkout: {:?}", err);
        "".to_string()
    })
}

/// Progress and completion only move forward, even when two updates race.
pub async fn update_progress(pool: &PgPool, enrollment: &models::Enrollment) -> Result<(), String> {
    let query_span = tracing::info_span!("Updating enrollment progress");
    sqlx::query(
        r#"
        UPDATE enrollment
        SET
            progress = GREATEST(progress, $3),
            completed = completed OR $4,
            completed_date = COALESCE(completed_date, $5),
            currently_in = $6
        WHERE user_id = $1 AND course_id = $2
        "#,
    )
    .bind(enrollment.user_id)
    .bind(enrollment.course_id)
    .bind(enrollment.progress)
    .bind(enrollment.completed)
    .bind(enrollment.completed_date)
    .bind(enrollment.currently_in)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "".to_string()
    })
}
