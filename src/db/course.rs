use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Course>, String> {
    tracing::info!("Fetch course {}", id);
    sqlx::query_as::<_, models::Course>(r#"SELECT * FROM course WHERE id = $1 LIMIT 1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch course, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// Public catalogue, newest first. Both filters are optional.
pub async fn fetch_catalog(
    pool: &PgPool,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<Vec<models::Course>, String> {
    let query_span = tracing::info_span!("Fetch course catalogue.", ?category, ?search);
    sqlx::query_as::<_, models::Course>(
        r#"
        SELECT *
        FROM course
        WHERE ($1::text IS NULL OR category = $1)
          AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(category)
    .bind(search)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch courses, error: {:?}", err);
        "".to_string()
    })
}

pub async fn fetch_by_seller(
    pool: &PgPool,
    seller_id: i32,
) -> Result<Vec<models::CourseStats>, String> {
    let query_span = tracing::info_span!("Fetch courses by seller id.");
    sqlx::query_as::<_, models::CourseStats>(
        r#"
        SELECT c.*, COUNT(e.user_id) AS students
        FROM course c
        LEFT JOIN enrollment e ON e.course_id = c.id
        WHERE c.seller_id = $1
        GROUP BY c.id
        ORDER BY c.created_at DESC, c.id DESC
        "#,
    )
    .bind(seller_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch seller courses, error: {:?}", err);
        "".to_string()
    })
}

pub async fn insert(pool: &PgPool, mut course: models::Course) -> Result<models::Course, String> {
    let query_span = tracing::info_span!("Saving new course into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO course (seller_id, title, description, category, level, language,
            thumbnail, price, discount, total_hours, total_number_of_lessons,
            created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, 0, NOW(), NOW())
        RETURNING id
        "#,
    )
    .bind(course.seller_id)
    .bind(&course.title)
    .bind(&course.description)
    .bind(&course.category)
    .bind(&course.level)
    .bind(&course.language)
    .bind(&course.thumbnail)
    .bind(course.price)
    .bind(course.discount)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        course.id = id;
        course
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

/// Saves the seller-editable fields. Derived totals are only written by the
/// lesson functions.
pub async fn update(pool: &PgPool, course: models::Course) -> Result<models::Course, String> {
    let query_span = tracing::info_span!("Updating course");
    sqlx::query_as::<_, models::Course>(
        r#"
        UPDATE course
        SET
            title = $2,
            description = $3,
            category = $4,
            level = $5,
            language = $6,
            thumbnail = $7,
            price = $8,
            discount = $9,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(course.id)
    .bind(&course.title)
    .bind(&course.description)
    .bind(&course.category)
    .bind(&course.level)
    .bind(&course.language)
    .bind(&course.thumbnail)
    .bind(course.price)
    .bind(course.discount)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "".to_string()
    })
}

#[tracing::instrument(name = "Delete seller's course.", skip(pool))]
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, String> {
    // lessons, comments, enrollments, cart and wishlist rows cascade
    sqlx::query(r#"DELETE FROM course WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete course: {:?}", err);
            "".to_string()
        })
}
