use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

/// The two user-owned course lists. Same shape, separate lifecycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseList {
    Wishlist,
    Cart,
}

impl CourseList {
    fn table(&self) -> &'static str {
        match self {
            CourseList::Wishlist => "wishlist",
            CourseList::Cart => "cart",
        }
    }
}

pub async fn fetch_courses(
    pool: &PgPool,
    list: CourseList,
    user_id: i32,
) -> Result<Vec<models::Course>, String> {
    let query_span = tracing::info_span!("Fetch user's course list.", list = list.table(), user_id);
    let sql = format!(
        r#"
        SELECT c.*
        FROM {table} l
        JOIN course c ON c.id = l.course_id
        WHERE l.user_id = $1
        ORDER BY l.created_at, c.id
        "#,
        table = list.table(),
    );

    sqlx::query_as::<_, models::Course>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch {}, error: {:?}", list.table(), err);
            "".to_string()
        })
}

/// `false` when the course is already on the list.
pub async fn add(pool: &PgPool, list: CourseList, user_id: i32, course_id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Add course to list.", list = list.table(), user_id, course_id);
    let sql = format!(
        r#"
        INSERT INTO {} (user_id, course_id, created_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (user_id, course_id) DO NOTHING
        "#,
        list.table()
    );

    sqlx::query(&sql)
        .bind(user_id)
        .bind(course_id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() == 1)
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to insert".to_string()
        })
}

/// `false` when the course was not on the list.
pub async fn remove(pool: &PgPool, list: CourseList, user_id: i32, course_id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Remove course from list.", list = list.table(), user_id, course_id);
    let sql = format!("DELETE FROM {} WHERE user_id = $1 AND course_id = $2", list.table());

    sqlx::query(&sql)
        .bind(user_id)
        .bind(course_id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() == 1)
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "".to_string()
        })
}
