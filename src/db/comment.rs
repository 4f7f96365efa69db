use crate::models::{self, CommentThread};
use sqlx::PgPool;
use tracing::Instrument;

fn select_sql(thread: CommentThread, filter: &str) -> String {
    format!(
        r#"
        SELECT c.id, c.{parent} AS parent_id, c.user_id, u.name AS author, c.content, c.created_at
        FROM {table} c
        JOIN users u ON u.id = c.user_id
        WHERE {filter}
        ORDER BY c.created_at, c.id
        "#,
        parent = thread.parent_column(),
        table = thread.table(),
        filter = filter,
    )
}

pub async fn fetch(
    pool: &PgPool,
    thread: CommentThread,
    id: i32,
) -> Result<Option<models::Comment>, String> {
    tracing::info!("Fetch {} {}", thread.table(), id);
    sqlx::query_as::<_, models::Comment>(&select_sql(thread, "c.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch comment, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_parent(
    pool: &PgPool,
    thread: CommentThread,
    parent_id: i32,
) -> Result<Vec<models::Comment>, String> {
    let query_span = tracing::info_span!("Fetch comments by parent.", table = thread.table(), parent_id);
    let filter = format!("c.{} = $1", thread.parent_column());
    sqlx::query_as::<_, models::Comment>(&select_sql(thread, &filter))
        .bind(parent_id)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch comments, error: {:?}", err);
            "".to_string()
        })
}

/// Comments of several parents at once, e.g. the replies of a whole thread.
pub async fn fetch_by_parents(
    pool: &PgPool,
    thread: CommentThread,
    parent_ids: &[i32],
) -> Result<Vec<models::Comment>, String> {
    if parent_ids.is_empty() {
        return Ok(vec![]);
    }

    let query_span = tracing::info_span!("Fetch comments by parents.", table = thread.table());
    let filter = format!("c.{} = ANY($1)", thread.parent_column());
    sqlx::query_as::<_, models::Comment>(&select_sql(thread, &filter))
        .bind(parent_ids)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch comments, error: {:?}", err);
            "".to_string()
        })
}

pub async fn insert(
    pool: &PgPool,
    thread: CommentThread,
    parent_id: i32,
    user_id: i32,
    content: &str,
) -> Result<models::Comment, String> {
    let query_span = tracing::info_span!("Saving new comment into the database", table = thread.table());
    let sql = format!(
        r#"
        WITH inserted AS (
            INSERT INTO {table} ({parent}, user_id, content, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING *
        )
        SELECT c.id, c.{parent} AS parent_id, c.user_id, u.name AS author, c.content, c.created_at
        FROM inserted c
        JOIN users u ON u.id = c.user_id
        "#,
        table = thread.table(),
        parent = thread.parent_column(),
    );

    sqlx::query_as::<_, models::Comment>(&sql)
        .bind(parent_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to insert".to_string()
        })
}

/// Course and blog comments carry no reactions; forum comments and replies
/// are removed through `db::post`.
pub async fn delete(pool: &PgPool, thread: CommentThread, id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Delete comment", table = thread.table(), id);
    sqlx::query(&format!("DELETE FROM {} WHERE id = $1", thread.table()))
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete comment: {:?}", err);
            "".to_string()
        })
}
