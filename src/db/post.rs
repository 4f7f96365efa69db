use crate::db::reaction;
use crate::models::{self, ReactionTarget};
use sqlx::{PgConnection, PgPool};
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Post>, String> {
    tracing::info!("Fetch post {}", id);
    sqlx::query_as::<_, models::Post>(
        r#"
        SELECT p.id, p.user_id, u.name AS author, p.title, p.content, p.created_at, p.updated_at
        FROM post p
        JOIN users u ON u.id = p.user_id
        WHERE p.id = $1
        LIMIT 1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch post, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Every post, newest first, with its comment count.
pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::PostStats>, String> {
    let query_span = tracing::info_span!("Fetch all posts.");
    sqlx::query_as::<_, models::PostStats>(
        r#"
        SELECT p.id, p.user_id, u.name AS author, p.title, p.content, p.created_at, p.updated_at,
            (SELECT COUNT(*) FROM post_comment c WHERE c.post_id = p.id) AS comments
        FROM post p
        JOIN users u ON u.id = p.user_id
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch posts, error: {:?}", err);
        "".to_string()
    })
}

pub async fn insert(pool: &PgPool, mut post: models::Post) -> Result<models::Post, String> {
    let query_span = tracing::info_span!("Saving new post into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO post (user_id, title, content, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(post.user_id)
    .bind(&post.title)
    .bind(&post.content)
    .bind(post.created_at)
    .bind(post.updated_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        post.id = id;
        post
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, post: models::Post) -> Result<models::Post, String> {
    let query_span = tracing::info_span!("Updating post");
    sqlx::query_scalar::<_, chrono::DateTime<chrono::Utc>>(
        r#"
        UPDATE post
        SET title = $2, content = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING updated_at
        "#,
    )
    .bind(post.id)
    .bind(&post.title)
    .bind(&post.content)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |updated_at| models::Post { updated_at, ..post })
    .map_err(|err| {
        tracing::error!("Failed to update post: {:?}", err);
        "".to_string()
    })
}

async fn reply_ids(conn: &mut PgConnection, comment_ids: &[i32]) -> Result<Vec<i32>, sqlx::Error> {
    if comment_ids.is_empty() {
        return Ok(vec![]);
    }

    sqlx::query_scalar::<_, i32>(r#"SELECT id FROM comment_reply WHERE comment_id = ANY($1)"#)
        .bind(comment_ids)
        .fetch_all(&mut *conn)
        .await
}

/// Removes the post, its comments and their replies together with every
/// reaction on any of them.
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Delete post", id);
    async {
        let mut tx = pool.begin().await?;

        let comment_ids =
            sqlx::query_scalar::<_, i32>(r#"SELECT id FROM post_comment WHERE post_id = $1"#)
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;
        let reply_ids = reply_ids(&mut *tx, &comment_ids).await?;

        reaction::delete_for_targets(&mut *tx, ReactionTarget::Reply, &reply_ids).await?;
        reaction::delete_for_targets(&mut *tx, ReactionTarget::Comment, &comment_ids).await?;
        reaction::delete_for_targets(&mut *tx, ReactionTarget::Post, &[id]).await?;

        let deleted = sqlx::query(r#"DELETE FROM post WHERE id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;
        tx.commit().await?;

        Ok::<_, sqlx::Error>(deleted)
    }
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to delete post: {:?}", err);
        "".to_string()
    })
}

/// Removes a forum comment, its replies and their reactions.
pub async fn delete_comment(pool: &PgPool, comment_id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Delete forum comment", comment_id);
    async {
        let mut tx = pool.begin().await?;

        let reply_ids = reply_ids(&mut *tx, &[comment_id]).await?;
        reaction::delete_for_targets(&mut *tx, ReactionTarget::Reply, &reply_ids).await?;
        reaction::delete_for_targets(&mut *tx, ReactionTarget::Comment, &[comment_id]).await?;

        let deleted = sqlx::query(r#"DELETE FROM post_comment WHERE id = $1"#)
            .bind(comment_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;
        tx.commit().await?;

        Ok::<_, sqlx::Error>(deleted)
    }
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to delete comment: {:?}", err);
        "".to_string()
    })
}

pub async fn delete_reply(pool: &PgPool, reply_id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Delete reply", reply_id);
    async {
        let mut tx = pool.begin().await?;
        reaction::delete_for_targets(&mut *tx, ReactionTarget::Reply, &[reply_id]).await?;

        let deleted = sqlx::query(r#"DELETE FROM comment_reply WHERE id = $1"#)
            .bind(reply_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;
        tx.commit().await?;

        Ok::<_, sqlx::Error>(deleted)
    }
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to delete reply: {:?}", err);
        "".to_string()
    })
}
