use crate::db::reaction;
use crate::models::{self, ReactionTarget};
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Blog>, String> {
    tracing::info!("Fetch blog {}", id);
    sqlx::query_as::<_, models::Blog>(r#"SELECT * FROM blog WHERE id = $1 LIMIT 1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch blog, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::Blog>, String> {
    let query_span = tracing::info_span!("Fetch all blogs.");
    sqlx::query_as::<_, models::Blog>(r#"SELECT * FROM blog ORDER BY created_at DESC, id DESC"#)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch blogs, error: {:?}", err);
            "".to_string()
        })
}

pub async fn insert(pool: &PgPool, mut blog: models::Blog) -> Result<models::Blog, String> {
    let query_span = tracing::info_span!("Saving new blog into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO blog (title, content, category, thumbnail, author, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(&blog.title)
    .bind(&blog.content)
    .bind(&blog.category)
    .bind(&blog.thumbnail)
    .bind(&blog.author)
    .bind(blog.created_at)
    .bind(blog.updated_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        blog.id = id;
        blog
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, blog: models::Blog) -> Result<models::Blog, String> {
    let query_span = tracing::info_span!("Updating blog");
    sqlx::query_as::<_, models::Blog>(
        r#"
        UPDATE blog
        SET title = $2, content = $3, category = $4, thumbnail = $5, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(blog.id)
    .bind(&blog.title)
    .bind(&blog.content)
    .bind(&blog.category)
    .bind(&blog.thumbnail)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to update blog: {:?}", err);
        "".to_string()
    })
}

/// Removes the blog with its comments and reactions. `false` if it did not exist.
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Delete blog", id);
    async {
        let mut tx = pool.begin().await?;
        reaction::delete_for_targets(&mut *tx, ReactionTarget::Blog, &[id]).await?;

        let deleted = sqlx::query(r#"DELETE FROM blog WHERE id = $1"#)
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
        tracing::error!("Failed to delete blog: {:?}", err);
        "".to_string()
    })
}
