use crate::db::InsertError;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Seller>, String> {
    tracing::info!("Fetch seller {}", id);
    sqlx::query_as::<_, models::Seller>(r#"SELECT * FROM seller WHERE id = $1 LIMIT 1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch seller, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_email(pool: &PgPool, email: &str) -> Result<Option<models::Seller>, String> {
    let query_span = tracing::info_span!("Fetch seller by email.");
    sqlx::query_as::<_, models::Seller>(r#"SELECT * FROM seller WHERE email = $1 LIMIT 1"#)
        .bind(email)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch seller by email, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// `InsertError::Duplicate` when the email is already registered.
pub async fn insert(
    pool: &PgPool,
    mut seller: models::Seller,
) -> Result<models::Seller, InsertError> {
    let query_span = tracing::info_span!("Saving new seller into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO seller (name, email, headline, avatar, bio, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(&seller.name)
    .bind(&seller.email)
    .bind(&seller.headline)
    .bind(&seller.avatar)
    .bind(&seller.bio)
    .bind(seller.created_at)
    .bind(seller.updated_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        seller.id = id;
        seller
    })
    .map_err(InsertError::from)
}

pub async fn update(pool: &PgPool, seller: models::Seller) -> Result<models::Seller, String> {
    let query_span = tracing::info_span!("Updating seller profile");
    sqlx::query_as::<_, models::Seller>(
        r#"
        UPDATE seller
        SET
            name = $2,
            headline = $3,
            avatar = $4,
            bio = $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(seller.id)
    .bind(&seller.name)
    .bind(&seller.headline)
    .bind(&seller.avatar)
    .bind(&seller.bio)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "".to_string()
    })
}
