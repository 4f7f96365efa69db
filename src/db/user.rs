use crate::db::InsertError;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::User>, String> {
    tracing::info!("Fetch user {}", id);
    sqlx::query_as::<_, models::User>(r#"SELECT * FROM users WHERE id = $1 LIMIT 1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch user, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_email(pool: &PgPool, email: &str) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by email.");
    sqlx::query_as::<_, models::User>(r#"SELECT * FROM users WHERE email = $1 LIMIT 1"#)
        .bind(email)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch user by email, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// `InsertError::Duplicate` when the email is already registered.
pub async fn insert(
    pool: &PgPool,
    mut user: models::User,
) -> Result<models::User, InsertError> {
    let query_span = tracing::info_span!("Saving new user into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO users (name, email, avatar, bio, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.avatar)
    .bind(&user.bio)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        user.id = id;
        user
    })
    .map_err(InsertError::from)
}

pub async fn update(pool: &PgPool, user: models::User) -> Result<models::User, String> {
    let query_span = tracing::info_span!("Updating user profile");
    sqlx::query_as::<_, models::User>(
        r#"
        UPDATE users
        SET
            name = $2,
            avatar = $3,
            bio = $4,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.avatar)
    .bind(&user.bio)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "".to_string()
    })
}

pub async fn exists(pool: &PgPool, id: i32) -> Result<bool, String> {
    sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)"#)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to check user existence, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}
