use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::UserActor;
use crate::models;
use actix_web::{delete, post, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

async fn own_post(
    pg_pool: &PgPool,
    user: &UserActor,
    post_id: i32,
) -> Result<models::Post, actix_web::Error> {
    db::post::fetch(pg_pool, post_id)
        .await
        .map_err(|_err| JsonResponse::<models::Post>::build().internal_server_error(""))
        .and_then(|post| match post {
            Some(post) if post.user_id == user.id => Ok(post),
            _ => Err(JsonResponse::<models::Post>::build().not_found("Post not found")),
        })
}

#[tracing::instrument(name = "Add forum post.")]
#[post("")]
pub async fn add_handler(
    user: UserActor,
    form: web::Json<forms::post::PostForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Post>::build().form_error(errors.to_string()));
    }

    let profile = db::user::fetch(pg_pool.get_ref(), user.id)
        .await
        .map_err(|_err| JsonResponse::<models::Post>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<models::Post>::build().not_found("User profile not found"))?;

    let now = chrono::Utc::now();
    let mut post = models::Post {
        user_id: profile.id,
        author: profile.name,
        created_at: now,
        updated_at: now,
        ..Default::default()
    };
    form.into_inner().update(&mut post);

    db::post::insert(pg_pool.get_ref(), post)
        .await
        .map(|post| {
            JsonResponse::build()
                .set_id(post.id)
                .set_item(post)
                .ok("Post created")
        })
        .map_err(|err| JsonResponse::<models::Post>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Edit forum post.")]
#[put("/{id}")]
pub async fn edit_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    form: web::Json<forms::post::PostForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Post>::build().form_error(errors.to_string()));
    }

    let mut post = own_post(pg_pool.get_ref(), &user, path.0).await?;
    form.into_inner().update(&mut post);

    db::post::update(pg_pool.get_ref(), post)
        .await
        .map(|post| JsonResponse::build().set_item(post).ok("Post updated"))
        .map_err(|_err| JsonResponse::<models::Post>::build().internal_server_error(""))
}

/// Takes the comments, replies and all their reactions with it.
#[tracing::instrument(name = "Delete forum post.")]
#[delete("/{id}")]
pub async fn delete_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let post = own_post(pg_pool.get_ref(), &user, path.0).await?;

    match db::post::delete(pg_pool.get_ref(), post.id).await {
        Ok(true) => Ok(JsonResponse::<models::Post>::build()
            .set_id(post.id)
            .ok("Post deleted")),
        Ok(false) => Err(JsonResponse::<models::Post>::build().not_found("Post not found")),
        Err(_) => Err(JsonResponse::<models::Post>::build().internal_server_error("")),
    }
}
