use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::UserActor;
use crate::models::{self, CommentThread};
use crate::routes::ensure_user;
use actix_web::{delete, post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Comment on blog.")]
#[post("/{id}/comment")]
pub async fn comment_add_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    form: web::Json<forms::comment::CommentForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Comment>::build().form_error(errors.to_string()));
    }

    let blog_id = path.0;
    ensure_user(pg_pool.get_ref(), &user).await?;

    let blog = db::blog::fetch(pg_pool.get_ref(), blog_id)
        .await
        .map_err(|_err| JsonResponse::<models::Comment>::build().internal_server_error(""))?;
    if blog.is_none() {
        return Err(JsonResponse::<models::Comment>::build().not_found("Blog not found"));
    }

    db::comment::insert(pg_pool.get_ref(), CommentThread::Blog, blog_id, user.id, &form.content)
        .await
        .map(|comment| {
            JsonResponse::build()
                .set_id(comment.id)
                .set_item(comment)
                .ok("Comment added")
        })
        .map_err(|err| JsonResponse::<models::Comment>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Delete blog comment.")]
#[delete("/{id}/comment/{comment_id}")]
pub async fn comment_delete_handler(
    user: UserActor,
    path: web::Path<(i32, i32)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (blog_id, comment_id) = path.into_inner();
    let comment = db::comment::fetch(pg_pool.get_ref(), CommentThread::Blog, comment_id)
        .await
        .map_err(|_err| JsonResponse::<models::Comment>::build().internal_server_error(""))?;

    match comment {
        Some(comment) if comment.parent_id == blog_id && comment.user_id == user.id => {}
        _ => return Err(JsonResponse::<models::Comment>::build().not_found("Comment not found")),
    }

    db::comment::delete(pg_pool.get_ref(), CommentThread::Blog, comment_id)
        .await
        .map(|_| {
            JsonResponse::<models::Comment>::build()
                .set_id(comment_id)
                .ok("Comment deleted")
        })
        .map_err(|_err| JsonResponse::<models::Comment>::build().internal_server_error(""))
}
