use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::UserActor;
use crate::models::{self, CommentThread};
use crate::routes::ensure_user;
use actix_web::{delete, post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

/// Loads a forum comment or reply written by the caller.
async fn own_comment(
    pg_pool: &PgPool,
    thread: CommentThread,
    user: &UserActor,
    id: i32,
) -> Result<models::Comment, actix_web::Error> {
    let not_found = if thread == CommentThread::Reply {
        "Reply not found"
    } else {
        "Comment not found"
    };

    db::comment::fetch(pg_pool, thread, id)
        .await
        .map_err(|_err| JsonResponse::<models::Comment>::build().internal_server_error(""))
        .and_then(|comment| match comment {
            Some(comment) if comment.user_id == user.id => Ok(comment),
            _ => Err(JsonResponse::<models::Comment>::build().not_found(not_found)),
        })
}

async fn add(
    pg_pool: &PgPool,
    thread: CommentThread,
    parent_id: i32,
    user: &UserActor,
    form: forms::comment::CommentForm,
) -> Result<web::Json<JsonResponse<models::Comment>>> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Comment>::build().form_error(errors.to_string()));
    }

    ensure_user(pg_pool, user).await?;

    db::comment::insert(pg_pool, thread, parent_id, user.id, &form.content)
        .await
        .map(|comment| {
            JsonResponse::build()
                .set_id(comment.id)
                .set_item(comment)
                .ok("Comment added")
        })
        .map_err(|err| JsonResponse::<models::Comment>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Comment on forum post.")]
#[post("/{id}/comment")]
pub async fn comment_add_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    form: web::Json<forms::comment::CommentForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let post_id = path.0;
    let post = db::post::fetch(pg_pool.get_ref(), post_id)
        .await
        .map_err(|_err| JsonResponse::<models::Comment>::build().internal_server_error(""))?;
    if post.is_none() {
        return Err(JsonResponse::<models::Comment>::build().not_found("Post not found"));
    }

    add(pg_pool.get_ref(), CommentThread::Post, post_id, &user, form.into_inner()).await
}

/// Removes the comment, its replies and their reactions.
#[tracing::instrument(name = "Delete forum comment.")]
#[delete("/comment/{comment_id}")]
pub async fn comment_delete_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let comment = own_comment(pg_pool.get_ref(), CommentThread::Post, &user, path.0).await?;

    db::post::delete_comment(pg_pool.get_ref(), comment.id)
        .await
        .map(|_| {
            JsonResponse::<models::Comment>::build()
                .set_id(comment.id)
                .ok("Comment deleted")
        })
        .map_err(|_err| JsonResponse::<models::Comment>::build().internal_server_error(""))
}

#[tracing::instrument(name = "Reply to forum comment.")]
#[post("/comment/{comment_id}/reply")]
pub async fn reply_add_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    form: web::Json<forms::comment::CommentForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let comment_id = path.0;
    let comment = db::comment::fetch(pg_pool.get_ref(), CommentThread::Post, comment_id)
        .await
        .map_err(|_err| JsonResponse::<models::Comment>::build().internal_server_error(""))?;
    if comment.is_none() {
        return Err(JsonResponse::<models::Comment>::build().not_found("Comment not found"));
    }

    add(pg_pool.get_ref(), CommentThread::Reply, comment_id, &user, form.into_inner()).await
}

#[tracing::instrument(name = "Delete reply.")]
#[delete("/reply/{reply_id}")]
pub async fn reply_delete_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let reply = own_comment(pg_pool.get_ref(), CommentThread::Reply, &user, path.0).await?;

    db::post::delete_reply(pg_pool.get_ref(), reply.id)
        .await
        .map(|_| {
            JsonResponse::<models::Comment>::build()
                .set_id(reply.id)
                .ok("Reply deleted")
        })
        .map_err(|_err| JsonResponse::<models::Comment>::build().internal_server_error(""))
}
