use crate::db;
use crate::helpers::JsonResponse;
use crate::models::{CommentThread, ReactionTarget};
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "List forum posts.")]
#[get("")]
pub async fn list_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let posts = db::post::fetch_all(pg_pool.get_ref())
        .await
        .map_err(|_err| JsonResponse::<views::post::Summary>::build().internal_server_error(""))?;

    let ids: Vec<i32> = posts.iter().map(|stats| stats.post.id).collect();
    let tallies = db::reaction::tallies(pg_pool.get_ref(), ReactionTarget::Post, &ids)
        .await
        .map_err(|_err| JsonResponse::<views::post::Summary>::build().internal_server_error(""))?;

    let posts = posts
        .into_iter()
        .map(|stats| views::post::Summary {
            tally: tallies.get(&stats.post.id).copied().unwrap_or_default(),
            comments: stats.comments,
            post: stats.post,
        })
        .collect::<Vec<_>>();

    Ok(JsonResponse::build().set_list(posts).ok("OK"))
}

/// The whole thread: post, comments and replies, each with its tally.
#[tracing::instrument(name = "Get forum thread.")]
#[get("/{id}")]
pub async fn thread_handler(
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let post_id = path.0;
    let pool = pg_pool.get_ref();
    let internal = |_err: String| JsonResponse::<views::post::Thread>::build().internal_server_error("");

    let post = db::post::fetch(pool, post_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| JsonResponse::<views::post::Thread>::build().not_found("Post not found"))?;

    let comments = db::comment::fetch_by_parent(pool, CommentThread::Post, post_id)
        .await
        .map_err(internal)?;
    let comment_ids: Vec<i32> = comments.iter().map(|comment| comment.id).collect();

    let replies = db::comment::fetch_by_parents(pool, CommentThread::Reply, &comment_ids)
        .await
        .map_err(internal)?;
    let reply_ids: Vec<i32> = replies.iter().map(|reply| reply.id).collect();

    let tally = db::reaction::tally(pool, ReactionTarget::Post, post_id)
        .await
        .map_err(internal)?;
    let comment_tallies = db::reaction::tallies(pool, ReactionTarget::Comment, &comment_ids)
        .await
        .map_err(internal)?;
    let reply_tallies = db::reaction::tallies(pool, ReactionTarget::Reply, &reply_ids)
        .await
        .map_err(internal)?;

    let thread = views::post::Thread::assemble(
        post,
        tally,
        comments,
        replies,
        &comment_tallies,
        &reply_tallies,
    );
    Ok(JsonResponse::build().set_item(thread).ok("OK"))
}
