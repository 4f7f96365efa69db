use crate::db;
use crate::helpers::JsonResponse;
use crate::models::{CommentThread, ReactionTarget};
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "List blogs.")]
#[get("")]
pub async fn list_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let blogs = db::blog::fetch_all(pg_pool.get_ref())
        .await
        .map_err(|_err| JsonResponse::<views::blog::Listing>::build().internal_server_error(""))?;

    let ids: Vec<i32> = blogs.iter().map(|blog| blog.id).collect();
    let tallies = db::reaction::tallies(pg_pool.get_ref(), ReactionTarget::Blog, &ids)
        .await
        .map_err(|_err| JsonResponse::<views::blog::Listing>::build().internal_server_error(""))?;

    let blogs = blogs
        .into_iter()
        .map(|blog| views::blog::Listing {
            tally: tallies.get(&blog.id).copied().unwrap_or_default(),
            blog,
        })
        .collect::<Vec<_>>();

    Ok(JsonResponse::build().set_list(blogs).ok("OK"))
}

#[tracing::instrument(name = "Get blog.")]
#[get("/{id}")]
pub async fn detail_handler(
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let blog_id = path.0;
    let blog = db::blog::fetch(pg_pool.get_ref(), blog_id)
        .await
        .map_err(|_err| JsonResponse::<views::blog::Detail>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<views::blog::Detail>::build().not_found("Blog not found"))?;

    let tally = db::reaction::tally(pg_pool.get_ref(), ReactionTarget::Blog, blog_id)
        .await
        .map_err(|_err| JsonResponse::<views::blog::Detail>::build().internal_server_error(""))?;

    let comments = db::comment::fetch_by_parent(pg_pool.get_ref(), CommentThread::Blog, blog_id)
        .await
        .map_err(|_err| JsonResponse::<views::blog::Detail>::build().internal_server_error(""))?;

    Ok(JsonResponse::build()
        .set_item(views::blog::Detail {
            blog,
            tally,
            comments,
        })
        .ok("OK"))
}
