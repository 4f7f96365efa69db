use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models::CommentThread;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Browse course catalogue.")]
#[get("")]
pub async fn list_handler(
    query: web::Query<forms::course::CatalogQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::course::fetch_catalog(pg_pool.get_ref(), query.category(), query.search())
        .await
        .map(|courses| {
            let courses = courses
                .into_iter()
                .map(Into::into)
                .collect::<Vec<views::course::Listing>>();

            JsonResponse::build().set_list(courses).ok("OK")
        })
        .map_err(|_err| JsonResponse::<views::course::Listing>::build().internal_server_error(""))
}

#[tracing::instrument(name = "Get course detail.")]
#[get("/{id}")]
pub async fn detail_handler(
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course_id = path.0;
    let course = db::course::fetch(pg_pool.get_ref(), course_id)
        .await
        .map_err(|_err| JsonResponse::<views::course::Detail>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<views::course::Detail>::build().not_found("Course not found"))?;

    let lessons = db::lesson::fetch_by_course(pg_pool.get_ref(), course_id)
        .await
        .map_err(|_err| JsonResponse::<views::course::Detail>::build().internal_server_error(""))?;

    let comments = db::comment::fetch_by_parent(pg_pool.get_ref(), CommentThread::Course, course_id)
        .await
        .map_err(|_err| JsonResponse::<views::course::Detail>::build().internal_server_error(""))?;

    Ok(JsonResponse::build()
        .set_item(views::course::Detail::new(course, lessons, comments))
        .ok("OK"))
}
