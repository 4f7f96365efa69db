use crate::db;
use crate::db::cart::CourseList;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::UserActor;
use crate::routes::ensure_user;
use crate::views;
use actix_web::{delete, get, post, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Get wishlist.")]
#[get("/wishlist")]
pub async fn wishlist_handler(user: UserActor, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::cart::fetch_courses(pg_pool.get_ref(), CourseList::Wishlist, user.id)
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

#[tracing::instrument(name = "Add course to wishlist.")]
#[post("/wishlist/{course_id}")]
pub async fn wishlist_add_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course_id = path.0;
    ensure_user(pg_pool.get_ref(), &user).await?;

    let course = db::course::fetch(pg_pool.get_ref(), course_id)
        .await
        .map_err(|_err| JsonResponse::<()>::build().internal_server_error(""))?;
    if course.is_none() {
        return Err(JsonResponse::<()>::build().not_found("Course not found"));
    }

    match db::cart::add(pg_pool.get_ref(), CourseList::Wishlist, user.id, course_id).await {
        Ok(true) => Ok(JsonResponse::<()>::build().set_id(course_id).ok("Added to wishlist")),
        Ok(false) => Err(JsonResponse::<()>::build().fail("Course is already in wishlist")),
        Err(_) => Err(JsonResponse::<()>::build().internal_server_error("")),
    }
}

#[tracing::instrument(name = "Remove course from wishlist.")]
#[delete("/wishlist/{course_id}")]
pub async fn wishlist_remove_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course_id = path.0;
    match db::cart::remove(pg_pool.get_ref(), CourseList::Wishlist, user.id, course_id).await {
        Ok(true) => Ok(JsonResponse::<()>::build().set_id(course_id).ok("Removed from wishlist")),
        Ok(false) => Err(JsonResponse::<()>::build().fail("Course is not in wishlist")),
        Err(_) => Err(JsonResponse::<()>::build().internal_server_error("")),
    }
}
