use super::owned_course;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::SellerActor;
use crate::models;
use crate::views;
use actix_web::{delete, get, post, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Add course.")]
#[post("/course")]
pub async fn course_add_handler(
    seller: SellerActor,
    form: web::Json<forms::course::CourseForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Course>::build().form_error(errors.to_string()));
    }

    let profile = db::seller::fetch(pg_pool.get_ref(), seller.id)
        .await
        .map_err(|_err| JsonResponse::<models::Course>::build().internal_server_error(""))?;
    if profile.is_none() {
        return Err(JsonResponse::<models::Course>::build().not_found("Seller profile not found"));
    }

    let course = form.into_inner().into_course(seller.id);
    db::course::insert(pg_pool.get_ref(), course)
        .await
        .map(|course| {
            JsonResponse::build()
                .set_id(course.id)
                .set_item(course)
                .ok("Course created")
        })
        .map_err(|err| JsonResponse::<models::Course>::build().internal_server_error(err))
}

#[tracing::instrument(name = "List own courses.")]
#[get("/course")]
pub async fn course_list_handler(
    seller: SellerActor,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::course::fetch_by_seller(pg_pool.get_ref(), seller.id)
        .await
        .map(|courses| {
            let courses = courses
                .into_iter()
                .map(Into::into)
                .collect::<Vec<views::course::Owned>>();

            JsonResponse::build().set_list(courses).ok("OK")
        })
        .map_err(|_err| JsonResponse::<views::course::Owned>::build().internal_server_error(""))
}

#[tracing::instrument(name = "Get own course.")]
#[get("/course/{id}")]
pub async fn course_get_handler(
    seller: SellerActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course = owned_course(pg_pool.get_ref(), &seller, path.0).await?;
    let lessons = db::lesson::fetch_by_course(pg_pool.get_ref(), course.id)
        .await
        .map_err(|_err| JsonResponse::<views::course::Owned>::build().internal_server_error(""))?;

    Ok(JsonResponse::build()
        .set_item(views::course::Owned::with_lessons(course, lessons))
        .ok("OK"))
}

#[tracing::instrument(name = "Edit course.")]
#[put("/course/{id}")]
pub async fn course_edit_handler(
    seller: SellerActor,
    path: web::Path<(i32,)>,
    form: web::Json<forms::course::CourseForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Course>::build().form_error(errors.to_string()));
    }

    let mut course = owned_course(pg_pool.get_ref(), &seller, path.0).await?;
    form.into_inner().update(&mut course);

    db::course::update(pg_pool.get_ref(), course)
        .await
        .map(|course| JsonResponse::build().set_item(course).ok("Course updated"))
        .map_err(|_err| JsonResponse::<models::Course>::build().internal_server_error(""))
}

#[tracing::instrument(name = "Delete course.")]
#[delete("/course/{id}")]
pub async fn course_delete_handler(
    seller: SellerActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course = owned_course(pg_pool.get_ref(), &seller, path.0).await?;

    match db::course::delete(pg_pool.get_ref(), course.id).await {
        Ok(true) => Ok(JsonResponse::<models::Course>::build()
            .set_id(course.id)
            .ok("Course deleted")),
        Ok(false) => Err(JsonResponse::<models::Course>::build().not_found("Course not found")),
        Err(_) => Err(JsonResponse::<models::Course>::build().internal_server_error("")),
    }
}
