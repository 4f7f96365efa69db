use super::owned_course;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::SellerActor;
use crate::models;
use actix_web::{delete, post, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

/// Appends a lesson, or slots it in before the lesson at `position`.
#[tracing::instrument(name = "Add lesson.")]
#[post("/course/{id}/lesson")]
pub async fn lesson_add_handler(
    seller: SellerActor,
    path: web::Path<(i32,)>,
    form: web::Json<forms::lesson::LessonForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Lesson>::build().form_error(errors.to_string()));
    }

    let course = owned_course(pg_pool.get_ref(), &seller, path.0).await?;
    let (lesson, position) = form.into_inner().into_lesson(course.id, 0);

    db::lesson::insert(pg_pool.get_ref(), lesson, position)
        .await
        .map(|lesson| {
            JsonResponse::build()
                .set_id(lesson.id)
                .set_item(lesson)
                .ok("Lesson added")
        })
        .map_err(|err| JsonResponse::<models::Lesson>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Edit lesson.")]
#[put("/course/{id}/lesson/{lesson_id}")]
pub async fn lesson_edit_handler(
    seller: SellerActor,
    path: web::Path<(i32, i32)>,
    form: web::Json<forms::lesson::LessonForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Lesson>::build().form_error(errors.to_string()));
    }

    let (course_id, lesson_id) = path.into_inner();
    let course = owned_course(pg_pool.get_ref(), &seller, course_id).await?;
    let (lesson, position) = form.into_inner().into_lesson(course.id, lesson_id);

    match db::lesson::update(pg_pool.get_ref(), lesson, position).await {
        Ok(Some(lesson)) => Ok(JsonResponse::build().set_item(lesson).ok("Lesson updated")),
        Ok(None) => Err(JsonResponse::<models::Lesson>::build().not_found("Lesson not found")),
        Err(_) => Err(JsonResponse::<models::Lesson>::build().internal_server_error("")),
    }
}

#[tracing::instrument(name = "Delete lesson.")]
#[delete("/course/{id}/lesson/{lesson_id}")]
pub async fn lesson_delete_handler(
    seller: SellerActor,
    path: web::Path<(i32, i32)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (course_id, lesson_id) = path.into_inner();
    let course = owned_course(pg_pool.get_ref(), &seller, course_id).await?;

    match db::lesson::delete(pg_pool.get_ref(), course.id, lesson_id).await {
        Ok(true) => Ok(JsonResponse::<models::Lesson>::build()
            .set_id(lesson_id)
            .ok("Lesson deleted")),
        Ok(false) => Err(JsonResponse::<models::Lesson>::build().not_found("Lesson not found")),
        Err(_) => Err(JsonResponse::<models::Lesson>::build().internal_server_error("")),
    }
}
