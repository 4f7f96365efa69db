use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::UserActor;
use crate::models;
use crate::routes::ensure_user;
use crate::views;
use actix_web::{get, post, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

/// Buy now: enrolls a single course without going through the cart.
#[tracing::instrument(name = "Enroll in course.")]
#[post("/enrollment/{course_id}")]
pub async fn enroll_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course_id = path.0;
    ensure_user(pg_pool.get_ref(), &user).await?;

    let course = db::course::fetch(pg_pool.get_ref(), course_id)
        .await
        .map_err(|_err| JsonResponse::<models::Enrollment>::build().internal_server_error(""))?;
    if course.is_none() {
        return Err(JsonResponse::<models::Enrollment>::build().not_found("Course not found"));
    }

    let enrollment = models::Enrollment::new(user.id, course_id);
    match db::enrollment::insert(pg_pool.get_ref(), &enrollment).await {
        Ok(true) => Ok(JsonResponse::build()
            .set_id(course_id)
            .set_item(enrollment)
            .ok("Enrolled")),
        Ok(false) => Err(JsonResponse::<models::Enrollment>::build()
            .fail("You are already enrolled in this course")),
        Err(err) => Err(JsonResponse::<models::Enrollment>::build().internal_server_error(err)),
    }
}

#[tracing::instrument(name = "List enrollments.")]
#[get("/enrollment")]
pub async fn list_handler(user: UserActor, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::enrollment::fetch_by_user(pg_pool.get_ref(), user.id)
        .await
        .map(|list| JsonResponse::build().set_list(list).ok("OK"))
        .map_err(|_err| {
            JsonResponse::<views::enrollment::EnrolledCourse>::build().internal_server_error("")
        })
}

#[tracing::instrument(name = "Record lesson progress.")]
#[put("/enrollment/{course_id}/progress")]
pub async fn progress_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    form: web::Json<forms::enrollment::Progress>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Enrollment>::build().form_error(errors.to_string()));
    }

    let course_id = path.0;
    let mut enrollment = db::enrollment::fetch(pg_pool.get_ref(), user.id, course_id)
        .await
        .map_err(|_err| JsonResponse::<models::Enrollment>::build().internal_server_error(""))?
        .ok_or_else(|| {
            JsonResponse::<models::Enrollment>::build().not_found("You are not enrolled in this course")
        })?;

    let course = db::course::fetch(pg_pool.get_ref(), course_id)
        .await
        .map_err(|_err| JsonResponse::<models::Enrollment>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<models::Enrollment>::build().not_found("Course not found"))?;

    enrollment
        .record_progress(
            form.lesson_number,
            course.total_number_of_lessons,
            chrono::Utc::now(),
        )
        .map_err(|err| JsonResponse::<models::Enrollment>::build().fail(err.to_string()))?;

    db::enrollment::update_progress(pg_pool.get_ref(), &enrollment)
        .await
        .map_err(|_err| JsonResponse::<models::Enrollment>::build().internal_server_error(""))?;

    // re-read: a concurrent update may have moved progress further
    db::enrollment::fetch(pg_pool.get_ref(), user.id, course_id)
        .await
        .map_err(|_err| JsonResponse::<models::Enrollment>::build().internal_server_error(""))
        .map(|stored| {
            JsonResponse::build()
                .set_item(stored.unwrap_or(enrollment))
                .ok("Progress saved")
        })
}

/// Full lessons including video links, for enrolled users only.
#[tracing::instrument(name = "Get enrolled course lessons.")]
#[get("/enrollment/{course_id}/lesson")]
pub async fn lessons_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course_id = path.0;
    let enrollment = db::enrollment::fetch(pg_pool.get_ref(), user.id, course_id)
        .await
        .map_err(|_err| JsonResponse::<models::Lesson>::build().internal_server_error(""))?;
    if enrollment.is_none() {
        return Err(JsonResponse::<models::Lesson>::build().not_found("You are not enrolled in this course"));
    }

    db::lesson::fetch_by_course(pg_pool.get_ref(), course_id)
        .await
        .map(|lessons| JsonResponse::build().set_list(lessons).ok("OK"))
        .map_err(|_err| JsonResponse::<models::Lesson>::build().internal_server_error(""))
}
