mod course;
mod lesson;
mod profile;

pub use course::*;
pub use lesson::*;
pub use profile::*;

use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::SellerActor;
use crate::models;
use sqlx::PgPool;

/// Loads a course of the calling seller. Someone else's course is reported
/// exactly like a missing one.
pub(crate) async fn owned_course(
    pg_pool: &PgPool,
    seller: &SellerActor,
    course_id: i32,
) -> Result<models::Course, actix_web::Error> {
    db::course::fetch(pg_pool, course_id)
        .await
        .map_err(|_err| JsonResponse::<models::Course>::build().internal_server_error(""))
        .and_then(|course| match course {
            Some(course) if course.seller_id == seller.id => Ok(course),
            _ => Err(JsonResponse::<models::Course>::build().not_found("Course not found")),
        })
}
