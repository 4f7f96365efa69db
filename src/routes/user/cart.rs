use crate::db;
use crate::db::cart::CourseList;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::UserActor;
use crate::routes::ensure_user;
use crate::views;
use actix_web::{delete, get, post, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Get cart.")]
#[get("/cart")]
pub async fn cart_handler(user: UserActor, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::cart::fetch_courses(pg_pool.get_ref(), CourseList::Cart, user.id)
        .await
        .map(|courses| {
            JsonResponse::build()
                .set_item(views::cart::Cart::from(courses))
                .ok("OK")
        })
        .map_err(|_err| JsonResponse::<views::cart::Cart>::build().internal_server_error(""))
}

#[tracing::instrument(name = "Add course to cart.")]
#[post("/cart/{course_id}")]
pub async fn cart_add_handler(
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

    let enrollment = db::enrollment::fetch(pg_pool.get_ref(), user.id, course_id)
        .await
        .map_err(|_err| JsonResponse::<()>::build().internal_server_error(""))?;
    if enrollment.is_some() {
        return Err(JsonResponse::<()>::build().fail("You are already enrolled in this course"));
    }

    match db::cart::add(pg_pool.get_ref(), CourseList::Cart, user.id, course_id).await {
        Ok(true) => Ok(JsonResponse::<()>::build().set_id(course_id).ok("Added to cart")),
        Ok(false) => Err(JsonResponse::<()>::build().fail("Course is already in cart")),
        Err(_) => Err(JsonResponse::<()>::build().internal_server_error("")),
    }
}

#[tracing::instrument(name = "Remove course from cart.")]
#[delete("/cart/{course_id}")]
pub async fn cart_remove_handler(
    user: UserActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course_id = path.0;
    match db::cart::remove(pg_pool.get_ref(), CourseList::Cart, user.id, course_id).await {
        Ok(true) => Ok(JsonResponse::<()>::build().set_id(course_id).ok("Removed from cart")),
        Ok(false) => Err(JsonResponse::<()>::build().fail("Course is not in cart")),
        Err(_) => Err(JsonResponse::<()>::build().internal_server_error("")),
    }
}

/// Purchase: enrolls every course in the cart. Registered before
/// `/cart/{course_id}` so the literal segment wins.
#[tracing::instrument(name = "Checkout cart.")]
#[post("/cart/checkout")]
pub async fn checkout_handler(user: UserActor, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let cart = db::cart::fetch_courses(pg_pool.get_ref(), CourseList::Cart, user.id)
        .await
        .map_err(|_err| JsonResponse::<i32>::build().internal_server_error(""))?;
    if cart.is_empty() {
        return Err(JsonResponse::<i32>::build().fail("Cart is empty"));
    }

    db::enrollment::checkout(pg_pool.get_ref(), user.id)
        .await
        .map(|enrolled| {
            tracing::info!("User {} enrolled in {} courses", user.id, enrolled.len());
            JsonResponse::build().set_list(enrolled).ok("Purchase completed")
        })
        .map_err(|_err| JsonResponse::<i32>::build().internal_server_error(""))
}
