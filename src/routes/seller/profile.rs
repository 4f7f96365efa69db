use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::SellerActor;
use crate::models::{self, ReactionTarget};
use crate::views;
use actix_web::{get, post, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Add seller profile.")]
#[post("")]
pub async fn add_handler(
    form: web::Json<forms::seller::NewSeller>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Seller>::build().form_error(errors.to_string()));
    }

    let seller: models::Seller = form.into_inner().into();
    let existing = db::seller::fetch_by_email(pg_pool.get_ref(), &seller.email)
        .await
        .map_err(|_err| JsonResponse::<models::Seller>::build().internal_server_error(""))?;
    if existing.is_some() {
        return Err(JsonResponse::<models::Seller>::build().fail("Email is already registered"));
    }

    db::seller::insert(pg_pool.get_ref(), seller)
        .await
        .map(|seller| {
            JsonResponse::build()
                .set_id(seller.id)
                .set_item(seller)
                .ok("Profile created")
        })
        .map_err(|err| match err {
            db::InsertError::Duplicate => {
                JsonResponse::<models::Seller>::build().fail("Email is already registered")
            }
            db::InsertError::Database(msg) => {
                JsonResponse::<models::Seller>::build().internal_server_error(msg)
            }
        })
}

#[tracing::instrument(name = "Get own seller profile.")]
#[get("/me")]
pub async fn me_handler(seller: SellerActor, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::seller::fetch(pg_pool.get_ref(), seller.id)
        .await
        .map_err(|_err| JsonResponse::<models::Seller>::build().internal_server_error(""))
        .and_then(|profile| match profile {
            Some(profile) => Ok(JsonResponse::build().set_item(profile).ok("OK")),
            None => Err(JsonResponse::<models::Seller>::build().not_found("Seller profile not found")),
        })
}

#[tracing::instrument(name = "Edit own seller profile.")]
#[put("/me")]
pub async fn edit_handler(
    seller: SellerActor,
    form: web::Json<forms::seller::SellerProfile>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Seller>::build().form_error(errors.to_string()));
    }

    let mut profile = db::seller::fetch(pg_pool.get_ref(), seller.id)
        .await
        .map_err(|_err| JsonResponse::<models::Seller>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<models::Seller>::build().not_found("Seller profile not found"))?;

    form.into_inner().update(&mut profile);

    db::seller::update(pg_pool.get_ref(), profile)
        .await
        .map(|profile| JsonResponse::build().set_item(profile).ok("Profile updated"))
        .map_err(|_err| JsonResponse::<models::Seller>::build().internal_server_error(""))
}

/// Public seller page: profile, rating and published courses.
#[tracing::instrument(name = "Get public seller profile.")]
#[get("/{id}/profile")]
pub async fn public_handler(
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let seller_id = path.0;
    let seller = db::seller::fetch(pg_pool.get_ref(), seller_id)
        .await
        .map_err(|_err| JsonResponse::<views::seller::Profile>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<views::seller::Profile>::build().not_found("Seller not found"))?;

    let tally = db::reaction::tally(pg_pool.get_ref(), ReactionTarget::Seller, seller_id)
        .await
        .map_err(|_err| JsonResponse::<views::seller::Profile>::build().internal_server_error(""))?;

    let courses = db::course::fetch_by_seller(pg_pool.get_ref(), seller_id)
        .await
        .map_err(|_err| JsonResponse::<views::seller::Profile>::build().internal_server_error(""))?
        .into_iter()
        .map(|stats| stats.course)
        .collect();

    Ok(JsonResponse::build()
        .set_item(views::seller::Profile::new(seller, tally, courses))
        .ok("OK"))
}
