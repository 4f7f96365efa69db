use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::UserActor;
use crate::models;
use actix_web::{get, post, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Add user profile.")]
#[post("")]
pub async fn add_handler(
    form: web::Json<forms::user::NewUser>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::User>::build().form_error(errors.to_string()));
    }

    let user: models::User = form.into_inner().into();
    let existing = db::user::fetch_by_email(pg_pool.get_ref(), &user.email)
        .await
        .map_err(|_err| JsonResponse::<models::User>::build().internal_server_error(""))?;
    if existing.is_some() {
        return Err(JsonResponse::<models::User>::build().fail("Email is already registered"));
    }

    db::user::insert(pg_pool.get_ref(), user)
        .await
        .map(|user| {
            JsonResponse::build()
                .set_id(user.id)
                .set_item(user)
                .ok("Profile created")
        })
        .map_err(|err| match err {
            db::InsertError::Duplicate => {
                JsonResponse::<models::User>::build().fail("Email is already registered")
            }
            db::InsertError::Database(msg) => {
                JsonResponse::<models::User>::build().internal_server_error(msg)
            }
        })
}

#[tracing::instrument(name = "Get own user profile.")]
#[get("/me")]
pub async fn me_handler(user: UserActor, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::user::fetch(pg_pool.get_ref(), user.id)
        .await
        .map_err(|_err| JsonResponse::<models::User>::build().internal_server_error(""))
        .and_then(|profile| match profile {
            Some(profile) => Ok(JsonResponse::build().set_item(profile).ok("OK")),
            None => Err(JsonResponse::<models::User>::build().not_found("User profile not found")),
        })
}

#[tracing::instrument(name = "Edit own user profile.")]
#[put("/me")]
pub async fn edit_handler(
    user: UserActor,
    form: web::Json<forms::user::UserProfile>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::User>::build().form_error(errors.to_string()));
    }

    let mut profile = db::user::fetch(pg_pool.get_ref(), user.id)
        .await
        .map_err(|_err| JsonResponse::<models::User>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<models::User>::build().not_found("User profile not found"))?;

    form.into_inner().update(&mut profile);

    db::user::update(pg_pool.get_ref(), profile)
        .await
        .map(|profile| JsonResponse::build().set_item(profile).ok("Profile updated"))
        .map_err(|_err| JsonResponse::<models::User>::build().internal_server_error(""))
}
