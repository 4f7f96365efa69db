pub mod blog;
pub mod course;
pub mod health_checks;
pub mod post;
pub mod reaction;
pub mod seller;
pub mod user;

pub use health_checks::*;

use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::UserActor;
use sqlx::PgPool;

/// Tokens are minted offline, so a valid `userToken` may still point at a
/// user without a profile row.
pub(crate) async fn ensure_user(pool: &PgPool, user: &UserActor) -> Result<(), actix_web::Error> {
    match db::user::exists(pool, user.id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(JsonResponse::<()>::build().not_found("User profile not found")),
        Err(_) => Err(JsonResponse::<()>::build().internal_server_error("")),
    }
}
