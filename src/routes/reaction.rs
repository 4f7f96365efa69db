use crate::db;
use crate::db::reaction::ApplyError;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::UserActor;
use crate::models::{ReactionChange, ReactionKind, ReactionTarget};
use crate::routes::ensure_user;
use crate::views;
use actix_web::{delete, get, post, web, Responder, Result};
use sqlx::PgPool;

async fn existing_target(
    pg_pool: &PgPool,
    target: &str,
    id: i32,
) -> Result<ReactionTarget, actix_web::Error> {
    let target: ReactionTarget = target
        .parse()
        .map_err(|msg: String| JsonResponse::<views::reaction::Reactions>::build().fail(msg))?;

    match db::reaction::target_exists(pg_pool, target, id).await {
        Ok(true) => Ok(target),
        Ok(false) => Err(JsonResponse::<views::reaction::Reactions>::build()
            .not_found(format!("{} not found", target.label()))),
        Err(_) => Err(JsonResponse::<views::reaction::Reactions>::build().internal_server_error("")),
    }
}

async fn change(
    user: UserActor,
    target: &str,
    id: i32,
    change: ReactionChange,
    pg_pool: &PgPool,
) -> Result<web::Json<JsonResponse<views::reaction::Reactions>>> {
    let target = existing_target(pg_pool, target, id).await?;
    ensure_user(pg_pool, &user).await?;

    let (state, tally) = db::reaction::apply(pg_pool, target, id, user.id, change)
        .await
        .map_err(|err| match err {
            ApplyError::Rejected(err) => {
                JsonResponse::<views::reaction::Reactions>::build().fail(err.to_string())
            }
            ApplyError::Database(msg) => {
                JsonResponse::<views::reaction::Reactions>::build().internal_server_error(msg)
            }
        })?;

    let reactions = views::reaction::Reactions {
        target,
        target_id: id,
        tally,
        state: Some(state),
    };
    Ok(JsonResponse::build().set_item(reactions).ok("Reaction saved"))
}

/// Tally of any reactable target; the caller's own state is included when
/// a user cookie is present.
#[tracing::instrument(name = "Get reactions.")]
#[get("/{target}/{id}")]
pub async fn get_handler(
    path: web::Path<(String, i32)>,
    user: Option<UserActor>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (target, id) = path.into_inner();
    let target = existing_target(pg_pool.get_ref(), &target, id).await?;

    let tally = db::reaction::tally(pg_pool.get_ref(), target, id)
        .await
        .map_err(|_err| JsonResponse::<views::reaction::Reactions>::build().internal_server_error(""))?;

    let state = match user {
        Some(user) => Some(
            db::reaction::fetch_state(pg_pool.get_ref(), target, id, user.id)
                .await
                .map_err(|_err| {
                    JsonResponse::<views::reaction::Reactions>::build().internal_server_error("")
                })?,
        ),
        None => None,
    };

    let reactions = views::reaction::Reactions {
        target,
        target_id: id,
        tally,
        state,
    };
    Ok(JsonResponse::build().set_item(reactions).ok("OK"))
}

/// `POST /reaction/{target}/{id}/like` and `.../dislike`.
#[tracing::instrument(name = "React to target.")]
#[post("/{target}/{id}/{kind}")]
pub async fn react_handler(
    path: web::Path<(String, i32, String)>,
    user: UserActor,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (target, id, kind) = path.into_inner();
    let kind: ReactionKind = kind
        .parse()
        .map_err(|msg: String| JsonResponse::<views::reaction::Reactions>::build().fail(msg))?;

    change(user, &target, id, ReactionChange::React(kind), pg_pool.get_ref()).await
}

#[tracing::instrument(name = "Clear reaction.")]
#[delete("/{target}/{id}")]
pub async fn clear_handler(
    path: web::Path<(String, i32)>,
    user: UserActor,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (target, id) = path.into_inner();
    change(user, &target, id, ReactionChange::Clear, pg_pool.get_ref()).await
}
