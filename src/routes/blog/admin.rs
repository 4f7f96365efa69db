use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminActor;
use crate::models;
use actix_web::{delete, post, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Admin add blog.")]
#[post("")]
pub async fn admin_add_handler(
    admin: AdminActor,
    form: web::Json<forms::blog::BlogForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Blog>::build().form_error(errors.to_string()));
    }

    let now = chrono::Utc::now();
    let mut blog = models::Blog {
        author: admin.email.clone(),
        created_at: now,
        updated_at: now,
        ..Default::default()
    };
    form.into_inner().update(&mut blog);

    db::blog::insert(pg_pool.get_ref(), blog)
        .await
        .map(|blog| {
            JsonResponse::build()
                .set_id(blog.id)
                .set_item(blog)
                .ok("Blog created")
        })
        .map_err(|err| JsonResponse::<models::Blog>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Admin edit blog.")]
#[put("/{id}")]
pub async fn admin_edit_handler(
    _admin: AdminActor,
    path: web::Path<(i32,)>,
    form: web::Json<forms::blog::BlogForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Blog>::build().form_error(errors.to_string()));
    }

    let mut blog = db::blog::fetch(pg_pool.get_ref(), path.0)
        .await
        .map_err(|_err| JsonResponse::<models::Blog>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<models::Blog>::build().not_found("Blog not found"))?;

    form.into_inner().update(&mut blog);

    db::blog::update(pg_pool.get_ref(), blog)
        .await
        .map(|blog| JsonResponse::build().set_item(blog).ok("Blog updated"))
        .map_err(|_err| JsonResponse::<models::Blog>::build().internal_server_error(""))
}

#[tracing::instrument(name = "Admin delete blog.")]
#[delete("/{id}")]
pub async fn admin_delete_handler(
    _admin: AdminActor,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let blog_id = path.0;
    match db::blog::delete(pg_pool.get_ref(), blog_id).await {
        Ok(true) => Ok(JsonResponse::<models::Blog>::build()
            .set_id(blog_id)
            .ok("Blog deleted")),
        Ok(false) => Err(JsonResponse::<models::Blog>::build().not_found("Blog not found")),
        Err(_) => Err(JsonResponse::<models::Blog>::build().internal_server_error("")),
    }
}
