use crate::configuration::Settings;
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "Malformed JSON at line {}, column {}: {}",
                err.line(),
                err.column(),
                err
            ),
            _ => format!("Malformed JSON: {}", err),
        };
        JsonResponse::<()>::build().bad_request(msg)
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/reaction")
                    .service(routes::reaction::get_handler)
                    .service(routes::reaction::react_handler)
                    .service(routes::reaction::clear_handler),
            )
            .service(
                web::scope("/course")
                    .service(routes::course::list_handler)
                    .service(routes::course::detail_handler)
                    .service(routes::course::comment_list_handler)
                    .service(routes::course::comment_add_handler)
                    .service(routes::course::comment_delete_handler),
            )
            .service(
                web::scope("/user")
                    .service(routes::user::add_handler)
                    .service(routes::user::me_handler)
                    .service(routes::user::edit_handler)
                    .service(routes::user::wishlist_handler)
                    .service(routes::user::wishlist_add_handler)
                    .service(routes::user::wishlist_remove_handler)
                    .service(routes::user::cart_handler)
                    .service(routes::user::checkout_handler)
                    .service(routes::user::cart_add_handler)
                    .service(routes::user::cart_remove_handler)
                    .service(routes::user::list_handler)
                    .service(routes::user::enroll_handler)
                    .service(routes::user::progress_handler)
                    .service(routes::user::lessons_handler),
            )
            .service(
                web::scope("/seller")
                    .service(routes::seller::add_handler)
                    .service(routes::seller::me_handler)
                    .service(routes::seller::edit_handler)
                    .service(routes::seller::course_add_handler)
                    .service(routes::seller::course_list_handler)
                    .service(routes::seller::course_get_handler)
                    .service(routes::seller::course_edit_handler)
                    .service(routes::seller::course_delete_handler)
                    .service(routes::seller::lesson_add_handler)
                    .service(routes::seller::lesson_edit_handler)
                    .service(routes::seller::lesson_delete_handler)
                    .service(routes::seller::public_handler),
            )
            .service(
                web::scope("/blog")
                    .service(routes::blog::list_handler)
                    .service(routes::blog::detail_handler)
                    .service(routes::blog::comment_add_handler)
                    .service(routes::blog::comment_delete_handler),
            )
            .service(
                web::scope("/post")
                    .service(routes::post::list_handler)
                    .service(routes::post::thread_handler)
                    .service(routes::post::add_handler)
                    .service(routes::post::edit_handler)
                    .service(routes::post::delete_handler)
                    .service(routes::post::comment_add_handler)
                    .service(routes::post::comment_delete_handler)
                    .service(routes::post::reply_add_handler)
                    .service(routes::post::reply_delete_handler),
            )
            .service(
                web::scope("/admin").service(
                    web::scope("/blog")
                        .service(routes::blog::admin_add_handler)
                        .service(routes::blog::admin_edit_handler)
                        .service(routes::blog::admin_delete_handler),
                ),
            )
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
