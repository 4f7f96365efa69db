use crate::helpers::JsonResponse;
use crate::models::{Actor, Session};
use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::ops::Deref;
use std::sync::Arc;

fn session_actor(
    req: &HttpRequest,
    pick: fn(&Session) -> Option<Arc<Actor>>,
    cookie: &str,
) -> Result<Arc<Actor>, Error> {
    req.extensions()
        .get::<Session>()
        .and_then(pick)
        .ok_or_else(|| JsonResponse::<()>::build().unauthorized(format!("Missing {}", cookie)))
}

macro_rules! actor_extractor {
    ($name:ident, $field:ident, $cookie:literal) => {
        /// Caller authenticated through the
        #[doc = concat!("`", $cookie, "`")]
        /// cookie. Extraction fails with 401 when there is none.
        #[derive(Debug, Clone)]
        pub struct $name(pub Arc<Actor>);

        impl Deref for $name {
            type Target = Actor;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl FromRequest for $name {
            type Error = Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(session_actor(req, |s| s.$field.clone(), $cookie).map($name))
            }
        }
    };
}

actor_extractor!(UserActor, user, "userToken");
actor_extractor!(SellerActor, seller, "sellerToken");
actor_extractor!(AdminActor, admin, "adminToken");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{AuthSettings, DatabaseSettings, Settings};
    use crate::helpers::token::{self, Claims};
    use crate::middleware::authentication::Manager;
    use crate::models::Role;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{get, test, web, App, HttpResponse, Responder};

    const SECRET: &str = "test-secret";

    fn settings() -> Settings {
        Settings {
            database: DatabaseSettings {
                username: "postgres".to_string(),
                password: "postgres".to_string(),
                host: "localhost".to_string(),
                port: 5432,
                database_name: "coursebay".to_string(),
                max_connections: 1,
            },
            app_port: 0,
            app_host: "127.0.0.1".to_string(),
            auth: AuthSettings {
                secret: SECRET.to_string(),
                token_ttl_hours: 1,
            },
        }
    }

    fn token(secret: &str, role: Role) -> String {
        token::issue(secret, &Claims::new(42, "ann@example.com".to_string(), role, 1)).unwrap()
    }

    #[get("/user")]
    async fn user_only(user: UserActor) -> impl Responder {
        HttpResponse::Ok().body(user.id.to_string())
    }

    #[get("/anyone")]
    async fn anyone(user: Option<UserActor>, seller: Option<SellerActor>) -> impl Responder {
        HttpResponse::Ok().body(format!(
            "{}:{}",
            user.map(|u| u.id).unwrap_or(0),
            seller.map(|s| s.id).unwrap_or(0)
        ))
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .wrap(Manager::new())
                    .app_data(web::Data::new(settings()))
                    .service(user_only)
                    .service(anyone),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn valid_user_cookie_is_extracted() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/user")
            .cookie(Cookie::new("userToken", token(SECRET, Role::User)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"42"));
    }

    #[actix_web::test]
    async fn missing_cookie_is_401() {
        let app = app!();
        let req = test::TestRequest::get().uri("/user").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn forged_signature_is_401() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/anyone")
            .cookie(Cookie::new("userToken", token("other-secret", Role::User)))
            .to_request();
        let resp = test::try_call_service(&app, req).await;
        let status = match resp {
            Ok(resp) => resp.status(),
            Err(err) => err.error_response().status(),
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn seller_token_in_user_cookie_is_401() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/anyone")
            .cookie(Cookie::new("userToken", token(SECRET, Role::Seller)))
            .to_request();
        let resp = test::try_call_service(&app, req).await;
        let status = match resp {
            Ok(resp) => resp.status(),
            Err(err) => err.error_response().status(),
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn anonymous_requests_pass_through() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/anyone")
            .cookie(Cookie::new("sellerToken", token(SECRET, Role::Seller)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"0:42"));
    }
}
