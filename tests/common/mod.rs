#![allow(dead_code)]

use coursebay::configuration::{get_configuration, DatabaseSettings, Settings};
use coursebay::helpers::token::{self, Claims};
use coursebay::models::Role;
use serde_json::{json, Value};
use sqlx::{Connection, Executor, PgConnection, PgPool};

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub settings: Settings,
    pub client: reqwest::Client,
}

/// Starts the server on a random port against a fresh database. `None` when
/// Postgres is not reachable, so callers can skip.
pub async fn spawn_app() -> Option<TestApp> {
    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let server = coursebay::startup::run(listener, connection_pool.clone(), configuration.clone())
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        settings: configuration,
        client: reqwest::Client::new(),
    })
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

/// `Cookie` header value for an actor.
pub fn cookie(secret: &str, role: Role, id: i32) -> String {
    let claims = Claims::new(id, format!("{}{}@example.com", role, id), role, 1);
    format!("{}={}", role.cookie_name(), token::issue(secret, &claims).unwrap())
}

impl TestApp {
    pub fn cookie(&self, role: Role, id: i32) -> String {
        cookie(&self.settings.auth.secret, role, id)
    }

    pub async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (reqwest::StatusCode, Value) {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.address, path));
        if let Some(cookie) = cookie {
            request = request.header("Cookie", cookie);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.expect("Failed to execute request.");
        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Value {
        self.request(reqwest::Method::GET, path, cookie, None).await.1
    }

    pub async fn post(&self, path: &str, cookie: Option<&str>, body: Value) -> Value {
        self.request(reqwest::Method::POST, path, cookie, Some(body)).await.1
    }

    pub async fn put(&self, path: &str, cookie: Option<&str>, body: Value) -> Value {
        self.request(reqwest::Method::PUT, path, cookie, Some(body)).await.1
    }

    pub async fn delete(&self, path: &str, cookie: Option<&str>) -> Value {
        self.request(reqwest::Method::DELETE, path, cookie, None).await.1
    }

    /// Registers a user profile and returns its session cookie.
    pub async fn create_user(&self, name: &str) -> String {
        let body = self
            .post(
                "/user",
                None,
                json!({"name": name, "email": format!("{}@example.com", name)}),
            )
            .await;
        assert_eq!(body["success"], true, "{}", body);
        self.cookie(Role::User, body["id"].as_i64().unwrap() as i32)
    }

    pub async fn create_seller(&self, name: &str) -> String {
        let body = self
            .post(
                "/seller",
                None,
                json!({"name": name, "email": format!("{}@example.com", name)}),
            )
            .await;
        assert_eq!(body["success"], true, "{}", body);
        self.cookie(Role::Seller, body["id"].as_i64().unwrap() as i32)
    }

    /// Creates a course for the seller and returns its id.
    pub async fn create_course(&self, seller: &str, title: &str, price: i64, discount: i32) -> i64 {
        let body = self
            .post(
                "/seller/course",
                Some(seller),
                json!({
                    "title": title,
                    "description": "A course",
                    "category": "programming",
                    "level": "beginner",
                    "language": "en",
                    "price": price,
                    "discount": discount,
                }),
            )
            .await;
        assert_eq!(body["success"], true, "{}", body);
        body["id"].as_i64().unwrap()
    }

    pub async fn add_lesson(
        &self,
        seller: &str,
        course_id: i64,
        title: &str,
        minutes: i32,
        position: Option<i32>,
    ) -> i64 {
        let body = self
            .post(
                &format!("/seller/course/{}/lesson", course_id),
                Some(seller),
                json!({
                    "title": title,
                    "video_url": format!("https://cdn.example/{}.mp4", title),
                    "duration_minutes": minutes,
                    "position": position,
                }),
            )
            .await;
        assert_eq!(body["success"], true, "{}", body);
        body["id"].as_i64().unwrap()
    }
}
