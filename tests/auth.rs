mod common;

use coursebay::models::Role;
use reqwest::{Method, StatusCode};

#[tokio::test]
async fn protected_endpoints_require_a_session() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    for (method, path) in [
        (Method::GET, "/user/me"),
        (Method::GET, "/user/cart"),
        (Method::POST, "/user/cart/checkout"),
        (Method::GET, "/seller/course"),
        (Method::DELETE, "/admin/blog/1"),
        (Method::POST, "/reaction/blog/1/like"),
    ] {
        let (status, body) = app.request(method, path, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", path);
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn forged_or_misplaced_tokens_are_rejected() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let forged = common::cookie("not-the-secret", Role::User, 1);
    let (status, _) = app.request(Method::GET, "/user/me", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let seller_token = app.cookie(Role::Seller, 1);
    let misplaced = seller_token.replacen("sellerToken", "userToken", 1);
    let (status, _) = app.request(Method::GET, "/user/me", Some(&misplaced), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // a seller session does not open user endpoints
    let (status, _) = app.request(Method::GET, "/user/me", Some(&seller_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let response = app
        .client
        .post(format!("{}/user", app.address))
        .header("Content-Type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn concurrent_signups_with_one_email_fail_softly() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let body = serde_json::json!({"name": "ann", "email": "ann@example.com"});
    for path in ["/user", "/seller"] {
        let (first, second) = tokio::join!(
            app.request(Method::POST, path, None, Some(body.clone())),
            app.request(Method::POST, path, None, Some(body.clone())),
        );

        for (status, _) in [&first, &second] {
            assert_eq!(*status, StatusCode::OK, "{}", path);
        }
        let created = [&first.1, &second.1]
            .iter()
            .filter(|body| body["success"] == true)
            .count();
        assert_eq!(created, 1, "{} {:?} {:?}", path, first, second);
    }
}
