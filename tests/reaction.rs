mod common;

use coursebay::models::Role;
use serde_json::json;

async fn create_blog(app: &common::TestApp) -> i64 {
    let admin = app.cookie(Role::Admin, 1);
    let body = app
        .post(
            "/admin/blog",
            Some(&admin),
            json!({"title": "Welcome", "content": "First post"}),
        )
        .await;
    assert_eq!(body["success"], true, "{}", body);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn liking_twice_is_refused() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let blog_id = create_blog(&app).await;
    let ann = app.create_user("ann").await;

    let path = format!("/reaction/blog/{}/like", blog_id);
    let body = app.post(&path, Some(&ann), json!({})).await;
    assert_eq!(body["success"], true, "{}", body);
    assert_eq!(body["item"]["likes"], 1);
    assert_eq!(body["item"]["state"], "liked");

    let body = app.post(&path, Some(&ann), json!({})).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn dislike_replaces_like_and_clear_needs_a_reaction() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let blog_id = create_blog(&app).await;
    let ann = app.create_user("ann").await;

    app.post(&format!("/reaction/blog/{}/like", blog_id), Some(&ann), json!({}))
        .await;
    let body = app
        .post(&format!("/reaction/blog/{}/dislike", blog_id), Some(&ann), json!({}))
        .await;
    assert_eq!(body["item"]["likes"], 0);
    assert_eq!(body["item"]["dislikes"], 1);

    let path = format!("/reaction/blog/{}", blog_id);
    let body = app.delete(&path, Some(&ann)).await;
    assert_eq!(body["success"], true, "{}", body);
    assert_eq!(body["item"]["state"], "neutral");

    let body = app.delete(&path, Some(&ann)).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn rating_is_share_of_likes() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let seller = app.create_seller("sam").await;
    let seller_id = app.get("/seller/me", Some(&seller)).await["item"]["id"]
        .as_i64()
        .unwrap();

    for (name, kind) in [("a", "like"), ("b", "like"), ("c", "like"), ("d", "dislike")] {
        let user = app.create_user(name).await;
        let body = app
            .post(
                &format!("/reaction/seller/{}/{}", seller_id, kind),
                Some(&user),
                json!({}),
            )
            .await;
        assert_eq!(body["success"], true, "{}", body);
    }

    let body = app.get(&format!("/reaction/seller/{}", seller_id), None).await;
    assert_eq!(body["item"]["rating"], 3.75);
    assert!(body["item"].get("state").is_none());

    let body = app.get(&format!("/seller/{}/profile", seller_id), None).await;
    assert_eq!(body["item"]["likes"], 3);
    assert_eq!(body["item"]["rating"], 3.75);
}

#[tokio::test]
async fn missing_target_is_not_found() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let ann = app.create_user("ann").await;

    let body = app.post("/reaction/post/999/like", Some(&ann), json!({})).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Post not found");

    let body = app.get("/reaction/course/1", None).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn concurrent_likes_from_neutral_count_once() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let blog_id = create_blog(&app).await;
    let ann = app.create_user("ann").await;

    let path = format!("/reaction/blog/{}/like", blog_id);
    let (first, second) = tokio::join!(
        app.post(&path, Some(&ann), json!({})),
        app.post(&path, Some(&ann), json!({})),
    );

    let accepted = [&first, &second]
        .iter()
        .filter(|body| body["success"] == true)
        .count();
    assert_eq!(accepted, 1, "{} {}", first, second);

    let body = app.get(&format!("/reaction/blog/{}", blog_id), None).await;
    assert_eq!(body["item"]["likes"], 1);
}
