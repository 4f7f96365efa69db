mod common;

use serde_json::json;

#[tokio::test]
async fn cart_checkout_enrolls_and_empties_cart() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let seller = app.create_seller("sam").await;
    let rust = app.create_course(&seller, "Rust", 10_000, 25).await;
    let sql = app.create_course(&seller, "SQL", 999, 0).await;
    let ann = app.create_user("ann").await;

    for course in [rust, sql] {
        let body = app.post(&format!("/user/cart/{}", course), Some(&ann), json!({})).await;
        assert_eq!(body["success"], true, "{}", body);
    }

    let body = app.post(&format!("/user/cart/{}", rust), Some(&ann), json!({})).await;
    assert_eq!(body["success"], false);

    let cart = app.get("/user/cart", Some(&ann)).await;
    assert_eq!(cart["item"]["total"], 8_499);
    assert_eq!(cart["item"]["courses"].as_array().unwrap().len(), 2);

    let body = app.post("/user/cart/checkout", Some(&ann), json!({})).await;
    assert_eq!(body["success"], true, "{}", body);
    assert_eq!(body["list"].as_array().unwrap().len(), 2);

    let cart = app.get("/user/cart", Some(&ann)).await;
    assert_eq!(cart["item"]["courses"], json!([]));

    let body = app.post("/user/cart/checkout", Some(&ann), json!({})).await;
    assert_eq!(body["success"], false);

    // already enrolled
    let body = app.post(&format!("/user/cart/{}", rust), Some(&ann), json!({})).await;
    assert_eq!(body["success"], false);

    let enrollments = app.get("/user/enrollment", Some(&ann)).await;
    assert_eq!(enrollments["list"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn removing_absent_items_is_refused() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let seller = app.create_seller("sam").await;
    let course = app.create_course(&seller, "Rust", 100, 0).await;
    let ann = app.create_user("ann").await;

    let body = app.delete(&format!("/user/cart/{}", course), Some(&ann)).await;
    assert_eq!(body["success"], false);

    let body = app
        .post(&format!("/user/wishlist/{}", course), Some(&ann), json!({}))
        .await;
    assert_eq!(body["success"], true, "{}", body);
    let body = app
        .post(&format!("/user/wishlist/{}", course), Some(&ann), json!({}))
        .await;
    assert_eq!(body["success"], false);

    let body = app.delete(&format!("/user/wishlist/{}", course), Some(&ann)).await;
    assert_eq!(body["success"], true);
    let body = app.delete(&format!("/user/wishlist/{}", course), Some(&ann)).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn progress_only_moves_forward() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let seller = app.create_seller("sam").await;
    let course = app.create_course(&seller, "Rust", 100, 0).await;
    for title in ["one", "two", "three", "four"] {
        app.add_lesson(&seller, course, title, 10, None).await;
    }
    let ann = app.create_user("ann").await;

    let body = app.get(&format!("/user/enrollment/{}/lesson", course), Some(&ann)).await;
    assert_eq!(body["success"], false);

    app.post(&format!("/user/wishlist/{}", course), Some(&ann), json!({}))
        .await;
    let body = app
        .post(&format!("/user/enrollment/{}", course), Some(&ann), json!({}))
        .await;
    assert_eq!(body["success"], true, "{}", body);
    let wishlist = app.get("/user/wishlist", Some(&ann)).await;
    assert_eq!(wishlist["list"], json!([]));

    let progress = format!("/user/enrollment/{}/progress", course);
    let body = app.put(&progress, Some(&ann), json!({"lesson_number": 3})).await;
    assert_eq!(body["item"]["progress"], 75);
    assert_eq!(body["item"]["currently_in"], 3);

    let body = app.put(&progress, Some(&ann), json!({"lesson_number": 1})).await;
    assert_eq!(body["item"]["progress"], 75);
    assert_eq!(body["item"]["currently_in"], 1);

    let body = app.put(&progress, Some(&ann), json!({"lesson_number": 5})).await;
    assert_eq!(body["success"], false);

    let body = app.put(&progress, Some(&ann), json!({"lesson_number": 4})).await;
    assert_eq!(body["item"]["progress"], 100);
    assert_eq!(body["item"]["completed"], true);
    let completed_date = body["item"]["completed_date"].clone();
    assert!(completed_date.is_string());

    let body = app.put(&progress, Some(&ann), json!({"lesson_number": 4})).await;
    assert_eq!(body["item"]["completed_date"], completed_date);

    let lessons = app.get(&format!("/user/enrollment/{}/lesson", course), Some(&ann)).await;
    assert_eq!(lessons["list"][0]["video_url"], "https://cdn.example/one.mp4");
}
