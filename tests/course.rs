mod common;

use serde_json::json;

fn numbers(body: &serde_json::Value) -> Vec<(String, i64)> {
    body["item"]["lessons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| {
            (
                l["title"].as_str().unwrap().to_string(),
                l["lesson_number"].as_i64().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn lessons_renumber_and_totals_follow() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let seller = app.create_seller("sam").await;
    let course = app.create_course(&seller, "Rust", 100, 0).await;

    app.add_lesson(&seller, course, "a", 30, None).await;
    let b = app.add_lesson(&seller, course, "b", 30, None).await;
    app.add_lesson(&seller, course, "intro", 15, Some(1)).await;

    let path = format!("/seller/course/{}", course);
    let body = app.get(&path, Some(&seller)).await;
    assert_eq!(
        numbers(&body),
        vec![("intro".to_string(), 1), ("a".to_string(), 2), ("b".to_string(), 3)]
    );
    assert_eq!(body["item"]["total_number_of_lessons"], 3);
    assert_eq!(body["item"]["total_hours"], 1.25);

    let body = app
        .delete(&format!("/seller/course/{}/lesson/{}", course, b), Some(&seller))
        .await;
    assert_eq!(body["success"], true, "{}", body);

    let body = app.get(&path, Some(&seller)).await;
    assert_eq!(numbers(&body), vec![("intro".to_string(), 1), ("a".to_string(), 2)]);
    assert_eq!(body["item"]["total_hours"], 0.75);
}

#[tokio::test]
async fn catalogue_hides_video_urls_and_foreign_courses_are_not_found() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let sam = app.create_seller("sam").await;
    let kim = app.create_seller("kim").await;
    let course = app.create_course(&sam, "Rust", 2_000, 50).await;
    app.add_lesson(&sam, course, "a", 10, None).await;

    let body = app.get("/course?category=programming&search=rus", None).await;
    assert_eq!(body["list"].as_array().unwrap().len(), 1);
    assert_eq!(body["list"][0]["final_price"], 1_000);

    let body = app.get("/course?category=cooking", None).await;
    assert_eq!(body["list"], json!([]));

    let body = app.get(&format!("/course/{}", course), None).await;
    assert_eq!(body["item"]["lessons"][0]["title"], "a");
    assert!(body["item"]["lessons"][0].get("video_url").is_none());

    let body = app.delete(&format!("/seller/course/{}", course), Some(&kim)).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Course not found");
}
