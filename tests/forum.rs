mod common;

use serde_json::json;

#[tokio::test]
async fn deleting_a_post_removes_thread_and_reactions() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let ann = app.create_user("ann").await;
    let bob = app.create_user("bob").await;

    let post = app
        .post("/post", Some(&ann), json!({"title": "Hello", "content": "World"}))
        .await;
    assert_eq!(post["success"], true, "{}", post);
    let post_id = post["id"].as_i64().unwrap();

    let comment = app
        .post(&format!("/post/{}/comment", post_id), Some(&bob), json!({"content": "Hi"}))
        .await;
    let comment_id = comment["id"].as_i64().unwrap();
    let reply = app
        .post(
            &format!("/post/comment/{}/reply", comment_id),
            Some(&ann),
            json!({"content": "Hey"}),
        )
        .await;
    let reply_id = reply["id"].as_i64().unwrap();

    for path in [
        format!("/reaction/post/{}/like", post_id),
        format!("/reaction/comment/{}/like", comment_id),
        format!("/reaction/reply/{}/dislike", reply_id),
    ] {
        let body = app.post(&path, Some(&bob), json!({})).await;
        assert_eq!(body["success"], true, "{}", body);
    }

    let thread = app.get(&format!("/post/{}", post_id), None).await;
    assert_eq!(thread["item"]["likes"], 1);
    assert_eq!(thread["item"]["comments"][0]["likes"], 1);
    assert_eq!(thread["item"]["comments"][0]["replies"][0]["dislikes"], 1);

    let list = app.get("/post", None).await;
    assert_eq!(list["list"][0]["comments"], 1);

    // only the author may delete
    let body = app.delete(&format!("/post/{}", post_id), Some(&bob)).await;
    assert_eq!(body["success"], false);

    let body = app.delete(&format!("/post/{}", post_id), Some(&ann)).await;
    assert_eq!(body["success"], true, "{}", body);

    let reactions = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reaction")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(reactions, 0);

    let body = app.get(&format!("/post/{}", post_id), None).await;
    assert_eq!(body["success"], false);
}
