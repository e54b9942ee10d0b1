mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use bookmark_manager::infrastructure::cache::CacheStore;
use serde_json::{Value, json};

const USER: &str = "alice";

async fn create(server: &TestServer, user: &str, url: &str, description: &str) -> Value {
    let response = server
        .post("/api/bookmarks")
        .add_header("X-User-Id", user)
        .json(&json!({ "url": url, "description": description }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

async fn list(server: &TestServer, user: &str, query: &str) -> Value {
    let response = server
        .get(&format!("/api/bookmarks{query}"))
        .add_header("X-User-Id", user)
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

// ─── Identity ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_user_header_is_unauthorized() {
    let (server, _) = common::create_test_server();

    let response = server.get("/api/bookmarks").await;

    response.assert_status_unauthorized();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_blank_user_header_is_unauthorized() {
    let (server, _) = common::create_test_server();

    server
        .post("/api/bookmarks")
        .add_header("X-User-Id", "   ")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status_unauthorized();
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_bookmark() {
    let (server, _) = common::create_test_server();

    let json = create(&server, USER, "https://example.com", "Example").await;

    assert_eq!(json["user_id"], USER);
    assert_eq!(json["url"], "https://example.com");
    assert_eq!(json["description"], "Example");

    let code = json["code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn test_create_bookmark_invalid_url() {
    let (server, _) = common::create_test_server();

    let response = server
        .post("/api/bookmarks")
        .add_header("X-User-Id", USER)
        .json(&json!({ "url": "example" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_get_bookmark() {
    let (server, _) = common::create_test_server();
    let created = create(&server, USER, "https://example.com", "Example").await;
    let id = created["id"].as_i64().unwrap();

    let response = server
        .get(&format!("/api/bookmarks/{id}"))
        .add_header("X-User-Id", USER)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), created);
}

#[tokio::test]
async fn test_get_bookmark_of_other_user_is_not_found() {
    let (server, _) = common::create_test_server();
    let created = create(&server, USER, "https://example.com", "Example").await;
    let id = created["id"].as_i64().unwrap();

    server
        .get(&format!("/api/bookmarks/{id}"))
        .add_header("X-User-Id", "mallory")
        .await
        .assert_status_not_found();
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_defaults_and_order() {
    let (server, _) = common::create_test_server();
    for i in 0..3 {
        create(&server, USER, &format!("https://example.com/{i}"), "").await;
    }

    let json = list(&server, USER, "").await;

    assert_eq!(json["total"], 3);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["url"], "https://example.com/2");
    assert_eq!(data[2]["url"], "https://example.com/0");
}

#[tokio::test]
async fn test_list_pagination_window() {
    let (server, _) = common::create_test_server();
    for i in 0..5 {
        create(&server, USER, &format!("https://example.com/{i}"), "").await;
    }

    let json = list(&server, USER, "?offset=1&limit=2").await;

    assert_eq!(json["total"], 5);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["url"], "https://example.com/3");
    assert_eq!(data[1]["url"], "https://example.com/2");
}

#[tokio::test]
async fn test_list_is_scoped_to_user() {
    let (server, _) = common::create_test_server();
    create(&server, USER, "https://example.com/a", "").await;
    create(&server, "bob", "https://example.com/b", "").await;

    let json = list(&server, USER, "").await;

    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["url"], "https://example.com/a");
}

#[tokio::test]
async fn test_list_rejects_invalid_pagination() {
    let (server, _) = common::create_test_server();

    for query in ["?limit=0", "?limit=101", "?offset=-1"] {
        server
            .get(&format!("/api/bookmarks{query}"))
            .add_header("X-User-Id", USER)
            .await
            .assert_status_bad_request();
    }
}

// ─── Cache behaviour ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_populates_cache() {
    let (server, backends) = common::create_test_server();
    create(&server, USER, "https://example.com", "").await;

    list(&server, USER, "?offset=0&limit=10").await;

    let cached = backends
        .cache
        .get_cache_data("get_bookmarks_alice", "0_10")
        .await
        .unwrap();
    let cached: Value = serde_json::from_slice(&cached).unwrap();
    assert_eq!(cached["total"], 1);
}

#[tokio::test]
async fn test_create_invalidates_listing() {
    let (server, _) = common::create_test_server();

    let before = list(&server, USER, "").await;
    assert_eq!(before["total"], 0);

    create(&server, USER, "https://example.com", "").await;

    let after = list(&server, USER, "").await;
    assert_eq!(after["total"], 1);
}

#[tokio::test]
async fn test_update_invalidates_listing() {
    let (server, _) = common::create_test_server();
    let created = create(&server, USER, "https://example.com", "old").await;
    let id = created["id"].as_i64().unwrap();

    assert_eq!(list(&server, USER, "").await["data"][0]["description"], "old");

    let response = server
        .patch(&format!("/api/bookmarks/{id}"))
        .add_header("X-User-Id", USER)
        .json(&json!({ "description": "new" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["description"], "new");

    assert_eq!(list(&server, USER, "").await["data"][0]["description"], "new");
}

#[tokio::test]
async fn test_delete_invalidates_listing() {
    let (server, _) = common::create_test_server();
    let created = create(&server, USER, "https://example.com", "").await;
    let id = created["id"].as_i64().unwrap();

    assert_eq!(list(&server, USER, "").await["total"], 1);

    server
        .delete(&format!("/api/bookmarks/{id}"))
        .add_header("X-User-Id", USER)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(list(&server, USER, "").await["total"], 0);
}

#[tokio::test]
async fn test_failed_mutation_still_invalidates() {
    let (server, backends) = common::create_test_server();
    list(&server, USER, "").await;
    assert!(backends
        .cache
        .get_cache_data("get_bookmarks_alice", "0_10")
        .await
        .is_ok());

    server
        .delete("/api/bookmarks/999")
        .add_header("X-User-Id", USER)
        .await
        .assert_status_not_found();

    assert!(backends
        .cache
        .get_cache_data("get_bookmarks_alice", "0_10")
        .await
        .is_err());
}

#[tokio::test]
async fn test_mutation_leaves_other_users_cache() {
    let (server, backends) = common::create_test_server();
    list(&server, "bob", "").await;

    create(&server, USER, "https://example.com", "").await;

    assert!(backends
        .cache
        .get_cache_data("get_bookmarks_bob", "0_10")
        .await
        .is_ok());
}

// ─── Update / delete ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_empty_body_is_bad_request() {
    let (server, _) = common::create_test_server();
    let created = create(&server, USER, "https://example.com", "").await;
    let id = created["id"].as_i64().unwrap();

    server
        .patch(&format!("/api/bookmarks/{id}"))
        .add_header("X-User-Id", USER)
        .json(&json!({}))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_update_missing_bookmark() {
    let (server, _) = common::create_test_server();

    server
        .patch("/api/bookmarks/42")
        .add_header("X-User-Id", USER)
        .json(&json!({ "url": "https://example.org" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_twice() {
    let (server, _) = common::create_test_server();
    let created = create(&server, USER, "https://example.com", "").await;
    let id = created["id"].as_i64().unwrap();

    server
        .delete(&format!("/api/bookmarks/{id}"))
        .add_header("X-User-Id", USER)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete(&format!("/api/bookmarks/{id}"))
        .add_header("X-User-Id", USER)
        .await
        .assert_status_not_found();
}
