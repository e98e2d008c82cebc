//! API Integration Tests
//!
//! Every test runs the full server over its own in-memory store, so no
//! external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn create(server: &TestServer, request: &CreateUser) -> UserBody {
    let response = server.post("/users/", request).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["backend"], "memory");
}

// ============================================================================
// User CRUD Tests
// ============================================================================

#[tokio::test]
async fn test_create_user() {
    let server = TestServer::start().await.unwrap();
    let request = CreateUser::unique();

    let user = create(&server, &request).await;

    assert_eq!(user.id, 1);
    assert_eq!(user.username, request.username);
    assert_eq!(user.email, request.email);
    assert!(!user.registration_date.is_empty());
}

#[tokio::test]
async fn test_create_user_without_trailing_slash() {
    let server = TestServer::start().await.unwrap();
    let response = server.post("/users", &CreateUser::unique()).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_create_user_rejects_empty_fields() {
    let server = TestServer::start().await.unwrap();

    let response = server.post("/users/", &CreateUser::new("", "a@b.c")).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
    assert!(body.error.details.is_some());
}

#[tokio::test]
async fn test_create_user_rejects_malformed_json() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/users/", &json!({"username": "only-name"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .client
        .post(format!("{}/users/", server.base_url()))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_get_user_detail_without_activity() {
    let server = TestServer::start().await.unwrap();
    let user = create(&server, &CreateUser::unique()).await;

    let response = server.get(&format!("/users/{}", user.id)).await.unwrap();
    let detail: UserDetailBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(detail.id, user.id);
    assert_eq!(detail.username, user.username);
    assert_eq!(detail.email, user.email);
    assert!(detail.activity_probability_next_month.is_none());
}

#[tokio::test]
async fn test_get_unknown_user() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/users/999").await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "USER_NOT_FOUND");
    assert_eq!(body.error.message, "User not found");
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/users/not-a-number").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_update_user_partially() {
    let server = TestServer::start().await.unwrap();
    let user = create(&server, &CreateUser::new("carol", "carol@mail.com")).await;

    let response = server
        .patch(&format!("/users/{}", user.id), &json!({"email": "carol@work.org"}))
        .await
        .unwrap();
    let updated: UserBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(updated.username, "carol");
    assert_eq!(updated.email, "carol@work.org");
    assert_eq!(updated.registration_date, user.registration_date);

    // null leaves the field unchanged
    let response = server
        .patch(&format!("/users/{}/", user.id), &json!({"username": null}))
        .await
        .unwrap();
    let updated: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.username, "carol");
}

#[tokio::test]
async fn test_update_unknown_user() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .patch("/users/12", &json!({"username": "ghost"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_user() {
    let server = TestServer::start().await.unwrap();
    let user = create(&server, &CreateUser::unique()).await;

    let response = server.delete(&format!("/users/{}", user.id)).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "User deleted successfully");

    let response = server.get(&format!("/users/{}", user.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete(&format!("/users/{}", user.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_list_users_pages() {
    let server = TestServer::start().await.unwrap();
    for _ in 0..5 {
        create(&server, &CreateUser::unique()).await;
    }

    let response = server.get("/users/?page=1&limit=2").await.unwrap();
    let page: UsersPageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 2);
    assert_eq!(page.users.iter().map(|u| u.id).collect::<Vec<_>>(), [3, 4]);

    let response = server.get("/users?page=2&limit=2").await.unwrap();
    let page: UsersPageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.users.len(), 1);

    let response = server.get("/users?page=9").await.unwrap();
    let page: UsersPageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.users.is_empty());
}

#[tokio::test]
async fn test_list_users_defaults() {
    let server = TestServer::start().await.unwrap();
    for _ in 0..12 {
        create(&server, &CreateUser::unique()).await;
    }

    let response = server.get("/users/").await.unwrap();
    let page: UsersPageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.page, 0);
    assert_eq!(page.limit, 10);
    assert_eq!(page.users.len(), 10);
    assert_eq!(page.users[0].id, 1);
}

#[tokio::test]
async fn test_list_users_invalid_parameters() {
    let server = TestServer::start().await.unwrap();

    for query in ["limit=0", "limit=101", "page=-1", "limit=abc"] {
        let response = server.get(&format!("/users/?{query}")).await.unwrap();
        assert_status(response, StatusCode::BAD_REQUEST)
            .await
            .unwrap_or_else(|e| panic!("{query}: {e}"));
    }
}

// ============================================================================
// Statistics Tests
// ============================================================================

#[tokio::test]
async fn test_statistics() {
    let server = TestServer::start().await.unwrap();
    create(&server, &CreateUser::new("a", "a@mail.com")).await;
    create(&server, &CreateUser::new("abc", "abc@mail.com")).await;
    create(&server, &CreateUser::new("ab", "ab@other.org")).await;
    create(&server, &CreateUser::new("abcd", "abcd@other.org")).await;

    let response = server.get("/users/statistics/?domain=mail.com").await.unwrap();
    let stats: StatisticsBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(stats.recent_users_count, 4);
    assert_eq!(stats.top_users_with_longest_names, ["abcd", "abc", "ab", "a"]);
    let percentage = stats.email_domain_percentage.unwrap();
    assert!((percentage - 50.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_statistics_without_domain() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/users/statistics").await.unwrap();
    let stats: StatisticsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.recent_users_count, 0);
    assert!(stats.top_users_with_longest_names.is_empty());
    assert!(stats.email_domain_percentage.is_none());

    let response = server.get("/users/statistics?domain=").await.unwrap();
    let stats: StatisticsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(stats.email_domain_percentage.is_none());
}

#[tokio::test]
async fn test_statistics_domain_on_empty_store() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/users/statistics?domain=mail.com").await.unwrap();
    let stats: StatisticsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.email_domain_percentage, Some(0.0));
}

// ============================================================================
// Activity Prediction Tests
// ============================================================================

#[tokio::test]
async fn test_detail_with_activity_probability() {
    let server = TestServer::start().await.unwrap();

    for i in 0..20 {
        let user = create(&server, &CreateUser::unique()).await;
        record_activity(&server, user.id, i, i32::from(i >= 10)).await.unwrap();
    }

    let response = server.get("/users/15").await.unwrap();
    let detail: UserDetailBody = assert_json(response, StatusCode::OK).await.unwrap();
    let probability = detail.activity_probability_next_month.unwrap();
    assert!((0.0..=1.0).contains(&probability));

    // A second request reuses the cached model and answers identically
    let response = server.get("/users/15").await.unwrap();
    let again: UserDetailBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(again.activity_probability_next_month, Some(probability));
}

#[tokio::test]
async fn test_detail_with_single_class_training_set() {
    let server = TestServer::start().await.unwrap();

    for i in 0..4 {
        let user = create(&server, &CreateUser::unique()).await;
        record_activity(&server, user.id, i, 1).await.unwrap();
    }

    let response = server.get("/users/1").await.unwrap();
    let detail: UserDetailBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(detail.activity_probability_next_month.is_none());
}

#[tokio::test]
async fn test_delete_cascades_to_activity() {
    let server = TestServer::start().await.unwrap();
    let user = create(&server, &CreateUser::unique()).await;
    record_activity(&server, user.id, 3, 1).await.unwrap();

    let response = server.delete(&format!("/users/{}", user.id)).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let rows = server.context().activity_repo().list_all().await.unwrap();
    assert!(rows.is_empty());
}
