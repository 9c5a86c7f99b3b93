mod common;

use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_issue_token_with_no_prior_state() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "admin");
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
    assert!(!body["currentToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_issue_token_for_named_identity() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth?name=alice")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "alice");
    assert!(!body["currentToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_issued_token_admits_request() {
    let app = TestApp::spawn().await;

    let token = app.issue_token(None).await;

    let response = app
        .get_authenticated("/db", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_object());
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/planets")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Exact wire-compat body.
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"message": "Authentication failed"}));
}

#[tokio::test]
async fn test_malformed_token_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/planets", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unissued_token_rejected() {
    let app = TestApp::spawn().await;
    app.issue_token(None).await;

    // Well-formed, correctly signed, but bound to an identity that was
    // never issued.
    let unissued = app
        .codec
        .issue(&uuid::Uuid::new_v4().to_string(), Duration::hours(5))
        .unwrap();

    let response = app
        .get_authenticated("/planets", &unissued)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"message": "Authentication failed"}));
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth")
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let identity_id = body["id"].as_str().unwrap();

    // Correctly signed for a real identity, but already expired.
    let expired = app.codec.issue(identity_id, Duration::hours(-1)).unwrap();

    let response = app
        .get_authenticated("/planets", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reissue_invalidates_previous_token() {
    let app = TestApp::spawn().await;

    let first = app.issue_token(None).await;
    let second = app.issue_token(None).await;
    assert_ne!(first, second);

    let response = app
        .get_authenticated("/db", &first)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get_authenticated("/db", &second)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_distinct_identities_hold_independent_tokens() {
    let app = TestApp::spawn().await;

    // Issue concurrently: in-flight issuance for one name must never
    // touch the other's credentials.
    let (alice, bob) = tokio::join!(
        app.issue_token(Some("alice")),
        app.issue_token(Some("bob")),
    );
    assert_ne!(alice, bob);
    for token in [&alice, &bob] {
        let response = app
            .get_authenticated("/db", token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_unknown_collection_lists_empty() {
    let app = TestApp::spawn().await;
    let token = app.issue_token(None).await;

    let response = app
        .get_authenticated("/starships", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_document_crud_roundtrip() {
    let app = TestApp::spawn().await;
    let token = app.issue_token(None).await;

    // Create
    let response = app
        .post_authenticated("/planets", &token)
        .json(&json!({"name": "Tatooine", "climate": "arid"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: serde_json::Value = response.json().await.expect("Failed to parse response");
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Tatooine");

    // Read back
    let response = app
        .get_authenticated(&format!("/planets/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // Replace
    let response = app
        .put_authenticated(&format!("/planets/{}", id), &token)
        .json(&json!({"name": "Alderaan"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let replaced: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(replaced["name"], "Alderaan");
    assert!(replaced.get("climate").is_none());

    // Merge
    let response = app
        .patch_authenticated(&format!("/planets/{}", id), &token)
        .json(&json!({"climate": "temperate"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let merged: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(merged["name"], "Alderaan");
    assert_eq!(merged["climate"], "temperate");

    // Delete
    let response = app
        .delete_authenticated(&format!("/planets/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({}));

    // Gone
    let response = app
        .get_authenticated(&format!("/planets/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_snapshot_reflects_writes() {
    let app = TestApp::spawn().await;
    let token = app.issue_token(None).await;

    app.post_authenticated("/planets", &token)
        .json(&json!({"id": "1", "name": "Tatooine"}))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get_authenticated("/db", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["planets"][0]["name"], "Tatooine");
}

#[tokio::test]
async fn test_issuance_endpoint_bypasses_gate() {
    let app = TestApp::spawn().await;

    // No token, yet /auth succeeds: it is how a client obtains one.
    let response = app
        .get("/auth")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
}
