use std::sync::Arc;

use auth::TokenCodec;
use chrono::Duration;
use gateway_service::domain::identity::models::IdentityName;
use gateway_service::domain::identity::service::IdentityService;
use gateway_service::inbound::http::router::create_router;
use gateway_service::outbound::documents::JsonFileDocumentStore;
use gateway_service::outbound::repositories::InMemoryIdentityRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server on an OS-assigned port.
///
/// Uses the in-memory credential store and a temp-file document store so
/// the suite runs without external infrastructure.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Codec sharing the server's secret, for crafting tokens in
    /// negative tests.
    pub codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let identity_repository = Arc::new(InMemoryIdentityRepository::new());
        let identity_service = Arc::new(IdentityService::new(
            identity_repository,
            TokenCodec::new(TEST_SECRET).expect("Failed to create codec"),
            Duration::hours(5),
        ));

        let documents_path = std::env::temp_dir().join(format!(
            "gateway-test-db-{}.json",
            uuid::Uuid::new_v4()
        ));
        let document_store = Arc::new(
            JsonFileDocumentStore::open(documents_path)
                .await
                .expect("Failed to open document store"),
        );

        let default_identity = IdentityName::new("admin".to_string()).unwrap();
        let router = create_router(identity_service, document_store, default_identity);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            codec: TokenCodec::new(TEST_SECRET).expect("Failed to create codec"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with the `token` header
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header("token", token)
    }

    /// Helper to make POST request with the `token` header
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .post(format!("{}{}", self.address, path))
            .header("token", token)
    }

    /// Helper to make PUT request with the `token` header
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .header("token", token)
    }

    /// Helper to make PATCH request with the `token` header
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .header("token", token)
    }

    /// Helper to make DELETE request with the `token` header
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .header("token", token)
    }

    /// Issue a token via `GET /auth` and return it.
    pub async fn issue_token(&self, name: Option<&str>) -> String {
        let path = match name {
            Some(name) => format!("/auth?name={}", name),
            None => "/auth".to_string(),
        };

        let response = self
            .get(&path)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["currentToken"]
            .as_str()
            .expect("Missing currentToken")
            .to_string()
    }
}
