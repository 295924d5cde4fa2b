/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An app instance backed by the in-memory store
/// - Test user creation
/// - JWT token generation
/// - Request helpers that drive the router directly

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use teamflow_api::app::{build_router, AppState};
use teamflow_api::config::{ApiConfig, Config, JwtConfig, StorageBackend, StorageConfig};
use teamflow_shared::auth::jwt::{create_token, Claims, TokenType};
use teamflow_shared::models::user::{CreateUser, User, UserRole};
use teamflow_shared::store::{MemStore, Store};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-key-32-bytes!";

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemStore>,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context over a fresh in-memory store
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                database_url: None,
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
            },
        };

        let store = Arc::new(MemStore::new());
        let state = AppState::new(store.clone(), config.clone());
        let app = build_router(state);

        TestContext { store, app, config }
    }

    /// Seeds a user directly in the store
    ///
    /// The password hash is a placeholder; tests that exercise login go
    /// through the register endpoint instead.
    pub async fn seed_user(&self, name: &str) -> User {
        self.store
            .create_user(CreateUser {
                name: name.to_string(),
                email: format!("{}@teamflow.dev", name.to_lowercase()),
                password_hash: "not-a-real-hash".to_string(),
                role: UserRole::Member,
                avatar_color: "bg-blue-500".to_string(),
            })
            .await
            .unwrap()
    }

    /// Generates a valid access token for a user
    pub fn token_for(&self, user_id: Uuid) -> String {
        let claims = Claims::new(user_id, TokenType::Access);
        create_token(&claims, &self.config.jwt.secret).unwrap()
    }

    /// Sends a request and returns the status plus parsed JSON body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    /// Creates a project as `actor` and returns its id
    pub async fn create_project(&self, actor: Uuid, name: &str) -> Uuid {
        let (status, body) = self
            .send(
                "POST",
                "/api/projects",
                Some(&self.token_for(actor)),
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "project creation failed: {}", body);

        body["project"]["id"].as_str().unwrap().parse().unwrap()
    }

    /// Adds a member to a project as `actor`
    pub async fn add_member(
        &self,
        actor: Uuid,
        project_id: Uuid,
        user_id: Uuid,
        role: &str,
    ) -> (StatusCode, serde_json::Value) {
        self.send(
            "POST",
            &format!("/api/projects/{}/members", project_id),
            Some(&self.token_for(actor)),
            Some(serde_json::json!({ "user_id": user_id, "role": role })),
        )
        .await
    }

    /// Creates a task as `actor` and returns its id
    pub async fn create_task(
        &self,
        actor: Uuid,
        project_id: Uuid,
        title: &str,
        assigned_to: Option<Uuid>,
    ) -> Uuid {
        let (status, body) = self
            .send(
                "POST",
                "/api/tasks",
                Some(&self.token_for(actor)),
                Some(serde_json::json!({
                    "title": title,
                    "project_id": project_id,
                    "assigned_to": assigned_to,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "task creation failed: {}", body);

        body["task"]["id"].as_str().unwrap().parse().unwrap()
    }
}
