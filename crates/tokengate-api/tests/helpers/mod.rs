//! Shared setup for router tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::util::ServiceExt;

use tokengate_api::{AppState, build_router};
use tokengate_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig,
};
use tokengate_database::MemoryUserStore;

pub const TOKEN_HEADER: &str = "X-AUTH-TOKEN";
pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryUserStore>,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig::in_memory(),
        auth: AuthConfig::new("router-test-secret"),
        logging: LoggingConfig::default(),
    }
}

pub fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryUserStore::new());
    let state = AppState::new(test_config(), store.clone()).unwrap();
    TestApp {
        router: build_router(state.clone()),
        state,
        store,
    }
}

impl TestApp {
    /// Sends one request and returns the status and parsed JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn sign_up(&self, user_id: &str) -> StatusCode {
        let body = serde_json::json!({ "user_id": user_id, "password": PASSWORD });
        self.send(Method::POST, "/sign-up", None, Some(body)).await.0
    }

    /// Signs in and returns the issued token.
    pub async fn sign_in(&self, user_id: &str, password: &str) -> String {
        let body = serde_json::json!({ "user_id": user_id, "password": password });
        let (status, json) = self.send(Method::POST, "/sign-in", None, Some(body)).await;
        assert_eq!(status, StatusCode::OK, "sign-in failed: {json}");
        json["data"]["token"].as_str().unwrap().to_string()
    }

    /// Creates an administrator directly through the session manager.
    pub async fn create_admin(&self, user_id: &str) {
        self.state
            .session_manager
            .ensure_admin(user_id, PASSWORD)
            .await
            .unwrap();
    }
}
