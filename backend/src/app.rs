//! Shared application state and router assembly.

use std::sync::Arc;

use axum::Router;
use restosys_adapters::AccountStore;

use crate::api::health::routes::health_router;
use crate::api::user::routes::user_router;
use crate::auth::{auth_router, AuthError, AuthService, TokenService};
use crate::middleware;

/// Immutable context handed to every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
}

impl AppState {
    pub fn new(jwt_secret: &str, store: Arc<dyn AccountStore>) -> Result<Self, AuthError> {
        let tokens = TokenService::new(jwt_secret)?;
        Ok(Self {
            auth: AuthService::new(store, tokens)?,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(health_router())
        .merge(auth_router())
        .merge(user_router(state.clone()))
        .with_state(state);
    middleware::apply(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use restosys_adapters::{MemoryStore, ObjectId};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const SECRET: &str = "router-test-secret";

    struct TestApp {
        router: Router,
        state: AppState,
    }

    impl TestApp {
        fn new() -> Self {
            let store: Arc<dyn AccountStore> = Arc::new(MemoryStore::new());
            let state = AppState::new(SECRET, store).unwrap();
            Self {
                router: build_router(state.clone()),
                state,
            }
        }

        async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
            let resp = self.router.clone().oneshot(req).await.unwrap();
            let status = resp.status();
            let bytes = resp.into_body().collect().await.unwrap().to_bytes();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, body)
        }

        async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            self.send(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
        }

        async fn me(&self, authorization: Option<&str>) -> (StatusCode, Value) {
            let mut req = Request::builder().method(Method::GET).uri("/me");
            if let Some(value) = authorization {
                req = req.header(header::AUTHORIZATION, value);
            }
            self.send(req.body(Body::empty()).unwrap()).await
        }

        async fn register(&self, email: &str, password: &str) -> String {
            let (status, body) = self
                .post(
                    "/register",
                    json!({"email": email, "password": password, "nombre_empresa": "Acme"}),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{body}");
            body["token"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = TestApp::new();
        let (status, body) = app
            .send(Request::get("/api/health").body(Body::empty()).unwrap())
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "OK API"}));
    }

    #[tokio::test]
    async fn register_then_me_returns_profile_without_password() {
        let app = TestApp::new();
        let token = app.register("a@b.com", "pw123").await;

        let (status, body) = app.me(Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["nombre_empresa"], "Acme");
        assert_eq!(body["sucursales"], json!([]));
        assert!(body.get("password").is_none());
        assert!(body["id"].as_str().unwrap().len() == 24);
    }

    #[tokio::test]
    async fn register_keeps_optional_logo() {
        let app = TestApp::new();
        let (status, body) = app
            .post(
                "/register",
                json!({
                    "email": "logo@b.com",
                    "password": "pw123",
                    "nombre_empresa": "Acme",
                    "logo": "https://cdn.example.com/acme.png"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let token = body["token"].as_str().unwrap();
        let (_, me) = app.me(Some(&format!("Bearer {token}"))).await;
        assert_eq!(me["logo"], "https://cdn.example.com/acme.png");
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected_once_stored() {
        let app = TestApp::new();
        app.register("a@b.com", "pw123").await;

        let (status, body) = app
            .post(
                "/register",
                json!({"email": "a@b.com", "password": "other", "nombre_empresa": "Copycat"}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"msg": "Email is already registered"}));

        let stored = app.state.auth.store().find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(stored.company_name, "Acme");
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_password() {
        let app = TestApp::new();
        app.register("a@b.com", "pw123").await;

        let (status, body) = app
            .post("/login", json!({"email": "a@b.com", "password": "pw123"}))
            .await;
        assert_eq!(status, StatusCode::OK);

        let token = body["token"].as_str().unwrap();
        let id = app.state.auth.tokens().verify(token).unwrap();
        let stored = app.state.auth.store().find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(id, stored.id);
    }

    #[tokio::test]
    async fn login_failures_share_one_response() {
        let app = TestApp::new();
        app.register("a@b.com", "pw123").await;

        let wrong = app
            .post("/login", json!({"email": "a@b.com", "password": "wrong"}))
            .await;
        let unknown = app
            .post("/login", json!({"email": "ghost@b.com", "password": "pw123"}))
            .await;

        assert_eq!(wrong.0, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong, unknown);
        assert_eq!(wrong.1, json!({"msg": "Invalid credentials"}));
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests() {
        let app = TestApp::new();

        let (status, body) = app
            .post("/register", json!({"email": "a@b.com", "password": "pw123"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["msg"].is_string());

        let (status, body) = app
            .post(
                "/register",
                json!({"email": "", "password": "pw123", "nombre_empresa": "Acme"}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"msg": "email is required"}));

        let (status, _) = app
            .send(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn me_without_bearer_token_is_unauthorized() {
        let app = TestApp::new();

        let (status, body) = app.me(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"msg": "Token not provided"}));

        let (status, _) = app.me(Some("Token abc")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn me_with_bad_or_expired_token_is_unauthorized() {
        let app = TestApp::new();
        let (status, body) = app.me(Some("Bearer not.a.jwt")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"msg": "Invalid or expired token"}));

        app.register("a@b.com", "pw123").await;
        let id = app.state.auth.store().find_by_email("a@b.com").await.unwrap().unwrap().id;
        let expired = app
            .state
            .auth
            .tokens()
            .issue_at(&id, Utc::now() - Duration::days(8))
            .unwrap();
        let (status, _) = app.me(Some(&format!("Bearer {expired}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn me_for_deleted_account_is_not_found() {
        let app = TestApp::new();
        let token = app.register("a@b.com", "pw123").await;
        let id = app.state.auth.tokens().verify(&token).unwrap();
        assert!(app.state.auth.store().delete(&id).await.unwrap());

        let (status, body) = app.me(Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"msg": "Account not found"}));

        let ghost = app.state.auth.tokens().issue(&ObjectId::generate()).unwrap();
        let (status, _) = app.me(Some(&format!("Bearer {ghost}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_preflight_allows_authorization_header() {
        let app = TestApp::new();
        let resp = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/me")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
