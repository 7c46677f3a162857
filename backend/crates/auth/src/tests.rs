//! Shared fixtures and router-level tests for the auth crate

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use chrono::{TimeDelta, Utc};
use kernel::id::RoleId;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::application::notifier::{NotifyError, ResetNotifier};
use crate::domain::entity::password_reset::PasswordReset;
use crate::domain::entity::user::User;
use crate::domain::repository::{PasswordResetRepository, RoleRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    role_name::RoleName,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::infra::memory::InMemoryAuthRepository;
use crate::presentation::router::auth_router_generic;

pub(crate) const TEST_PASSWORD: &str = "MySecure#Pass2024";

/// Unsaved user with a throwaway role id
pub(crate) fn sample_user() -> User {
    let password = RawPassword::new(TEST_PASSWORD.to_string()).unwrap();
    User::new(
        UserName::new("Sample User").unwrap(),
        Email::new("sample@example.com").unwrap(),
        UserPassword::from_raw(&password, None).unwrap(),
        RoleId::new(),
    )
}

/// Store a user with `TEST_PASSWORD` and the given role
pub(crate) async fn seed_user(repo: &InMemoryAuthRepository, email: &str, role: RoleName) -> User {
    let role = RoleRepository::find_by_name(repo, role)
        .await
        .unwrap()
        .expect("roles are seeded");
    let password = RawPassword::new(TEST_PASSWORD.to_string()).unwrap();

    let user = User::new(
        UserName::new("Test User").unwrap(),
        Email::new(email).unwrap(),
        UserPassword::from_raw(&password, None).unwrap(),
        role.role_id,
    );
    UserRepository::create(repo, &user).await.unwrap();
    user
}

/// Notifier that keeps every link it is asked to deliver
#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    links: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub(crate) fn links(&self) -> Vec<String> {
        self.links.lock().unwrap().clone()
    }

    /// Raw token of the most recent link
    pub(crate) fn last_token(&self) -> String {
        let link = self.links().pop().expect("a reset link was sent");
        link.split_once("token=").unwrap().1.to_string()
    }
}

impl ResetNotifier for RecordingNotifier {
    async fn send_reset_link(&self, _user: &User, link: &str) -> Result<(), NotifyError> {
        self.links.lock().unwrap().push(link.to_string());
        Ok(())
    }
}

struct TestApp {
    router: Router,
    repo: InMemoryAuthRepository,
    notifier: RecordingNotifier,
}

impl TestApp {
    fn new() -> Self {
        let repo = InMemoryAuthRepository::with_default_roles();
        let notifier = RecordingNotifier::default();
        let router = auth_router_generic(repo.clone(), notifier.clone(), AuthConfig::default());
        Self {
            router,
            repo,
            notifier,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    async fn login(&self, uri: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.post(uri, json!({ "email": email, "password": password }))
            .await
    }

    async fn token_for(&self, uri: &str, email: &str) -> String {
        let (status, body) = self.login(uri, email, TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["access_token"].as_str().unwrap().to_string()
    }

    async fn logout(&self, token: &str) -> StatusCode {
        self.send(Method::POST, "/auth/logout", None, Some(token))
            .await
            .0
    }
}

// ========================================================================
// Login
// ========================================================================

#[tokio::test]
async fn test_login_user() {
    let app = TestApp::new();
    seed_user(&app.repo, "jane@example.com", RoleName::User).await;

    let (status, body) = app
        .login("/auth/login", "  Jane@Example.com", TEST_PASSWORD)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User logged in successfully");
    assert_eq!(body["data"]["user"]["email"], "jane@example.com");
    assert_eq!(body["data"]["user"]["role"], "user");
    assert!(body["data"]["user"].get("password").is_none());
    assert!(
        body["data"]["access_token"]
            .as_str()
            .unwrap()
            .starts_with("oat_")
    );
}

#[tokio::test]
async fn test_login_role_gate() {
    let app = TestApp::new();
    seed_user(&app.repo, "root@example.com", RoleName::Admin).await;
    seed_user(&app.repo, "jane@example.com", RoleName::User).await;

    let (status, body) = app
        .login("/auth/login", "root@example.com", TEST_PASSWORD)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = app
        .login("/auth/admin/login", "root@example.com", TEST_PASSWORD)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Admin logged in successfully");

    let (status, _) = app
        .login("/auth/admin/login", "jane@example.com", TEST_PASSWORD)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let app = TestApp::new();
    seed_user(&app.repo, "jane@example.com", RoleName::User).await;

    let (wrong_status, wrong_body) = app
        .login("/auth/login", "jane@example.com", "Wrong#Pass2024")
        .await;
    let (unknown_status, unknown_body) = app
        .login("/auth/login", "nobody@example.com", TEST_PASSWORD)
        .await;

    assert_eq!(wrong_status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_login_validation() {
    let app = TestApp::new();

    let (status, body) = app.post("/auth/login", json!({ "email": "nope" })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Validation failed");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["email", "password"]);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========================================================================
// Register
// ========================================================================

#[tokio::test]
async fn test_register() {
    let app = TestApp::new();
    let body = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "password": TEST_PASSWORD,
    });

    let (status, created) = app.post("/auth/register", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "User registered successfully");
    assert!(created["data"].get("user").is_none());

    // The issued token authenticates
    let token = created["data"]["access_token"].as_str().unwrap();
    assert_eq!(app.logout(token).await, StatusCode::OK);

    let (status, duplicate) = app.post("/auth/register", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        duplicate["message"],
        "User already exists with this email address"
    );
    assert_eq!(app.repo.user_count(), 1);

    // Registered accounts log in through the user entry point
    app.token_for("/auth/login", "jane@example.com").await;
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "name": "", "email": "jane@example.com", "password": "12345678" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    assert_eq!(app.repo.user_count(), 0);
}

// ========================================================================
// Logout
// ========================================================================

#[tokio::test]
async fn test_logout_revokes_only_presented_token() {
    let app = TestApp::new();
    seed_user(&app.repo, "jane@example.com", RoleName::User).await;

    let first = app.token_for("/auth/login", "jane@example.com").await;
    let second = app.token_for("/auth/login", "jane@example.com").await;

    let (status, body) = app
        .send(Method::POST, "/auth/logout", None, Some(&first))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User logged out successfully");

    assert_eq!(app.logout(&first).await, StatusCode::UNAUTHORIZED);
    assert_eq!(app.logout(&second).await, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_requires_token() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::POST, "/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized access");

    assert_eq!(app.logout("oat_forged.token").await, StatusCode::UNAUTHORIZED);
}

// ========================================================================
// Forgot / Reset Password
// ========================================================================

#[tokio::test]
async fn test_forgot_password() {
    let app = TestApp::new();
    seed_user(&app.repo, "jane@example.com", RoleName::User).await;

    let (status, _) = app
        .post("/auth/forgot-password", json!({ "email": "nobody@example.com" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.repo.password_reset_count(), 0);

    let (status, body) = app
        .post("/auth/forgot-password", json!({ "email": "jane@example.com" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset link sent to your email");
    assert_eq!(app.repo.password_reset_count(), 1);
    assert_eq!(app.notifier.links().len(), 1);
}

#[tokio::test]
async fn test_reset_password_flow() {
    let app = TestApp::new();
    seed_user(&app.repo, "jane@example.com", RoleName::User).await;
    app.post("/auth/forgot-password", json!({ "email": "jane@example.com" }))
        .await;
    let token = app.notifier.last_token();
    let new_password = "Brand#New2025pass";

    let (status, body) = app
        .post(
            "/auth/reset-password",
            json!({ "token": token, "password": new_password }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset successfully");

    let (status, _) = app
        .login("/auth/login", "jane@example.com", new_password)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .login("/auth/login", "jane@example.com", TEST_PASSWORD)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Single use
    let (status, body) = app
        .post(
            "/auth/reset-password",
            json!({ "token": token, "password": "Another#Pass2026" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Invalid password reset token");
}

#[tokio::test]
async fn test_reset_password_expiry() {
    let app = TestApp::new();
    let user = seed_user(&app.repo, "jane@example.com", RoleName::User).await;

    let mut tokens = Vec::new();
    for age in [TimeDelta::seconds(15 * 60 + 1), TimeDelta::seconds(14 * 60 + 59)] {
        let (mut reset, raw) = PasswordReset::issue(user.user_id);
        reset.created_at = Utc::now() - age;
        PasswordResetRepository::create(&app.repo, &reset)
            .await
            .unwrap();
        tokens.push(raw);
    }

    let (status, _) = app
        .post(
            "/auth/reset-password",
            json!({ "token": tokens[0], "password": "Brand#New2025pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .post(
            "/auth/reset-password",
            json!({ "token": tokens[1], "password": "Brand#New2025pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

// ========================================================================
// Users (admin)
// ========================================================================

#[tokio::test]
async fn test_list_users_admin_gate() {
    let app = TestApp::new();
    seed_user(&app.repo, "root@example.com", RoleName::Admin).await;
    seed_user(&app.repo, "jane@example.com", RoleName::User).await;

    let (status, _) = app.send(Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user_token = app.token_for("/auth/login", "jane@example.com").await;
    let (status, body) = app
        .send(Method::GET, "/users", None, Some(&user_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin access required");

    let admin_token = app.token_for("/auth/admin/login", "root@example.com").await;
    let (status, body) = app
        .send(Method::GET, "/users", None, Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password").is_none()));
}
