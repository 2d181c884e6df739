//! Router-level tests: the site driven in-process against a fake CRM backend.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use http_body_util::BodyExt;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crossins_site::build_router;
use crossins_site::config::SiteConfig;
use crossins_site::forms::{LOGIN_FAILURE, QUOTE_FAILURE, QUOTE_SUCCESS};
use crossins_site::routes::dashboard::{LOAD_FAILED, LOGIN_REQUIRED};
use crossins_site::state::AppState;

// ── fake backend ─────────────────────────────────────────────────────

const STAFF_COOKIE: &str = "sessionid=staff";

fn has_staff_cookie(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|c| c.contains(STAFF_COOKIE))
}

async fn session_status(headers: HeaderMap) -> impl IntoResponse {
    if has_staff_cookie(&headers) {
        axum::Json(json!({"authenticated": true, "username": "maria", "is_staff": true}))
    } else {
        axum::Json(json!({"authenticated": false, "username": null, "is_staff": false}))
    }
}

async fn metrics(headers: HeaderMap) -> Response {
    if !has_staff_cookie(&headers) {
        return (
            StatusCode::FORBIDDEN,
            axum::Json(json!({"detail": "Acceso restringido"})),
        )
            .into_response();
    }
    axum::Json(json!({
        "summary": {
            "total_clients": 41,
            "total_policies": 87,
            "active_policies": 70,
            "pending_policies": 9,
            "renewals_next_30_days": 6,
            "manual_invoices": 2,
            "invoices_pending": 4,
            "leads_last_7_days": 3
        },
        "alerts": {
            "renewals": [{
                "policy_number": "AUTO-778",
                "client": "Carmen Díaz",
                "product": "Autos",
                "renewal_date": "2025-01-15",
                "status": "active"
            }],
            "invoices": [],
            "leads": []
        }
    }))
    .into_response()
}

async fn login(axum::Json(body): axum::Json<serde_json::Value>) -> Response {
    match (body["username"].as_str(), body["password"].as_str()) {
        (Some("maria"), Some("correct")) => (
            [(header::SET_COOKIE, "sessionid=staff; HttpOnly; Path=/")],
            axum::Json(json!({"detail": "ok"})),
        )
            .into_response(),
        (Some("broken"), _) => (StatusCode::BAD_GATEWAY, "<html>proxy error</html>").into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({"detail": "Credenciales inválidas o usuario sin permisos."})),
        )
            .into_response(),
    }
}

fn backend(quote_status: StatusCode) -> Router {
    Router::new()
        .route("/api/auth/session/", get(session_status))
        .route("/api/auth/login/", post(login))
        .route(
            "/api/auth/logout/",
            post(|| async {
                (
                    [(header::SET_COOKIE, "sessionid=\"\"; Max-Age=0; Path=/")],
                    axum::Json(json!({"detail": "bye"})),
                )
            }),
        )
        .route("/api/dashboard/metrics/", get(metrics))
        .route("/api/leads/", post(move || async move { quote_status }))
}

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn site_state(base: &str) -> Arc<AppState> {
    let config = SiteConfig {
        api_base_url: format!("{base}/api"),
        quote_endpoint: format!("{base}/api/leads/"),
        ..SiteConfig::default()
    };
    Arc::new(AppState::new(config, CancellationToken::new()).unwrap())
}

async fn site(quote_status: StatusCode) -> Router {
    build_router(site_state(&spawn_backend(backend(quote_status)).await))
}

// ── request helpers ──────────────────────────────────────────────────

fn get_req(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn form_req(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

fn multipart_req(fields: &[(&str, &str)]) -> Request<Body> {
    let boundary = "crossins-test-boundary";
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"attachment\"; filename=\"\"\r\nContent-Type: application/octet-stream\r\n\r\n\r\n"
    ));
    body.push_str(&format!("--{boundary}--\r\n"));

    Request::builder()
        .method("POST")
        .uri("/quote")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn set_cookies(resp: &Response) -> Vec<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

fn quote_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Juan Pérez"),
        ("phone", "+1 787 555 1234"),
        ("email", "juan@example.com"),
        ("insurance_type", "Vida"),
        ("notes", "Familia de cuatro"),
    ]
}

// ── landing ──────────────────────────────────────────────────────────

#[tokio::test]
async fn landing_renders_staff_menu_from_forwarded_cookie() {
    let app = site(StatusCode::CREATED).await;

    let resp = app.oneshot(get_req("/", Some(STAFF_COOKIE))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(resp.headers()[header::X_FRAME_OPTIONS], "DENY");
    let html = body_text(resp).await;
    assert!(html.contains(r#"href="/dashboard""#));
    assert!(html.contains("Cerrar sesión"));
}

#[tokio::test]
async fn landing_with_backend_down_renders_anonymous_menu() {
    let app = build_router(site_state(&unreachable_backend().await));

    let resp = app.oneshot(get_req("/", Some(STAFF_COOKIE))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Iniciar sesión"));
    assert!(!html.contains(r#"href="/dashboard""#));
}

#[tokio::test]
async fn session_endpoint_is_json_and_uncached() {
    let app = site(StatusCode::CREATED).await;

    let resp = app
        .oneshot(get_req("/session", Some(STAFF_COOKIE)))
        .await
        .unwrap();

    assert_eq!(resp.headers()[header::CACHE_CONTROL], "no-store");
    let body: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(
        body,
        json!({"authenticated": true, "username": "maria", "is_staff": true})
    );
}

#[tokio::test]
async fn healthz_answers_ok() {
    let app = site(StatusCode::CREATED).await;
    let resp = app.oneshot(get_req("/healthz", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");
}

// ── quote ────────────────────────────────────────────────────────────

#[tokio::test]
async fn quote_success_clears_the_form() {
    let app = site(StatusCode::CREATED).await;

    let resp = app.oneshot(multipart_req(&quote_fields())).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains(QUOTE_SUCCESS));
    assert!(!html.contains("juan@example.com"));
    assert!(html.contains(r#"<option value="Autos" selected>"#));
}

#[tokio::test]
async fn quote_failure_preserves_the_form() {
    let app = site(StatusCode::INTERNAL_SERVER_ERROR).await;

    let resp = app.oneshot(multipart_req(&quote_fields())).await.unwrap();

    let html = body_text(resp).await;
    assert!(html.contains(QUOTE_FAILURE));
    assert!(html.contains(r#"value="juan@example.com""#));
    assert!(html.contains(r#"<option value="Vida" selected>"#));
    assert!(html.contains("Familia de cuatro</textarea>"));
}

#[tokio::test]
async fn quote_with_backend_down_preserves_the_form() {
    let app = build_router(site_state(&unreachable_backend().await));

    let resp = app.oneshot(multipart_req(&quote_fields())).await.unwrap();

    let html = body_text(resp).await;
    assert!(html.contains(QUOTE_FAILURE));
    assert!(html.contains(r#"value="Juan Pérez""#));
}

#[tokio::test]
async fn quote_failure_keeps_values_that_look_like_slots() {
    let app = site(StatusCode::INTERNAL_SERVER_ERROR).await;

    let resp = app
        .oneshot(multipart_req(&[
            ("name", "{{EMAIL}}"),
            ("phone", "{{MESSAGE}}"),
            ("email", "ana@example.com"),
            ("insurance_type", "Autos"),
            ("notes", "{{NAME}}"),
        ]))
        .await
        .unwrap();

    let html = body_text(resp).await;
    assert!(html.contains(QUOTE_FAILURE));
    assert!(html.contains(r#"name="name" type="text" required placeholder="Ej. Juan Pérez" value="{{EMAIL}}""#));
    assert!(html.contains(r#"value="{{MESSAGE}}""#));
    assert!(html.contains(">{{NAME}}</textarea>"));
    assert!(!html.contains(r#"value="<p"#));
}

#[tokio::test]
async fn malformed_quote_is_bad_request() {
    let app = site(StatusCode::CREATED).await;
    let req = Request::builder()
        .method("POST")
        .uri("/quote")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=xyz")
        .body(Body::from("this is not multipart"))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── login ────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_page_shows_staff_notice() {
    let app = site(StatusCode::CREATED).await;

    let resp = app
        .oneshot(get_req("/login?reason=staff_required", None))
        .await
        .unwrap();

    assert!(body_text(resp).await.contains(LOGIN_REQUIRED));
}

#[tokio::test]
async fn login_success_relays_cookie_and_redirects() {
    let app = site(StatusCode::CREATED).await;

    let resp = app
        .oneshot(form_req("/login", "username=maria&password=correct", None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");
    assert_eq!(set_cookies(&resp), vec!["sessionid=staff; HttpOnly; Path=/"]);
}

#[tokio::test]
async fn login_rejection_shows_server_detail() {
    let app = site(StatusCode::CREATED).await;

    let resp = app
        .oneshot(form_req("/login", "username=maria&password=nope", None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Credenciales inválidas o usuario sin permisos."));
    assert!(html.contains(r#"value="maria""#));
    assert!(!html.contains("nope"));
}

#[tokio::test]
async fn login_unparsable_rejection_shows_fallback() {
    let app = site(StatusCode::CREATED).await;

    let resp = app
        .oneshot(form_req("/login", "username=broken&password=x", None))
        .await
        .unwrap();

    assert!(body_text(resp).await.contains(LOGIN_FAILURE));
}

#[tokio::test]
async fn login_blank_password_never_reaches_backend() {
    let app = build_router(site_state(&unreachable_backend().await));

    let resp = app
        .oneshot(form_req("/login", "username=maria&password=", None))
        .await
        .unwrap();

    assert!(body_text(resp).await.contains("Ingresa tu usuario y contraseña"));
}

// ── logout ───────────────────────────────────────────────────────────

#[tokio::test]
async fn logout_relays_backend_cookie_and_honors_next() {
    let app = site(StatusCode::CREATED).await;

    let resp = app
        .oneshot(form_req("/logout", "next=%2Flogin", Some(STAFF_COOKIE)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
    assert_eq!(set_cookies(&resp), vec!["sessionid=\"\"; Max-Age=0; Path=/"]);
}

#[tokio::test]
async fn logout_with_backend_down_still_logs_out() {
    let app = build_router(site_state(&unreachable_backend().await));

    let resp = app
        .oneshot(form_req("/logout", "next=%2F", Some(STAFF_COOKIE)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    assert_eq!(
        set_cookies(&resp),
        vec!["sessionid=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax"]
    );
}

#[tokio::test]
async fn logout_without_body_still_redirects_home() {
    let app = site(StatusCode::CREATED).await;
    let req = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(header::COOKIE, STAFF_COOKIE)
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    assert_eq!(set_cookies(&resp), vec!["sessionid=\"\"; Max-Age=0; Path=/"]);
}

#[tokio::test]
async fn logout_ignores_foreign_next() {
    let app = site(StatusCode::CREATED).await;

    let resp = app
        .oneshot(form_req(
            "/logout",
            "next=https%3A%2F%2Fevil.example",
            Some(STAFF_COOKIE),
        ))
        .await
        .unwrap();

    assert_eq!(location(&resp), "/");
}

// ── dashboard ────────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_forbidden_redirects_to_login() {
    let app = site(StatusCode::CREATED).await;

    let resp = app.oneshot(get_req("/dashboard", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login?reason=staff_required");
}

#[tokio::test]
async fn dashboard_renders_snapshot_for_staff() {
    let app = site(StatusCode::CREATED).await;

    let resp = app
        .oneshot(get_req("/dashboard", Some(STAFF_COOKIE)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CACHE_CONTROL], "no-store");
    let html = body_text(resp).await;
    assert!(html.contains("AUTO-778 • Carmen Díaz"));
    assert!(html.contains("15 ene 2025 • active"));
    assert_eq!(html.matches("Sin alertas en este momento.").count(), 2);
}

#[tokio::test]
async fn dashboard_backend_down_shows_generic_failure() {
    let app = build_router(site_state(&unreachable_backend().await));

    let resp = app
        .oneshot(get_req("/dashboard", Some(STAFF_COOKIE)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(resp).await;
    assert!(html.contains(LOAD_FAILED));
    assert!(!html.contains(LOGIN_REQUIRED));
}

#[tokio::test]
async fn dashboard_during_shutdown_sets_no_error() {
    let state = site_state(&spawn_backend(backend(StatusCode::CREATED)).await);
    state.shutdown.cancel();
    let app = build_router(state);

    let resp = app
        .oneshot(get_req("/dashboard", Some(STAFF_COOKIE)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_text(resp).await.is_empty());
}
