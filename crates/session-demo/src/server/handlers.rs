//! Axum request handlers for all demo endpoints.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::{debug, info};

use super::{cookie, pages, state::AppState};
use crate::error::ServiceError;
use crate::protocol::{ErrorResponse, HealthResponse, SessionResponse};

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
}

/// `GET /` — home page.
///
/// A cookie that fails to unseal is cleared and the login form is shown.
pub async fn home(State(state): State<AppState>, cookies: Cookies) -> Html<String> {
    let Some(session) = cookies.get(&state.cookie_name) else {
        return Html(pages::home(None));
    };

    let token = session.value();
    match state.tokener.unseal_string(token) {
        Ok(email) => Html(pages::home(Some(pages::SessionView {
            email: &email,
            token,
        }))),
        Err(e) => {
            info!(error = %e, "discarding session cookie");
            cookies.remove(cookie::removal(&state.cookie_name));
            Html(pages::home(None))
        }
    }
}

/// `POST /login` — seal the email into a session cookie and go home.
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Response, ServiceError> {
    let email = form.email.trim();
    if email.is_empty() {
        return Err(ServiceError::BadRequest("email is required".into()));
    }

    let token = state.tokener.seal_str(email)?;
    debug!("session opened");

    cookies.add(cookie::session(&state.cookie_name, token, state.tokener.ttl()));
    Ok(see_home())
}

/// `POST /logout` — clear the session cookie and go home.
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Response {
    cookies.remove(cookie::removal(&state.cookie_name));
    see_home()
}

/// `GET /api/session` — the current session as JSON.
pub async fn session(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Json<SessionResponse>, ServiceError> {
    let session = cookies
        .get(&state.cookie_name)
        .ok_or(ServiceError::Unauthorized("no_session"))?;

    let unsealed = state.tokener.unseal_detailed(session.value())?;
    let email = String::from_utf8(unsealed.plaintext)
        .map_err(|_| ServiceError::Unauthorized("token_invalid"))?;

    Ok(Json(SessionResponse {
        email,
        issued_at_unix_ns: unsealed.issued_at.as_unix_nanos(),
    }))
}

/// `GET /health` — liveness check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        suite: state.tokener.suite().to_string(),
        ttl_secs: state.tokener.ttl().as_secs(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

fn see_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::Request,
        Router,
    };
    use securetoken::{ManualClock, Timestamp, Tokener};
    use tower::ServiceExt;
    use tower_cookies::Cookie;

    use super::*;
    use crate::server::router;

    const TTL: Duration = Duration::from_secs(3600);

    fn app() -> (Router, ManualClock) {
        let clock = ManualClock::new(Timestamp::from_unix_nanos(1_000_000_000));
        let tokener = Tokener::builder(b"1234567887654321")
            .ttl(TTL)
            .clock(clock.clone())
            .build()
            .unwrap();
        (router::build(AppState::new(tokener, "session".into())), clock)
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut req = Request::builder().uri(uri);
        if let Some(c) = cookie {
            req = req.header(header::COOKIE, format!("session={c}"));
        }
        req.body(Body::empty()).unwrap()
    }

    fn login_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Log in and return the session token from `Set-Cookie`.
    async fn log_in(app: &Router) -> String {
        let resp = app
            .clone()
            .oneshot(login_request("email=a.person%40some.domain.com"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[header::LOCATION], "/");
        let set_cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
        let cookie = Cookie::parse_encoded(set_cookie.to_owned()).unwrap();
        assert_eq!(cookie.name(), "session");
        cookie.value().to_owned()
    }

    #[tokio::test]
    async fn anonymous_home_shows_login_form() {
        let (app, _) = app();
        let resp = app.oneshot(get("/", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_string(resp).await.contains(r#"name="email""#));
    }

    #[tokio::test]
    async fn login_then_home_shows_email() {
        let (app, _) = app();
        let token = log_in(&app).await;

        let resp = app.oneshot(get("/", Some(&token))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("signed in as a.person@some.domain.com"));
        assert!(body.contains(&token));
    }

    #[tokio::test]
    async fn api_session_returns_email_and_issue_time() {
        let (app, _) = app();
        let token = log_in(&app).await;

        let resp = app.oneshot(get("/api/session", Some(&token))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: SessionResponse = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body.email, "a.person@some.domain.com");
        assert_eq!(body.issued_at_unix_ns, 1_000_000_000);
    }

    #[tokio::test]
    async fn api_session_without_cookie_is_401() {
        let (app, _) = app();
        let resp = app.oneshot(get("/api/session", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body.code, "no_session");
    }

    #[tokio::test]
    async fn expired_session_is_rejected_and_cleared() {
        let (app, clock) = app();
        let token = log_in(&app).await;
        clock.advance(TTL + Duration::from_secs(1));

        let resp = app
            .clone()
            .oneshot(get("/api/session", Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body.code, "token_expired");

        let resp = app.oneshot(get("/", Some(&token))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let cleared = resp.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn forged_session_is_invalid() {
        let (app, _) = app();
        let mut token = log_in(&app).await;
        let flipped = if token.starts_with("AQ") { "AR" } else { "AQ" };
        token.replace_range(..2, flipped);

        let resp = app.oneshot(get("/api/session", Some(&token))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body.code, "token_invalid");
    }

    #[tokio::test]
    async fn login_with_blank_email_is_400() {
        let (app, _) = app();
        let resp = app.oneshot(login_request("email=++")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_sets_session_cookie_attributes() {
        let (app, _) = app();
        let resp = app
            .oneshot(login_request("email=a.person%40some.domain.com"))
            .await
            .unwrap();
        let set_cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
        let cookie = Cookie::parse_encoded(set_cookie.to_owned()).unwrap();
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(
            cookie.same_site(),
            Some(tower_cookies::cookie::SameSite::Lax)
        );
        assert_eq!(
            cookie.max_age(),
            Some(tower_cookies::cookie::time::Duration::seconds(3600))
        );
    }

    #[tokio::test]
    async fn logout_clears_cookie() {
        let (app, _) = app();
        let token = log_in(&app).await;
        let req = Request::builder()
            .method("POST")
            .uri("/logout")
            .header(header::COOKIE, format!("session={token}"))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[header::LOCATION], "/");
        let cleared = resp.headers()[header::SET_COOKIE].to_str().unwrap();
        let cookie = Cookie::parse_encoded(cleared.to_owned()).unwrap();
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn health_reports_suite() {
        let (app, _) = app();
        let resp = app.oneshot(get("/health", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: HealthResponse = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body.status, "ok");
        assert_eq!(body.suite, "AES-128-GCM-SIV");
        assert_eq!(body.ttl_secs, 3600);
    }
}
