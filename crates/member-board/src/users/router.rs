use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{MyProfileResponse, UserCreate, UserId, UserResponse, UserUpdate};
use super::repository::{MailSender, UserRepository};
use super::service::{UserService, UserServiceError};

/// Header carrying the caller's email on the `/api/users/me` endpoints.
pub const EMAIL_HEADER: &str = "EMAIL";

pub(crate) struct UserRoutes<R, M> {
    pub(crate) service: Arc<UserService<R, M>>,
    pub(crate) verify_redirect_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyParams {
    #[serde(rename = "certificationCode")]
    pub(crate) certification_code: String,
}

/// Router builder exposing registration, verification and profile endpoints.
pub fn user_router<R, M>(
    service: Arc<UserService<R, M>>,
    verify_redirect_url: impl Into<String>,
) -> Router
where
    R: UserRepository + 'static,
    M: MailSender + 'static,
{
    let routes = Arc::new(UserRoutes {
        service,
        verify_redirect_url: verify_redirect_url.into(),
    });

    Router::new()
        .route("/api/users", post(create_handler::<R, M>))
        .route(
            "/api/users/me",
            get(my_profile_handler::<R, M>).put(update_my_profile_handler::<R, M>),
        )
        .route("/api/users/:id", get(get_handler::<R, M>))
        .route("/api/users/:id/verify", get(verify_handler::<R, M>))
        .with_state(routes)
}

pub(crate) async fn create_handler<R, M>(
    State(routes): State<Arc<UserRoutes<R, M>>>,
    Json(request): Json<UserCreate>,
) -> Response
where
    R: UserRepository + 'static,
    M: MailSender + 'static,
{
    match routes.service.create(request) {
        Ok(user) => (StatusCode::CREATED, Json(UserResponse::from(&user))).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn get_handler<R, M>(
    State(routes): State<Arc<UserRoutes<R, M>>>,
    Path(id): Path<u64>,
) -> Response
where
    R: UserRepository + 'static,
    M: MailSender + 'static,
{
    match routes.service.get_by_id(UserId(id)) {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(&user))).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn verify_handler<R, M>(
    State(routes): State<Arc<UserRoutes<R, M>>>,
    Path(id): Path<u64>,
    Query(params): Query<VerifyParams>,
) -> Response
where
    R: UserRepository + 'static,
    M: MailSender + 'static,
{
    match routes
        .service
        .verify_email(UserId(id), &params.certification_code)
    {
        Ok(_) => (
            StatusCode::FOUND,
            [(header::LOCATION, routes.verify_redirect_url.clone())],
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Viewing one's own profile counts as a login.
pub(crate) async fn my_profile_handler<R, M>(
    State(routes): State<Arc<UserRoutes<R, M>>>,
    headers: HeaderMap,
) -> Response
where
    R: UserRepository + 'static,
    M: MailSender + 'static,
{
    let email = match caller_email(&headers) {
        Ok(email) => email,
        Err(response) => return response,
    };

    let result = routes
        .service
        .get_by_email(&email)
        .and_then(|user| routes.service.login(user.id));

    match result {
        Ok(user) => (StatusCode::OK, Json(MyProfileResponse::from(&user))).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn update_my_profile_handler<R, M>(
    State(routes): State<Arc<UserRoutes<R, M>>>,
    headers: HeaderMap,
    Json(update): Json<UserUpdate>,
) -> Response
where
    R: UserRepository + 'static,
    M: MailSender + 'static,
{
    let email = match caller_email(&headers) {
        Ok(email) => email,
        Err(response) => return response,
    };

    let result = routes
        .service
        .get_by_email(&email)
        .and_then(|user| routes.service.update(user.id, update));

    match result {
        Ok(user) => (StatusCode::OK, Json(MyProfileResponse::from(&user))).into_response(),
        Err(error) => error.into_response(),
    }
}

fn caller_email(headers: &HeaderMap) -> Result<String, Response> {
    headers
        .get(EMAIL_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            let payload = json!({ "error": format!("missing {EMAIL_HEADER} header") });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        })
}

impl UserServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            UserServiceError::CertificationCodeMismatch => StatusCode::FORBIDDEN,
            UserServiceError::DuplicateEmail(_) => StatusCode::CONFLICT,
            UserServiceError::Repository(_) | UserServiceError::Mail(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for UserServiceError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.to_string() });
        (self.status_code(), Json(payload)).into_response()
    }
}
