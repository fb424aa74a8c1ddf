use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{PostCreate, PostId, PostResponse, PostUpdate};
use super::repository::PostRepository;
use super::service::{PostService, PostServiceError};
use crate::users::UserRepository;

/// Router builder exposing post endpoints.
pub fn post_router<P, U>(service: Arc<PostService<P, U>>) -> Router
where
    P: PostRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route("/api/posts", post(create_handler::<P, U>))
        .route(
            "/api/posts/:id",
            get(get_handler::<P, U>).put(update_handler::<P, U>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<P, U>(
    State(service): State<Arc<PostService<P, U>>>,
    Json(request): Json<PostCreate>,
) -> Response
where
    P: PostRepository + 'static,
    U: UserRepository + 'static,
{
    match service.create(request) {
        Ok(post) => (StatusCode::CREATED, Json(PostResponse::from(&post))).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn get_handler<P, U>(
    State(service): State<Arc<PostService<P, U>>>,
    Path(id): Path<u64>,
) -> Response
where
    P: PostRepository + 'static,
    U: UserRepository + 'static,
{
    match service.get_by_id(PostId(id)) {
        Ok(post) => (StatusCode::OK, Json(PostResponse::from(&post))).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn update_handler<P, U>(
    State(service): State<Arc<PostService<P, U>>>,
    Path(id): Path<u64>,
    Json(update): Json<PostUpdate>,
) -> Response
where
    P: PostRepository + 'static,
    U: UserRepository + 'static,
{
    match service.update(PostId(id), update) {
        Ok(post) => (StatusCode::OK, Json(PostResponse::from(&post))).into_response(),
        Err(error) => error.into_response(),
    }
}

impl IntoResponse for PostServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            PostServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            PostServiceError::User(inner) => inner.status_code(),
            PostServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let payload = json!({ "error": self.to_string() });
        (status, Json(payload)).into_response()
    }
}
