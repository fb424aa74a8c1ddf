use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use member_board::posts::{post_router, PostRepository, PostService};
use member_board::users::{user_router, MailSender, UserRepository, UserService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_board_routes<R, M, P>(
    users: Arc<UserService<R, M>>,
    posts: Arc<PostService<P, R>>,
    verify_redirect_url: String,
) -> Router
where
    R: UserRepository + 'static,
    M: MailSender + 'static,
    P: PostRepository + 'static,
{
    user_router(users, verify_redirect_url)
        .merge(post_router(posts))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(std::sync::atomic::Ordering::Relaxed) {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryPostRepository, InMemoryUserRepository, LoggingMailSender};
    use axum::body::Body;
    use axum::http::Request;
    use member_board::users::UserServiceConfig;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> Router {
        let users = Arc::new(InMemoryUserRepository::default());
        let user_service = Arc::new(UserService::new(
            users.clone(),
            Arc::new(LoggingMailSender),
            UserServiceConfig {
                public_base_url: "http://localhost:8080".to_string(),
            },
        ));
        let post_service = Arc::new(PostService::new(
            Arc::new(InMemoryPostRepository::default()),
            users,
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        with_board_routes(
            user_service,
            post_service,
            "http://localhost:3000".to_string(),
        )
        .layer(Extension(state))
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn registration_is_served_alongside_health() {
        let app = app(true);

        let health = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(health.status(), StatusCode::OK);

        let created = app
            .oneshot(
                Request::post("/api/users")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header("EMAIL", "meme@naver.com")
                    .body(Body::from(
                        json!({
                            "email": "meme@naver.com",
                            "nickname": "meme",
                            "address": "Pangyo",
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(created.status(), StatusCode::CREATED);
    }
}
