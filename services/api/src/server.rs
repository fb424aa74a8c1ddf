use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPostRepository, InMemoryUserRepository, LoggingMailSender};
use crate::routes::with_board_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use member_board::config::AppConfig;
use member_board::error::AppError;
use member_board::posts::PostService;
use member_board::telemetry;
use member_board::users::{UserService, UserServiceConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let users = Arc::new(InMemoryUserRepository::default());
    let user_service = Arc::new(UserService::new(
        users.clone(),
        Arc::new(LoggingMailSender),
        UserServiceConfig {
            public_base_url: config.links.public_base_url.clone(),
        },
    ));
    let post_service = Arc::new(PostService::new(
        Arc::new(InMemoryPostRepository::default()),
        users,
    ));

    let app = with_board_routes(
        user_service,
        post_service,
        config.links.verify_redirect_url.clone(),
    )
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "member board ready");

    axum::serve(listener, app).await?;
    Ok(())
}
