//! 거래소 중계 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! `/api` 하위는 거래소 중계, 그 외 경로는 정적 파일을 서빙합니다.

use std::{sync::Arc, time::Duration};

use axum::{http::StatusCode, Router};
use relay_api::{create_api_router, AppState, ServerConfig};
use relay_exchange::BithumbClient;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};

/// CORS 미들웨어 구성.
///
/// `CORS_ORIGINS` 환경변수가 설정되어 있으면 해당 origin만 허용하고,
/// 설정되지 않으면 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let static_files = ServeDir::new(&config.static_dir);
    info!(dir = %config.static_dir.display(), "정적 파일 서빙");

    create_api_router()
        .with_state(state)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        // 거래소 호출 자체에는 타임아웃이 없으므로 HTTP 계층에서 제한
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "relay_api=info,relay_exchange=info,tower_http=debug".into()
            }),
        )
        .init();

    info!("Starting relay API server...");

    let config = ServerConfig::from_env();
    let addr = config.socket_addr().map_err(|e| {
        error!(
            host = %config.host,
            port = config.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. API_HOST, API_PORT 환경변수를 확인하세요."
        );
        e
    })?;

    let exchange = BithumbClient::with_base_url(&config.exchange_url)
        .with_nonce_source(config.nonce_mode.nonce_source());
    info!(
        exchange_url = %exchange.base_url(),
        nonce_mode = ?config.nonce_mode,
        "Exchange client initialized"
    );

    let state = Arc::new(AppState::new(Arc::new(exchange)));
    info!(
        version = %state.version,
        exchange = state.exchange.exchange_name(),
        "Application state initialized"
    );

    let app = create_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "서버가 http://{} 에서 실행 중입니다.", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기 (Ctrl+C 또는 SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
