mod cli;
mod core;
mod features;
mod modules;
mod shared;

use crate::cli::{Cli, Command, ServeArgs};
use crate::core::config::{self as app_config, AppConfig, Config};
use crate::core::error::AppError;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::regions::{routes as regions_routes, RegionIndexService};
use crate::shared::constants::{DEFAULT_LIST_LOG_FILTER, DEFAULT_SERVE_LOG_FILTER};
use axum::{http::StatusCode, routing::get, Router};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli.into_command()))
}

async fn async_main(command: Command) -> anyhow::Result<ExitCode> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    app_config::load_dotenv();

    let default_filter = match command {
        Command::List(_) => DEFAULT_LIST_LOG_FILTER,
        Command::Serve(_) => DEFAULT_SERVE_LOG_FILTER,
    };

    // Logs go to stderr; stdout carries the listing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().map_err(AppError::Config)?;
    tracing::debug!("Configuration loaded successfully");

    match command {
        Command::List(args) => cli::run_list(args, &config).await,
        Command::Serve(args) => {
            serve(args, config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn serve(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let mut app_settings = AppConfig::from_env().map_err(AppError::Config)?;
    args.apply_to(&mut app_settings);

    let source = args.source.into_source(&config.index)?;
    tracing::info!("Region index source: {}", source.describe());

    let region_service = Arc::new(RegionIndexService::new(source));
    tracing::info!("Region index service initialized");

    let app = build_app(region_service, &config, &app_settings);

    let addr = app_settings.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_app(
    region_service: Arc<RegionIndexService>,
    config: &Config,
    app_settings: &AppConfig,
) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    async fn health_check() -> StatusCode {
        StatusCode::OK
    }

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(regions_routes::routes(region_service))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::cors_layer(
                    app_settings.cors_allowed_origins.clone(),
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{IndexConfig, SwaggerConfig};
    use crate::shared::test_helpers::{StaticIndexSource, NESTED_SAMPLE};
    use axum_test::TestServer;

    fn test_app_settings() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }

    fn test_config() -> Config {
        Config {
            index: IndexConfig::default(),
            swagger: SwaggerConfig {
                title: "Test Regions".to_string(),
                version: "0.0.1".to_string(),
                description: "Test".to_string(),
            },
        }
    }

    fn test_server() -> TestServer {
        let service = Arc::new(RegionIndexService::new(Arc::new(StaticIndexSource::new(
            NESTED_SAMPLE,
        ))));
        TestServer::new(build_app(service, &test_config(), &test_app_settings())).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        test_server().get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let response = test_server().get("/api/regions").await;
        response.assert_status_ok();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_openapi_uses_configured_info() {
        let response = test_server().get("/api-docs/openapi.json").await;
        response.assert_status_ok();

        let doc: serde_json::Value = response.json();
        assert_eq!(doc["info"]["title"], "Test Regions");
        assert!(doc["paths"]["/api/regions"].is_object());
    }
}
