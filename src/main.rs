mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod response;
mod routes;
mod services;
mod utils;

use axum::{middleware as axum_middleware, response::IntoResponse, routing::get, Json, Router};
use config::email::EmailConfig;
use serde_json::json;
use std::env;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        crate::handlers::contact::submit_contact,
        crate::handlers::careers::submit_application,
        crate::handlers::diagnostics::test_email_simple,
        crate::handlers::diagnostics::test_email_detailed,
    ),
    components(
        schemas(
            crate::response::MessageResponse,
            crate::response::EmailTestResponse,
            crate::error::AppError,
            crate::models::contact::ContactSubmission,
        )
    ),
    tags(
        (name = "forms", description = "Form submission endpoints"),
        (name = "diagnostics", description = "Email configuration diagnostics"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anoka_api=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting Anoka Health Center API v{}...",
        env!("CARGO_PKG_VERSION")
    );

    // Advisory only: the config is re-read from the environment on every
    // request, so a warning here never blocks startup.
    let email_config = EmailConfig::from_env();
    if email_config.has_credentials() {
        tracing::info!("SMTP credentials present for {}", email_config.smtp_host);
    } else {
        tracing::warn!("SMTP credentials not set; form submissions will fail until configured");
    }

    let public_dir = env::var("PUBLIC_DIR").unwrap_or_else(|_| "./public".to_string());
    let app = create_app(&public_dir);

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

fn build_cors_layer() -> CorsLayer {
    use axum::http::{header, HeaderValue, Method};

    let origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins_str == "*" {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

fn create_app(public_dir: &str) -> Router {
    Router::new()
        .route("/", get(health_check))
        .merge(routes::create_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(public_dir))
        .layer(axum_middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Health check successful", body = serde_json::Value)
    )
)]
async fn health_check() -> impl IntoResponse {
    let smtp_configured = EmailConfig::from_env().has_credentials();

    Json(json!({
        "status": "ok",
        "service": "Anoka Health Center API",
        "version": env!("CARGO_PKG_VERSION"),
        "smtp_configured": smtp_configured,
    }))
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received, gracefully shutting down...");
}
