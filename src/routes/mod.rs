use crate::handlers;
use axum::{extract::DefaultBodyLimit, routing, Router};

/// Body cap for the careers upload, set well above the 5 MiB résumé limit
/// so oversized files reach the validation error instead of a bare 413.
const CAREERS_BODY_LIMIT: usize = 25 * 1024 * 1024;

pub fn create_routes() -> Router {
    Router::new().nest("/api", api_routes())
}

fn api_routes() -> Router {
    Router::new()
        .route("/contact", routing::post(handlers::submit_contact))
        .route(
            "/careers",
            routing::post(handlers::submit_application)
                .layer(DefaultBodyLimit::max(CAREERS_BODY_LIMIT)),
        )
        .route(
            "/test-email-simple",
            routing::get(handlers::test_email_simple),
        )
        .route(
            "/test-email-detailed",
            routing::get(handlers::test_email_detailed),
        )
}
