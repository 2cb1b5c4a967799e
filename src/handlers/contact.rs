use crate::config::email::EmailConfig;
use crate::error::{AppError, AppResult};
use crate::models::ContactSubmission;
use crate::response::MessageResponse;
use crate::services::EmailNotifier;
use axum::{response::IntoResponse, Json};
use validator::Validate;

/// Accept a contact-form submission and relay it by email.
/// POST /api/contact (JSON body)
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactSubmission,
    responses(
        (status = 200, description = "Email sent", body = MessageResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 500, description = "Send or configuration failure", body = AppError),
    ),
    tag = "forms"
)]
pub async fn submit_contact(
    Json(submission): Json<ContactSubmission>,
) -> AppResult<impl IntoResponse> {
    submission
        .validate()
        .map_err(|e| AppError::Validation(ContactSubmission::error_message(&e)))?;

    // Snapshot the environment per request; nothing is cached.
    let config = EmailConfig::from_env();
    config.require_complete(&config.contact_recipient)?;

    tracing::debug!(
        host = %config.smtp_host,
        port = config.smtp_port,
        secure = config.smtp_secure,
        recipient = %config.contact_recipient,
        "Contact form config"
    );

    if let Err(e) = EmailNotifier::send_contact_email(&submission, &config).await {
        tracing::error!("Error sending contact email: {e}");
        return Err(AppError::Delivery("Failed to send email".to_string()));
    }

    Ok(MessageResponse::new("Email sent successfully"))
}
