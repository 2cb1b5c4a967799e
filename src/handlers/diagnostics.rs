use crate::config::email::EmailConfig;
use crate::response::EmailTestResponse;
use crate::services::EmailNotifier;
use serde_json::json;

const PLACEHOLDER_USER: &str = "your-email@gmail.com";
const PLACEHOLDER_PASSWORD: &str = "your-app-password";

/// Quick SMTP connectivity check.
/// GET /api/test-email-simple — always HTTP 200, outcome in `success`.
#[utoipa::path(
    get,
    path = "/api/test-email-simple",
    responses(
        (status = 200, description = "Diagnostic result", body = EmailTestResponse),
    ),
    tag = "diagnostics"
)]
pub async fn test_email_simple() -> EmailTestResponse {
    tracing::info!("Testing email configuration...");
    let config = EmailConfig::from_env();

    if !config.has_credentials() {
        return EmailTestResponse::err(
            "SMTP credentials are not set. Configure SMTP_USER and SMTP_PASSWORD.",
        );
    }

    match EmailNotifier::verify(&config).await {
        Ok(true) => EmailTestResponse::ok("Email configuration is working properly!"),
        Ok(false) => EmailTestResponse::err("SMTP server rejected the connection test"),
        Err(e) => {
            tracing::error!("Email test error: {e}");
            EmailTestResponse::err(format!("Email configuration test failed: {e}"))
        }
    }
}

/// SMTP connectivity check with the sanitized configuration echoed back.
/// GET /api/test-email-detailed — always HTTP 200, outcome in `success`.
#[utoipa::path(
    get,
    path = "/api/test-email-detailed",
    responses(
        (status = 200, description = "Diagnostic result with config details", body = EmailTestResponse),
    ),
    tag = "diagnostics"
)]
pub async fn test_email_detailed() -> EmailTestResponse {
    tracing::info!("Testing email configuration with detailed output...");
    let config = EmailConfig::from_env();

    let has_placeholders = config.smtp_user.is_empty()
        || config.smtp_password.is_empty()
        || config.smtp_user == PLACEHOLDER_USER
        || config.smtp_password == PLACEHOLDER_PASSWORD;

    if has_placeholders {
        return EmailTestResponse::err(
            "Email configuration has placeholder values. Please update your environment with real credentials.",
        )
        .with_details(json!({
            "smtpConfig": sanitized_config(&config),
            "instructions": [
                "1. Set SMTP_USER to your actual email address",
                "2. Set SMTP_PASSWORD to your actual password or app password",
                "3. Set CONTACT_FORM_RECIPIENT and CAREERS_FORM_RECIPIENT to real email addresses",
                "4. For Gmail: enable 2FA and use an App Password",
            ],
        }));
    }

    match EmailNotifier::verify(&config).await {
        Ok(true) => EmailTestResponse::ok("Email configuration is working properly!")
            .with_details(json!({ "smtpConfig": sanitized_config(&config) })),
        Ok(false) => EmailTestResponse::err("SMTP server rejected the connection test")
            .with_details(json!({ "smtpConfig": sanitized_config(&config) })),
        Err(e) => {
            tracing::error!("Email test error: {e}");
            EmailTestResponse::err(format!("Email configuration test failed: {e}"))
                .with_details(json!({
                    "smtpConfig": sanitized_config(&config),
                    "error": e.to_string(),
                }))
        }
    }
}

/// Config as reported to the caller: password hidden, absent values marked.
fn sanitized_config(config: &EmailConfig) -> serde_json::Value {
    json!({
        "host": config.smtp_host,
        "port": config.smtp_port,
        "secure": config.smtp_secure,
        "auth": {
            "user": if config.smtp_user.is_empty() { "NOT SET" } else { config.smtp_user.as_str() },
            "pass": if config.smtp_password.is_empty() { "NOT SET" } else { "***HIDDEN***" },
        },
    })
}
