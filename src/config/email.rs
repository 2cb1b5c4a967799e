use crate::error::{AppError, AppResult};
use std::env;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP and recipient settings for outbound notification email.
///
/// Resolved fresh from the environment on every call so configuration
/// changes take effect without a restart. Fields may be empty when the
/// environment is misconfigured; each handler decides via
/// [`EmailConfig::require_complete`] whether to abort the request.
#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_secure: bool,
    pub smtp_user: String,
    pub smtp_password: String,
    pub contact_recipient: String,
    pub careers_recipient: String,
    pub from_address: String,
}

impl EmailConfig {
    /// Snapshot the email configuration from environment variables.
    pub fn from_env() -> Self {
        let smtp_user = env::var("SMTP_USER").unwrap_or_default();
        Self {
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            smtp_secure: env::var("SMTP_SECURE").as_deref() == Ok("true"),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            contact_recipient: env::var("CONTACT_FORM_RECIPIENT").unwrap_or_default(),
            careers_recipient: env::var("CAREERS_FORM_RECIPIENT").unwrap_or_default(),
            from_address: smtp_user.clone(),
            smtp_user,
        }
    }

    /// True when SMTP credentials are present. Used by the health check and
    /// diagnostics; does not probe the network.
    pub fn has_credentials(&self) -> bool {
        !self.smtp_user.is_empty() && !self.smtp_password.is_empty()
    }

    /// Fail with a configuration error unless credentials and the given
    /// recipient are all set. The missing keys end up in the server log,
    /// never in the response body.
    pub fn require_complete(&self, recipient: &str) -> AppResult<()> {
        let mut missing = Vec::new();
        if self.smtp_user.is_empty() {
            missing.push("SMTP_USER");
        }
        if self.smtp_password.is_empty() {
            missing.push("SMTP_PASSWORD");
        }
        if recipient.is_empty() {
            missing.push("recipient address");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Configuration(format!(
                "missing: {}",
                missing.join(", ")
            )))
        }
    }
}
