use crate::config::email::EmailConfig;
use crate::models::{ContactSubmission, JobApplication};
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

pub const CONTACT_SUBJECT: &str = "New Contact Form Submission - Anoka Health Center";
pub const CAREERS_SUBJECT_PREFIX: &str = "New Job Application - Anoka Health Center";

/// Why a notification could not be sent. Handlers log the cause and map
/// every variant to the same generic failure body, so the distinction is
/// visible in logs and tests but not to HTTP callers.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("invalid attachment content type: {0}")]
    AttachmentType(#[from] lettre::message::header::ContentTypeErr),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Delivers form submissions as email over SMTP.
///
/// A fresh transport is built from the passed [`EmailConfig`] on every call,
/// so the notifier itself carries no state and reacts to environment changes
/// without a restart. One attempt per call; there is no retry.
pub struct EmailNotifier;

impl EmailNotifier {
    /// Relay a contact-form submission to the configured contact recipient.
    pub async fn send_contact_email(
        submission: &ContactSubmission,
        config: &EmailConfig,
    ) -> Result<(), NotifyError> {
        let email = Message::builder()
            .from(parse_mailbox(&config.from_address)?)
            .to(parse_mailbox(&config.contact_recipient)?)
            .reply_to(parse_mailbox(&submission.email)?)
            .subject(CONTACT_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(contact_email_html(submission))?;

        transport(config)?.send(email).await?;
        tracing::info!("Contact notification sent to {}", config.contact_recipient);
        Ok(())
    }

    /// Relay a job application, résumé attached, to the careers recipient.
    pub async fn send_job_application_email(
        application: &JobApplication,
        config: &EmailConfig,
    ) -> Result<(), NotifyError> {
        let attachment = Attachment::new(application.attachment_filename()).body(
            application.resume.data.to_vec(),
            ContentType::parse("application/pdf")?,
        );

        let email = Message::builder()
            .from(parse_mailbox(&config.from_address)?)
            .to(parse_mailbox(&config.careers_recipient)?)
            .reply_to(parse_mailbox(&application.email)?)
            .subject(format!(
                "{} - {}",
                CAREERS_SUBJECT_PREFIX, application.position
            ))
            .multipart(
                MultiPart::mixed()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(job_application_html(application)),
                    )
                    .singlepart(attachment),
            )?;

        transport(config)?.send(email).await?;
        tracing::info!(
            "Job application for '{}' sent to {}",
            application.position,
            config.careers_recipient
        );
        Ok(())
    }

    /// Open an SMTP connection and check credentials without sending
    /// anything. Only the diagnostic endpoints call this.
    pub async fn verify(config: &EmailConfig) -> Result<bool, NotifyError> {
        Ok(transport(config)?.test_connection().await?)
    }
}

/// Build a single-use SMTP transport from the config snapshot. `smtp_secure`
/// selects wrapper TLS (implicit, port 465 style); otherwise the connection
/// starts plain and upgrades via STARTTLS.
fn transport(config: &EmailConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
    let builder = if config.smtp_secure {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
    };

    Ok(builder
        .port(config.smtp_port)
        .credentials(Credentials::new(
            config.smtp_user.clone(),
            config.smtp_password.clone(),
        ))
        .build())
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address.parse().map_err(|source| NotifyError::Address {
        address: address.to_string(),
        source,
    })
}

/// Strip markup from user text so it is safe to interpolate into the HTML
/// body. An empty whitelist leaves only escaped text content.
fn escape(text: &str) -> String {
    ammonia::Builder::empty().clean(text).to_string()
}

/// Like [`escape`], with newlines converted to `<br>`.
fn escape_multiline(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}

fn contact_email_html(submission: &ContactSubmission) -> String {
    let phone = if submission.phone.is_empty() {
        "Not provided".to_string()
    } else {
        escape(&submission.phone)
    };

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #00799F;">New Contact Form Submission</h2>
  <p><strong>Name:</strong> {name}</p>
  <p><strong>Email:</strong> {email}</p>
  <p><strong>Phone:</strong> {phone}</p>
  <p><strong>Message:</strong></p>
  <div style="background-color: #f5f5f5; padding: 15px; border-radius: 5px; margin: 10px 0;">
    {message}
  </div>
  <hr style="margin: 20px 0;">
  <p style="color: #666; font-size: 12px;">
    This message was sent from the Anoka Health Center contact form.
  </p>
</div>"#,
        name = escape(&submission.name),
        email = escape(&submission.email),
        phone = phone,
        message = escape_multiline(&submission.message),
    )
}

fn job_application_html(application: &JobApplication) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #00799F;">New Job Application</h2>
  <p><strong>Position:</strong> {position}</p>
  <p><strong>Name:</strong> {name}</p>
  <p><strong>Email:</strong> {email}</p>
  <p><strong>Phone:</strong> {phone}</p>
  <hr style="margin: 20px 0;">
  <p style="color: #666; font-size: 12px;">
    This application was submitted through the Anoka Health Center careers page.
    The resume is attached to this email.
  </p>
</div>"#,
        position = escape(&application.position),
        name = escape(&application.name),
        email = escape(&application.email),
        phone = escape(&application.phone),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use crate::models::{JobApplicationForm, ResumeFile};

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jo".to_string(),
            email: "jo@x.com".to_string(),
            phone: String::new(),
            message: "line one\nline two".to_string(),
        }
    }

    #[test]
    fn contact_body_renders_fields() {
        let html = contact_email_html(&submission());
        assert!(html.contains("Jo"));
        assert!(html.contains("jo@x.com"));
        assert!(html.contains("line one<br>line two"));
    }

    #[test]
    fn contact_body_empty_phone_placeholder() {
        let html = contact_email_html(&submission());
        assert!(html.contains("Not provided"));
    }

    #[test]
    fn contact_body_escapes_markup() {
        let mut s = submission();
        s.name = "<script>alert(1)</script>".to_string();
        let html = contact_email_html(&s);
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn job_application_body_renders_fields() {
        let form = JobApplicationForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            position: "Registered Nurse".to_string(),
            resume: Some(ResumeFile {
                filename: "cv.docx".to_string(),
                content_type: "application/msword".to_string(),
                data: Bytes::from_static(b"bytes"),
            }),
        };
        let app = form.validate().unwrap();
        let html = job_application_html(&app);
        assert!(html.contains("Registered Nurse"));
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("555-0100"));
    }

    #[test]
    fn escape_multiline_keeps_plain_text() {
        assert_eq!(escape_multiline("hello there"), "hello there");
    }
}
