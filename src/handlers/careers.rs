use crate::config::email::EmailConfig;
use crate::error::{AppError, AppResult};
use crate::models::{JobApplicationForm, ResumeFile};
use crate::response::MessageResponse;
use crate::services::EmailNotifier;
use axum::extract::multipart::MultipartError;
use axum::{extract::Multipart, response::IntoResponse};

/// Accept a job application (multipart form with a résumé file) and relay
/// it by email to the careers inbox.
/// POST /api/careers (multipart: name, email, phone, position, resume)
#[utoipa::path(
    post,
    path = "/api/careers",
    responses(
        (status = 200, description = "Application submitted", body = MessageResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 500, description = "Send or configuration failure", body = AppError),
    ),
    tag = "forms"
)]
pub async fn submit_application(mut multipart: Multipart) -> AppResult<impl IntoResponse> {
    let mut form = JobApplicationForm::default();

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => form.name = field.text().await.map_err(read_error)?,
            "email" => form.email = field.text().await.map_err(read_error)?,
            "phone" => form.phone = field.text().await.map_err(read_error)?,
            "position" => form.position = field.text().await.map_err(read_error)?,
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                // The résumé is read fully into memory; the size cap is
                // enforced in validation, the body limit on the route.
                let data = field.bytes().await.map_err(read_error)?;
                form.resume = Some(ResumeFile {
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    if let Some(resume) = &form.resume {
        tracing::debug!(
            filename = %resume.filename,
            content_type = %resume.content_type,
            size = resume.data.len(),
            "Resume received"
        );
    }

    let application = form.validate()?;

    let config = EmailConfig::from_env();
    config.require_complete(&config.careers_recipient)?;

    if let Err(e) = EmailNotifier::send_job_application_email(&application, &config).await {
        tracing::error!("Error sending job application email: {e}");
        return Err(AppError::Delivery("Failed to submit application".to_string()));
    }

    Ok(MessageResponse::new("Application submitted successfully"))
}

fn read_error(e: MultipartError) -> AppError {
    AppError::Validation(format!("Failed to read form data: {e}"))
}
