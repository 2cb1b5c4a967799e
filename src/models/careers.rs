use crate::error::{AppError, AppResult};
use crate::utils::validation::is_valid_email;
use axum::body::Bytes;

/// Hard cap on résumé uploads. Exactly this many bytes is still accepted.
pub const MAX_RESUME_SIZE: usize = 5 * 1024 * 1024; // 5 MiB

/// Declared MIME types accepted for a résumé: PDF, legacy Word, OOXML Word.
pub const ALLOWED_RESUME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// An uploaded résumé, fully read into memory.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    /// Filename as declared by the client (informational only).
    pub filename: String,
    /// MIME type as declared by the client.
    pub content_type: String,
    pub data: Bytes,
}

/// Raw careers-form fields as collected from the multipart body, before
/// validation. Fields left at their defaults are reported as missing.
#[derive(Debug, Default)]
pub struct JobApplicationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub resume: Option<ResumeFile>,
}

/// A fully validated job application.
#[derive(Debug)]
pub struct JobApplication {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub resume: ResumeFile,
}

impl JobApplicationForm {
    /// Validate field presence, email shape, and the résumé's declared MIME
    /// type and size. The missing-fields error names every absent field.
    pub fn validate(self) -> AppResult<JobApplication> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.email.is_empty() {
            missing.push("email");
        }
        if self.phone.is_empty() {
            missing.push("phone");
        }
        if self.position.is_empty() {
            missing.push("position");
        }
        if self.resume.is_none() {
            missing.push("resume");
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("Invalid email format".to_string()));
        }

        let resume = self
            .resume
            .ok_or_else(|| AppError::Validation("Missing required fields: resume".to_string()))?;

        if !ALLOWED_RESUME_TYPES.contains(&resume.content_type.as_str()) {
            return Err(AppError::Validation(
                "Invalid file type. Please upload a PDF or Word document.".to_string(),
            ));
        }

        if resume.data.len() > MAX_RESUME_SIZE {
            return Err(AppError::Validation(
                "File size too large. Please upload a file smaller than 5MB.".to_string(),
            ));
        }

        Ok(JobApplication {
            name: self.name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            resume,
        })
    }
}

impl JobApplication {
    /// Attachment name: `resume_<applicant name>.pdf`, whitespace runs
    /// replaced by underscores. The `.pdf` suffix is fixed no matter what
    /// document type was uploaded (long-standing behavior the recipient's
    /// mail filters depend on).
    pub fn attachment_filename(&self) -> String {
        format!("resume_{}.pdf", collapse_whitespace(&self.name))
    }
}

/// Replace every run of whitespace with a single underscore.
fn collapse_whitespace(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> JobApplicationForm {
        JobApplicationForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            position: "Registered Nurse".to_string(),
            resume: Some(ResumeFile {
                filename: "jane-resume.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                data: Bytes::from_static(b"%PDF-1.4"),
            }),
        }
    }

    #[test]
    fn valid_application_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn missing_fields_are_all_named() {
        let form = JobApplicationForm {
            email: "jane@example.com".to_string(),
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("phone"));
        assert!(msg.contains("position"));
        assert!(msg.contains("resume"));
        assert!(!msg.contains("email,"));
    }

    #[test]
    fn malformed_email_rejected() {
        let mut form = valid_form();
        form.email = "jane at example.com".to_string();
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid email format"));
    }

    #[test]
    fn disallowed_mime_type_rejected() {
        let mut form = valid_form();
        form.resume.as_mut().unwrap().content_type = "image/png".to_string();
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid file type"));
    }

    #[test]
    fn docx_mime_type_accepted() {
        let mut form = valid_form();
        form.resume.as_mut().unwrap().content_type =
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn size_at_limit_accepted() {
        let mut form = valid_form();
        form.resume.as_mut().unwrap().data = Bytes::from(vec![0u8; MAX_RESUME_SIZE]);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn size_over_limit_rejected() {
        let mut form = valid_form();
        form.resume.as_mut().unwrap().data = Bytes::from(vec![0u8; MAX_RESUME_SIZE + 1]);
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("File size too large"));
    }

    #[test]
    fn attachment_filename_collapses_whitespace() {
        let app = valid_form().validate().unwrap();
        assert_eq!(app.attachment_filename(), "resume_Jane_Doe.pdf");
    }

    #[test]
    fn attachment_filename_collapses_runs() {
        let mut form = valid_form();
        form.name = "Jane  Mary\tDoe".to_string();
        let app = form.validate().unwrap();
        assert_eq!(app.attachment_filename(), "resume_Jane_Mary_Doe.pdf");
    }
}
