use crate::utils::validation::validate_email_shape;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// A contact-form submission. Lives for a single request; never persisted.
///
/// All fields default to empty strings at the serde level so an absent
/// field and an empty one fail validation the same way (400, not a
/// deserialization rejection).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactSubmission {
    /// Sender name
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    /// Reply-to address
    #[serde(default)]
    #[validate(length(min = 1), custom(function = validate_email_shape))]
    pub email: String,
    /// Phone number (optional)
    #[serde(default)]
    pub phone: String,
    /// Message body
    #[serde(default)]
    #[validate(length(min = 1))]
    pub message: String,
}

impl ContactSubmission {
    /// Collapse validator output into the response body literals: absent
    /// fields report as "Missing required fields" and take precedence over
    /// a malformed address, which reports as "Invalid email format".
    pub fn error_message(errors: &ValidationErrors) -> String {
        let missing = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .any(|e| e.code == "length");
        if missing {
            "Missing required fields".to_string()
        } else {
            "Invalid email format".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactSubmission {
        ContactSubmission {
            name: "Jo".to_string(),
            email: "jo@x.com".to_string(),
            phone: String::new(),
            message: "hi".to_string(),
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn empty_name_fails() {
        let mut s = valid();
        s.name.clear();
        assert!(s.validate().is_err());
    }

    #[test]
    fn empty_message_fails() {
        let mut s = valid();
        s.message.clear();
        assert!(s.validate().is_err());
    }

    #[test]
    fn malformed_email_fails() {
        let mut s = valid();
        s.email = "jo.x.com".to_string();
        let errors = s.validate().unwrap_err();
        assert_eq!(
            ContactSubmission::error_message(&errors),
            "Invalid email format"
        );
    }

    #[test]
    fn empty_fields_report_as_missing() {
        let mut s = valid();
        s.name.clear();
        s.email.clear();
        let errors = s.validate().unwrap_err();
        assert_eq!(
            ContactSubmission::error_message(&errors),
            "Missing required fields"
        );
    }

    // An absent field outranks a malformed email, matching the order the
    // checks have always run in.
    #[test]
    fn missing_field_takes_precedence_over_bad_email() {
        let mut s = valid();
        s.message.clear();
        s.email = "jo.x.com".to_string();
        let errors = s.validate().unwrap_err();
        assert_eq!(
            ContactSubmission::error_message(&errors),
            "Missing required fields"
        );
    }

    #[test]
    fn empty_phone_is_allowed() {
        let s = valid();
        assert!(s.phone.is_empty());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_to_empty() {
        let s: ContactSubmission = serde_json::from_str(r#"{"email":"jo@x.com"}"#).unwrap();
        assert!(s.name.is_empty());
        assert!(s.validate().is_err());
    }
}
