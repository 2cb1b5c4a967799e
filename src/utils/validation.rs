use validator::ValidationError;

/// Check an address against the shape `local@domain.tld`: no whitespace,
/// exactly one `@`, a non-empty local part, and a dot strictly inside the
/// domain (at least one character on each side; those characters may
/// themselves be dots). Deliberately loose; real verification happens when
/// the SMTP server accepts or rejects the reply-to address.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// `validator` adapter for [`is_valid_email`], for use in derive macros.
/// An empty value passes; presence is a separate rule so a missing email
/// reports as a missing field rather than a malformed one.
pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email_shape"))
    }
}
