pub mod careers;
pub mod contact;

pub use careers::{JobApplication, JobApplicationForm, ResumeFile};
pub use contact::ContactSubmission;
