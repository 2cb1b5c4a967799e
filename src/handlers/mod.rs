pub mod careers;
pub mod contact;
pub mod diagnostics;

pub use careers::submit_application;
pub use contact::submit_contact;
pub use diagnostics::{test_email_detailed, test_email_simple};
