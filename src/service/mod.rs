//! Account and student operations over a `Store`, plus request validation.

mod accounts;
mod students;
pub mod validation;
pub use accounts::{AccountService, INVALID_CREDENTIALS, USERNAME_TAKEN};
pub use students::{StudentService, EMAIL_IN_USE, STUDENT_NOT_FOUND};
pub use validation::{normalize_email, validate_password, PasswordRule, Validate};
