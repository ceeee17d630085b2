//! HTTP handlers for accounts and student records.

pub mod accounts;
pub mod students;
pub use accounts::*;
pub use students::*;
