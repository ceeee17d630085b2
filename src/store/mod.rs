//! Persistence access: a `Store` hands out one transactional `Session` per request.
//!
//! Dropping a session without calling [`Session::commit`] rolls it back.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_tables, PgStore};

use crate::error::AppError;
use crate::models::{Account, Student, StudentInput};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Open a new session (transaction).
    async fn begin(&self) -> Result<Box<dyn Session>, AppError>;

    /// Cheap liveness check used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait Session: Send {
    async fn find_account_by_username(&mut self, username: &str) -> Result<Option<Account>, AppError>;

    async fn insert_account(&mut self, username: &str, password: &str) -> Result<Account, AppError>;

    /// All students in ascending id order.
    async fn list_students(&mut self) -> Result<Vec<Student>, AppError>;

    async fn find_student(&mut self, id: i64) -> Result<Option<Student>, AppError>;

    async fn find_student_by_email(&mut self, email: &str) -> Result<Option<Student>, AppError>;

    async fn insert_student(&mut self, input: &StudentInput) -> Result<Student, AppError>;

    /// Replace every field of student `id`. Returns None when no such row exists.
    async fn update_student(&mut self, id: i64, input: &StudentInput) -> Result<Option<Student>, AppError>;

    /// Returns false when no such row exists.
    async fn delete_student(&mut self, id: i64) -> Result<bool, AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}
