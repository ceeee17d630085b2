//! In-process store with the same transactional contract as PostgreSQL.
//!
//! A session holds the table lock for its lifetime and works on a copy;
//! commit writes the copy back, drop discards it. Unique columns are checked
//! on write the way the database constraints would be.

use super::{Session, Store};
use crate::error::AppError;
use crate::models::{Account, Student, StudentInput};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Debug, Default)]
struct Tables {
    accounts: BTreeMap<i64, Account>,
    students: BTreeMap<i64, Student>,
    last_account_id: i64,
    last_student_id: i64,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed student rows.
    pub async fn student_count(&self) -> usize {
        self.tables.lock().await.students.len()
    }

    /// Number of committed account rows.
    pub async fn account_count(&self) -> usize {
        self.tables.lock().await.accounts.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn Session>, AppError> {
        let guard = self.tables.clone().lock_owned().await;
        let work = guard.clone();
        Ok(Box::new(MemorySession { guard, work }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

struct MemorySession {
    guard: OwnedMutexGuard<Tables>,
    work: Tables,
}

fn unique_violation(constraint: &str) -> AppError {
    AppError::Storage(format!(
        "duplicate key value violates unique constraint \"{}\"",
        constraint
    ))
}

impl MemorySession {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.work
            .students
            .values()
            .any(|s| s.email == email && Some(s.id) != except)
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn find_account_by_username(&mut self, username: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .work
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn insert_account(&mut self, username: &str, password: &str) -> Result<Account, AppError> {
        if self.work.accounts.values().any(|a| a.username == username) {
            return Err(unique_violation("accounts_username_key"));
        }
        self.work.last_account_id += 1;
        let account = Account {
            id: self.work.last_account_id,
            username: username.to_string(),
            password: password.to_string(),
        };
        self.work.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn list_students(&mut self) -> Result<Vec<Student>, AppError> {
        Ok(self.work.students.values().cloned().collect())
    }

    async fn find_student(&mut self, id: i64) -> Result<Option<Student>, AppError> {
        Ok(self.work.students.get(&id).cloned())
    }

    async fn find_student_by_email(&mut self, email: &str) -> Result<Option<Student>, AppError> {
        Ok(self
            .work
            .students
            .values()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn insert_student(&mut self, input: &StudentInput) -> Result<Student, AppError> {
        if self.email_taken(&input.email, None) {
            return Err(unique_violation("students_email_key"));
        }
        self.work.last_student_id += 1;
        let student = input.clone().into_student(self.work.last_student_id);
        self.work.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update_student(&mut self, id: i64, input: &StudentInput) -> Result<Option<Student>, AppError> {
        if !self.work.students.contains_key(&id) {
            return Ok(None);
        }
        if self.email_taken(&input.email, Some(id)) {
            return Err(unique_violation("students_email_key"));
        }
        let student = input.clone().into_student(id);
        self.work.students.insert(id, student.clone());
        Ok(Some(student))
    }

    async fn delete_student(&mut self, id: i64) -> Result<bool, AppError> {
        Ok(self.work.students.remove(&id).is_some())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemorySession { mut guard, work } = *self;
        *guard = work;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(email: &str) -> StudentInput {
        StudentInput {
            name: "Ada".into(),
            age: 21,
            address: "1 Main St".into(),
            email: email.into(),
            subject: "Maths".into(),
            semester: 3,
        }
    }

    #[tokio::test]
    async fn dropped_session_rolls_back() {
        let store = MemoryStore::new();
        {
            let mut session = store.begin().await.unwrap();
            session.insert_student(&input("a@example.com")).await.unwrap();
        }
        assert_eq!(store.student_count().await, 0);

        let mut session = store.begin().await.unwrap();
        let created = session.insert_student(&input("a@example.com")).await.unwrap();
        session.commit().await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(store.student_count().await, 1);
    }

    #[tokio::test]
    async fn enforces_unique_columns() {
        let store = MemoryStore::new();
        let mut session = store.begin().await.unwrap();
        session.insert_account("alice", "Abcdef1!").await.unwrap();
        assert!(matches!(
            session.insert_account("alice", "Other1!x").await,
            Err(AppError::Storage(_))
        ));

        let first = session.insert_student(&input("a@example.com")).await.unwrap();
        let second = session.insert_student(&input("b@example.com")).await.unwrap();
        assert!(matches!(
            session.update_student(second.id, &input("a@example.com")).await,
            Err(AppError::Storage(_))
        ));
        // Keeping its own email is not a conflict.
        assert!(session
            .update_student(first.id, &input("a@example.com"))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let mut session = store.begin().await.unwrap();
        let first = session.insert_student(&input("a@example.com")).await.unwrap();
        assert!(session.delete_student(first.id).await.unwrap());
        assert!(!session.delete_student(first.id).await.unwrap());
        let second = session.insert_student(&input("a@example.com")).await.unwrap();
        assert_eq!(second.id, first.id + 1);
        session.commit().await.unwrap();
    }
}
