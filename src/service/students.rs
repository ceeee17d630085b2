//! Student record CRUD. Inputs arrive already structurally validated.

use crate::error::AppError;
use crate::models::{Student, StudentInput};
use crate::store::Store;

pub const EMAIL_IN_USE: &str = "Email already in use.";
pub const STUDENT_NOT_FOUND: &str = "Student not found";

pub struct StudentService;

impl StudentService {
    pub async fn create(store: &dyn Store, input: &StudentInput) -> Result<Student, AppError> {
        let mut session = store.begin().await?;
        if session.find_student_by_email(&input.email).await?.is_some() {
            tracing::debug!(email = %input.email, "email already in use");
            return Err(AppError::Conflict(EMAIL_IN_USE.into()));
        }
        let student = session.insert_student(input).await?;
        session.commit().await?;
        tracing::info!(student_id = student.id, "student created");
        Ok(student)
    }

    pub async fn list(store: &dyn Store) -> Result<Vec<Student>, AppError> {
        let mut session = store.begin().await?;
        let rows = session.list_students().await?;
        session.commit().await?;
        Ok(rows)
    }

    pub async fn read(store: &dyn Store, id: i64) -> Result<Student, AppError> {
        let mut session = store.begin().await?;
        let row = session.find_student(id).await?;
        session.commit().await?;
        row.ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.into()))
    }

    /// Full replace of every field. Email uniqueness is left to the storage constraint here.
    pub async fn update(store: &dyn Store, id: i64, input: &StudentInput) -> Result<Student, AppError> {
        let mut session = store.begin().await?;
        if session.find_student(id).await?.is_none() {
            return Err(AppError::NotFound(STUDENT_NOT_FOUND.into()));
        }
        let student = session
            .update_student(id, input)
            .await?
            .ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.into()))?;
        session.commit().await?;
        tracing::info!(student_id = id, "student updated");
        Ok(student)
    }

    pub async fn delete(store: &dyn Store, id: i64) -> Result<(), AppError> {
        let mut session = store.begin().await?;
        if session.find_student(id).await?.is_none() {
            return Err(AppError::NotFound(STUDENT_NOT_FOUND.into()));
        }
        if !session.delete_student(id).await? {
            return Err(AppError::NotFound(STUDENT_NOT_FOUND.into()));
        }
        session.commit().await?;
        tracing::info!(student_id = id, "student deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input(email: &str) -> StudentInput {
        StudentInput {
            name: "Grace".into(),
            age: 22,
            address: "2 Side Rd".into(),
            email: email.into(),
            subject: "Physics".into(),
            semester: 5,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        StudentService::create(&store, &input("g@example.com")).await.unwrap();
        let err = StudentService::create(&store, &input("g@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == EMAIL_IN_USE));
        assert_eq!(store.student_count().await, 1);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(StudentService::read(&store, 7).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            StudentService::update(&store, 7, &input("g@example.com")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(StudentService::delete(&store, 7).await, Err(AppError::NotFound(_))));
        assert_eq!(store.student_count().await, 0);
    }

    #[tokio::test]
    async fn list_is_in_insertion_order() {
        let store = MemoryStore::new();
        for email in ["a@example.com", "b@example.com", "c@example.com"] {
            StudentService::create(&store, &input(email)).await.unwrap();
        }
        let emails: Vec<_> = StudentService::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.email)
            .collect();
        assert_eq!(emails, ["a@example.com", "b@example.com", "c@example.com"]);
    }
}
