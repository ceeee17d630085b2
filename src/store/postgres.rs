//! PostgreSQL store over a sqlx pool. Each session is a pool transaction.

use super::{Session, Store};
use crate::error::AppError;
use crate::models::{Account, Student, StudentInput};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, Postgres};
use sqlx::{ConnectOptions, PgPool, Transaction};
use std::str::FromStr;

const STUDENT_COLUMNS: &str = "id, name, age, address, email, subject, semester";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    /// Connect a pool to `database_url` with at most `max_connections` connections.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(PgStore { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> Result<Box<dyn Session>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSession { tx }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

struct PgSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl Session for PgSession {
    async fn find_account_by_username(&mut self, username: &str) -> Result<Option<Account>, AppError> {
        let sql = "SELECT id, username, password FROM accounts WHERE username = $1";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Account>(sql)
            .bind(username)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_account(&mut self, username: &str, password: &str) -> Result<Account, AppError> {
        let sql = "INSERT INTO accounts (username, password) VALUES ($1, $2) RETURNING id, username, password";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Account>(sql)
            .bind(username)
            .bind(password)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn list_students(&mut self) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT {} FROM students ORDER BY id", STUDENT_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(&sql)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn find_student(&mut self, id: i64) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM students WHERE id = $1", STUDENT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn find_student_by_email(&mut self, email: &str) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM students WHERE email = $1", STUDENT_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(email)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_student(&mut self, input: &StudentInput) -> Result<Student, AppError> {
        let sql = format!(
            "INSERT INTO students (name, age, address, email, subject, semester) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.address)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(input.semester)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_student(&mut self, id: i64, input: &StudentInput) -> Result<Option<Student>, AppError> {
        let sql = format!(
            "UPDATE students SET name = $1, age = $2, address = $3, email = $4, subject = $5, semester = $6 \
             WHERE id = $7 RETURNING {}",
            STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.address)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(input.semester)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn delete_student(&mut self, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM students WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&mut *self.tx).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}

/// Create `accounts` and `students` if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    let accounts_ddl = r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id BIGSERIAL PRIMARY KEY,
            username VARCHAR(50) NOT NULL UNIQUE,
            password VARCHAR(255) NOT NULL
        )
    "#;
    sqlx::query(accounts_ddl).execute(pool).await?;

    let students_ddl = r#"
        CREATE TABLE IF NOT EXISTS students (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(50) NOT NULL,
            age INTEGER NOT NULL,
            address VARCHAR(255) NOT NULL,
            email VARCHAR(100) NOT NULL UNIQUE,
            subject VARCHAR(100) NOT NULL,
            semester INTEGER NOT NULL
        )
    "#;
    sqlx::query(students_ddl).execute(pool).await?;
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/student_management?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "student_management");
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("students"), "\"students\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
