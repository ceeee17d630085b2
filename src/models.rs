//! Account and student record shapes, persisted and on the wire.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Persisted account row. The password is stored as supplied.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// Public view of an account, returned by registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountOut {
    pub id: i64,
    pub username: String,
}

impl From<Account> for AccountOut {
    fn from(a: Account) -> Self {
        AccountOut {
            id: a.id,
            username: a.username,
        }
    }
}

/// Body of `/register` and `/login`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub email: String,
    pub subject: String,
    pub semester: i32,
}

/// All student fields except the id. Used for both create and full replace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentInput {
    pub name: String,
    /// 18 to 30 inclusive.
    pub age: i32,
    pub address: String,
    pub email: String,
    pub subject: String,
    /// 1 to 8 inclusive.
    pub semester: i32,
}

impl StudentInput {
    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            age: self.age,
            address: self.address,
            email: self.email,
            subject: self.subject,
            semester: self.semester,
        }
    }
}
