// src/models/user.rs
use crate::error::AppResult;
use crate::validate::{FieldErrors, Validate};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// A row from the `users` table. Never serialized to clients as-is; the
/// password hash stays server-side.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ROLE_ADMIN)
    }
}

/// Client-facing user shape, without the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub display_name: String,
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    pub display_name: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePassword {
    pub password: String,
}

fn default_role() -> String {
    ROLE_EDITOR.to_string()
}

fn check_role(errs: &mut FieldErrors, role: &str) {
    if role != ROLE_ADMIN && role != ROLE_EDITOR {
        errs.add("role", "must be 'admin' or 'editor'");
    }
}

impl Validate for CreateUser {
    fn validate(&self) -> AppResult<()> {
        let mut errs = FieldErrors::new();
        errs.require("username", &self.username);
        errs.max_len("username", &self.username, 64);
        errs.require("display_name", &self.display_name);
        errs.max_len("display_name", &self.display_name, 128);
        if self.password.chars().count() < 8 {
            errs.add("password", "must be at least 8 characters");
        }
        check_role(&mut errs, &self.role);
        errs.finish()
    }
}

impl Validate for UpdateUser {
    fn validate(&self) -> AppResult<()> {
        let mut errs = FieldErrors::new();
        errs.require("username", &self.username);
        errs.max_len("username", &self.username, 64);
        errs.require("display_name", &self.display_name);
        errs.max_len("display_name", &self.display_name, 128);
        check_role(&mut errs, &self.role);
        errs.finish()
    }
}

impl Validate for ChangePassword {
    fn validate(&self) -> AppResult<()> {
        let mut errs = FieldErrors::new();
        if self.password.chars().count() < 8 {
            errs.add("password", "must be at least 8 characters");
        }
        errs.finish()
    }
}
