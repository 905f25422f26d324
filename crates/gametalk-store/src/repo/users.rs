//! Users

use crate::errors::{from_rusqlite, from_user_write, Result};
use crate::live::LiveQuery;
use crate::store::{Collection, LocalStore};
use gametalk_core::errors::ForumError;
use gametalk_core::model::{NewUser, User};
use gametalk_core_types::Sensitive;
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_COLUMNS: &str = "id, email, username, password";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        password: Sensitive::new(row.get(3)?),
    })
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 LIMIT 1"),
        [email],
        user_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

pub fn find_by_id(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        [user_id],
        user_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

pub fn list(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"))
        .map_err(from_rusqlite)?;
    let users = stmt
        .query_map([], user_from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(users)
}

impl LocalStore {
    /// Register a user and return the assigned id
    ///
    /// # Errors
    ///
    /// `EmailAlreadyRegistered` (kind `AlreadyExists`) when the email is taken.
    pub fn insert_user(&self, user: &NewUser) -> Result<i64> {
        let id = self.with_conn("insert_user", |conn| {
            if find_by_email(conn, &user.email)?.is_some() {
                return Err(ForumError::EmailAlreadyRegistered {
                    email: user.email.clone(),
                }
                .into());
            }
            conn.execute(
                "INSERT INTO users (email, username, password) VALUES (?1, ?2, ?3)",
                params![user.email, user.username, user.password.expose()],
            )
            .map_err(|e| from_user_write(e, &user.email))?;
            Ok(conn.last_insert_rowid())
        })?;
        self.notify(Collection::Users);
        Ok(id)
    }

    /// Insert or overwrite a user under its own id, e.g. one created on the
    /// backend and mirrored for offline login
    ///
    /// # Errors
    ///
    /// `EmailAlreadyRegistered` when another id already holds the email.
    pub fn upsert_user(&self, user: &User) -> Result<()> {
        self.with_conn("upsert_user", |conn| {
            conn.execute(
                "INSERT INTO users (id, email, username, password) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                    email = excluded.email,
                    username = excluded.username,
                    password = excluded.password",
                params![user.id, user.email, user.username, user.password.expose()],
            )
            .map_err(|e| from_user_write(e, &user.email))?;
            Ok(())
        })?;
        self.notify(Collection::Users);
        Ok(())
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_conn("find_user_by_email", |conn| find_by_email(conn, email))
    }

    /// Plaintext credential match
    pub fn find_user_by_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.with_conn("find_user_by_credentials", |conn| {
            conn.query_row(
                &format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE email = ?1 AND password = ?2 LIMIT 1"
                ),
                [email, password],
                user_from_row,
            )
            .optional()
            .map_err(from_rusqlite)
        })
    }

    pub fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.with_conn("get_user", |conn| find_by_id(conn, user_id))
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        self.with_conn("list_users", |conn| list(conn))
    }

    pub fn observe_users(&self) -> LiveQuery<User> {
        LiveQuery::new(self, Collection::Users, "observe_users", list)
    }

    /// # Errors
    ///
    /// `UserNotFound` when no user has `user_id`.
    pub fn update_password(&self, user_id: i64, password: &str) -> Result<()> {
        self.with_conn("update_password", |conn| {
            let changed = conn
                .execute(
                    "UPDATE users SET password = ?1 WHERE id = ?2",
                    params![password, user_id],
                )
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(ForumError::UserNotFound { user_id }.into());
            }
            Ok(())
        })?;
        self.notify(Collection::Users);
        Ok(())
    }

    /// Delete a user and, through the schema trigger, every topic they
    /// authored. Returns whether the user existed.
    pub fn delete_user(&self, user_id: i64) -> Result<bool> {
        let deleted = self.with_conn("delete_user", |conn| {
            conn.execute("DELETE FROM users WHERE id = ?1", [user_id])
                .map_err(from_rusqlite)
        })?;
        if deleted > 0 {
            self.notify(Collection::Users);
            self.notify(Collection::Topics);
        }
        Ok(deleted > 0)
    }
}
