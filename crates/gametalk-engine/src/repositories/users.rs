//! User repository
//!
//! Registration and login work against the Local Store so they function
//! offline. The remote operations mirror what the backend accepted into the
//! store, which is what lets a user created remotely log in later.

use super::{loading_then, settle, RepoStream};
use gametalk_core::model::{NewUser, Resource, User};
use gametalk_core::{ForumError, GtErrorKind, Result};
use gametalk_core_types::Sensitive;
use gametalk_remote::UserApi;
use gametalk_store::LocalStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserRepository {
    store: LocalStore,
    api: Arc<dyn UserApi>,
}

impl UserRepository {
    pub fn new(store: LocalStore, api: Arc<dyn UserApi>) -> Self {
        Self { store, api }
    }

    /// Register locally and return the stored user
    ///
    /// # Errors
    ///
    /// `EmailAlreadyRegistered` when the email is taken.
    pub fn register(&self, email: &str, password: &str, username: &str) -> Result<User> {
        let id = self
            .store
            .insert_user(&NewUser::new(email, username, password))?;
        self.store
            .get_user(id)?
            .ok_or_else(|| ForumError::UserNotFound { user_id: id }.into())
    }

    /// # Errors
    ///
    /// `InvalidCredentials` when no stored user has this email and password.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        self.store
            .find_user_by_credentials(email, password)?
            .ok_or_else(|| ForumError::InvalidCredentials.into())
    }

    /// # Errors
    ///
    /// `UserNotFound` when `user_id` is not stored.
    pub fn change_password(&self, user_id: i64, new_password: &str) -> Result<()> {
        self.store.update_password(user_id, new_password)
    }

    pub fn list_users(&self) -> RepoStream<Vec<User>> {
        let remote = self.api.fetch_users();
        loading_then(async move { Ok(settle(remote).await) })
    }

    pub fn get_user(&self, user_id: i64) -> RepoStream<User> {
        let remote = self.api.fetch_user(user_id);
        loading_then(async move { Ok(settle(remote).await) })
    }

    /// Create the user on the backend, then mirror it locally with the
    /// password it was created with
    ///
    /// The backend's answer is what the caller gets. Mirroring is
    /// best-effort: a failure is logged and does not hide the created user.
    pub fn create_user(&self, email: &str, password: &str, username: &str) -> RepoStream<User> {
        let store = self.store.clone();
        let password = Sensitive::new(password.to_string());
        let remote = self.api.submit_user(email, &password, username);
        loading_then(async move {
            let outcome = settle(remote).await;
            if let Resource::Success(user) = &outcome {
                if let Err(err) = mirror_user(&store, user) {
                    tracing::warn!(
                        op = "create_user",
                        user_id = user.id,
                        err.kind = ?err.kind(),
                        error = err.message(),
                        "created on the server but not stored locally"
                    );
                }
            }
            Ok(outcome)
        })
    }

    /// Change the password on the backend; the stored row follows only when
    /// the backend accepted the change and the user is stored at all
    pub fn change_password_remote(&self, user_id: i64, new_password: &str) -> RepoStream<()> {
        let store = self.store.clone();
        let password = Sensitive::new(new_password.to_string());
        let remote = self.api.submit_password_change(user_id, &password);
        loading_then(async move {
            let outcome = settle(remote).await;
            if outcome.is_success() && store.get_user(user_id)?.is_some() {
                store.update_password(user_id, password.expose())?;
            }
            Ok(outcome)
        })
    }
}

/// Store a user the backend created
///
/// An account registered locally under the same email keeps its local id
/// and takes the new password, so offline login matches the server.
fn mirror_user(store: &LocalStore, user: &User) -> Result<()> {
    match store.upsert_user(user) {
        Err(err) if err.kind() == GtErrorKind::AlreadyExists => {
            match store.find_user_by_email(&user.email)? {
                Some(local) => store.update_password(local.id, user.password.expose()),
                None => Err(err),
            }
        }
        other => other,
    }
}
