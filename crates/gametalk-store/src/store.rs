//! The Local Store handle
//!
//! One `LocalStore` owns one SQLite connection behind a mutex. Clones share
//! the connection and the change channels; the connection closes when the
//! last clone is dropped. Every committed mutation bumps the version counter
//! of each collection it touched, which is what live queries wait on.
//!
//! Store calls are synchronous and run on the calling thread, including an
//! async executor thread. Each holds the mutex for one short statement or
//! transaction and never across an `.await`, so async callers may use the
//! store directly; callers expecting long transactions should move them to
//! `tokio::task::spawn_blocking`.

use crate::db;
use crate::errors::{lock_poisoned, Result};
use crate::migrations::apply_migrations;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// The collections a live query can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Categories,
    Topics,
}

#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<Inner>,
}

struct Inner {
    conn: Mutex<Connection>,
    users: watch::Sender<u64>,
    categories: watch::Sender<u64>,
    topics: watch::Sender<u64>,
}

impl LocalStore {
    /// Open (or create) the database file at `path` and bring its schema up
    /// to date
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = db::open(path)?;
        Self::from_connection(conn)
    }

    /// A private in-memory store, gone when the last clone drops
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;

        Ok(Self {
            inner: Arc::new(Inner {
                conn: Mutex::new(conn),
                users: watch::channel(0).0,
                categories: watch::channel(0).0,
                topics: watch::channel(0).0,
            }),
        })
    }

    /// Run `f` with exclusive use of the connection
    pub(crate) fn with_conn<T, F>(&self, op: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.inner.conn.lock().map_err(|_| lock_poisoned(op))?;
        f(&mut conn)
    }

    /// Wake every live query on `collection`
    pub(crate) fn notify(&self, collection: Collection) {
        self.sender(collection)
            .send_modify(|version| *version = version.wrapping_add(1));
    }

    pub(crate) fn subscribe(&self, collection: Collection) -> watch::Receiver<u64> {
        self.sender(collection).subscribe()
    }

    fn sender(&self, collection: Collection) -> &watch::Sender<u64> {
        match collection {
            Collection::Users => &self.inner.users,
            Collection::Categories => &self.inner.categories,
            Collection::Topics => &self.inner.topics,
        }
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_bumps_only_that_collection() {
        let store = LocalStore::open_in_memory().unwrap();
        let topics = store.subscribe(Collection::Topics);
        let users = store.subscribe(Collection::Users);

        store.notify(Collection::Topics);

        assert!(topics.has_changed().unwrap());
        assert!(!users.has_changed().unwrap());
    }

    #[test]
    fn test_clones_share_the_connection() {
        let store = LocalStore::open_in_memory().unwrap();
        let clone = store.clone();

        clone
            .with_conn("test", |conn| {
                conn.execute("INSERT INTO settings (key, value, updated_at) VALUES ('k', 'v', 0)", [])
                    .map_err(crate::errors::from_rusqlite)
            })
            .unwrap();

        let value: String = store
            .with_conn("test", |conn| {
                conn.query_row("SELECT value FROM settings WHERE key = 'k'", [], |r| r.get(0))
                    .map_err(crate::errors::from_rusqlite)
            })
            .unwrap();
        assert_eq!(value, "v");
    }
}
