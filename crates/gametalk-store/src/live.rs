//! Live queries
//!
//! A `LiveQuery` observes one collection. Its first `next()` yields the
//! current ordered result; each later `next()` waits until a mutation of
//! that collection commits and yields the fresh full result. Mutations that
//! land between two `next()` calls coalesce into a single emission of the
//! latest state.

use crate::errors::Result;
use crate::store::{Collection, LocalStore};
use futures::stream::{self, Stream};
use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::watch;

type QueryFn<T> = Arc<dyn Fn(&Connection) -> Result<Vec<T>> + Send + Sync>;

pub struct LiveQuery<T> {
    store: LocalStore,
    changes: watch::Receiver<u64>,
    query: QueryFn<T>,
    op: &'static str,
    primed: bool,
}

impl<T> LiveQuery<T> {
    pub(crate) fn new<F>(store: &LocalStore, collection: Collection, op: &'static str, query: F) -> Self
    where
        F: Fn(&Connection) -> Result<Vec<T>> + Send + Sync + 'static,
    {
        Self {
            changes: store.subscribe(collection),
            store: store.clone(),
            query: Arc::new(query),
            op,
            primed: false,
        }
    }

    /// The next snapshot of the observed collection
    ///
    /// Never completes with "no more items": the query lives as long as the
    /// handle it was created from, so this waits indefinitely when nothing
    /// changes.
    pub async fn next(&mut self) -> Result<Vec<T>> {
        if self.primed {
            // The store inside `self` keeps the sender alive, so this only
            // returns once a new version was published.
            let _ = self.changes.changed().await;
        }
        self.primed = true;
        let _ = self.changes.borrow_and_update();

        self.current()
    }

    /// Current snapshot without waiting and without consuming a pending
    /// change notification
    pub fn current(&self) -> Result<Vec<T>> {
        self.store.with_conn(self.op, |conn| (self.query)(&*conn))
    }
}

impl<T: Send + 'static> LiveQuery<T> {
    /// Adapt into an infinite `Stream` of snapshots
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<T>>> + Send {
        stream::unfold(self, |mut query| async move {
            let snapshot = query.next().await;
            Some((snapshot, query))
        })
    }
}
