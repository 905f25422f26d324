//! Hybrid topic repository
//!
//! Reads are cache-then-network: the cached list is served first, the
//! backend is asked regardless, and a successful answer replaces the cache
//! wholesale. When the backend fails, any cached data wins over the error.
//! Writes go to the backend first and are mirrored into the cache only once
//! it accepted them.

use super::{loading_then, settle, RepoStream};
use futures::stream::{self, StreamExt};
use gametalk_core::model::{now_millis, Resource, Topic, TopicDraft};
use gametalk_core::validation::{validate_draft, validate_edit};
use gametalk_core::{log_op_end, log_op_error, log_op_start, Result};
use gametalk_core_types::schema::{EVENT_CACHE_FALLBACK, EVENT_CACHE_HIT, EVENT_CACHE_REPLACED};
use gametalk_remote::TopicApi;
use gametalk_store::{LiveQuery, LocalStore};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct HybridTopicRepository {
    store: LocalStore,
    api: Arc<dyn TopicApi>,
}

/// Where `stream_topics` is in its protocol
enum Step {
    Start,
    Cache,
    Remote,
    Done,
}

struct StreamState {
    step: Step,
    force_refresh: bool,
    store: LocalStore,
    api: Arc<dyn TopicApi>,
    started: Instant,
}

impl HybridTopicRepository {
    pub fn new(store: LocalStore, api: Arc<dyn TopicApi>) -> Self {
        Self { store, api }
    }

    /// All topics, cache first, then the backend
    ///
    /// Emits `Loading`; then the cached list when `force_refresh` is false
    /// and the cache is non-empty; then one final item. On remote success
    /// the cache is replaced atomically and the rows as stored are emitted
    /// (cache order, repeated ids collapsed). On remote failure the cache is re-read and emitted if non-empty,
    /// otherwise the remote error message is. At most three items.
    ///
    /// A Local Store failure is emitted as `Err` and ends the stream.
    pub fn stream_topics(&self, force_refresh: bool) -> RepoStream<Vec<Topic>> {
        let state = StreamState {
            step: Step::Start,
            force_refresh,
            store: self.store.clone(),
            api: Arc::clone(&self.api),
            started: Instant::now(),
        };

        stream::unfold(state, |mut state| async move {
            loop {
                match state.step {
                    Step::Start => {
                        log_op_start!("stream_topics", force_refresh = state.force_refresh);
                        state.step = Step::Cache;
                        return Some((Ok(Resource::Loading), state));
                    }
                    Step::Cache => {
                        state.step = Step::Remote;
                        if state.force_refresh {
                            continue;
                        }
                        match state.store.list_topics() {
                            Ok(cached) if cached.is_empty() => continue,
                            Ok(cached) => {
                                tracing::debug!(
                                    op = "stream_topics",
                                    event = EVENT_CACHE_HIT,
                                    item_count = cached.len() as u64,
                                );
                                return Some((Ok(Resource::Success(cached)), state));
                            }
                            Err(err) => {
                                state.step = Step::Done;
                                return Some((Err(state.fail(err)), state));
                            }
                        }
                    }
                    Step::Remote => {
                        state.step = Step::Done;
                        let outcome = settle(state.api.fetch_topics()).await;
                        let item = match outcome {
                            Resource::Success(remote) => state.replace_cache(remote),
                            Resource::Error(message) => state.fall_back(message),
                            Resource::Loading => continue,
                        };
                        return Some((item, state));
                    }
                    Step::Done => return None,
                }
            }
        })
        .boxed()
    }

    /// One topic, backend first
    ///
    /// A fetched topic is upserted into the cache. If the backend fails the
    /// cached row is served when present, otherwise the error.
    pub fn get_topic_by_id(&self, topic_id: i64) -> RepoStream<Topic> {
        let store = self.store.clone();
        let remote = self.api.fetch_topic(topic_id);
        loading_then(async move {
            match settle(remote).await {
                Resource::Success(topic) => {
                    store.insert_topic(&topic)?;
                    Ok(Resource::Success(topic))
                }
                Resource::Error(message) => match store.get_topic(topic_id)? {
                    Some(cached) => {
                        tracing::debug!(
                            op = "get_topic_by_id",
                            event = EVENT_CACHE_FALLBACK,
                            topic_id,
                        );
                        Ok(Resource::Success(cached))
                    }
                    None => Ok(Resource::Error(message)),
                },
                Resource::Loading => Ok(Resource::Loading),
            }
        })
    }

    /// Create a topic on the backend and cache the row it returns
    ///
    /// A blank title or description is reported as `Resource::Error`
    /// without contacting the backend.
    pub fn create_topic(&self, draft: &TopicDraft) -> RepoStream<Topic> {
        if let Err(invalid) = validate_draft(draft) {
            return rejected(invalid.to_string());
        }
        let store = self.store.clone();
        let remote = self.api.submit_topic(draft);
        loading_then(async move { cache_written(&store, settle(remote).await) })
    }

    /// Edit a topic's title and description on the backend and cache the
    /// row it returns
    pub fn update_topic(&self, topic_id: i64, draft: &TopicDraft) -> RepoStream<Topic> {
        if let Err(invalid) = validate_edit(&draft.title, &draft.description) {
            return rejected(invalid.to_string());
        }
        let store = self.store.clone();
        let remote = self.api.submit_topic_edit(topic_id, draft);
        loading_then(async move { cache_written(&store, settle(remote).await) })
    }

    /// Delete on the backend, then drop the cached row
    pub fn delete_topic(&self, topic_id: i64) -> RepoStream<()> {
        let store = self.store.clone();
        let remote = self.api.submit_topic_delete(topic_id);
        loading_then(async move {
            let outcome = settle(remote).await;
            if outcome.is_success() {
                store.delete_topic(topic_id)?;
            }
            Ok(outcome)
        })
    }

    /// Local live view of one category, for browsing offline
    pub fn observe_topics_by_category(&self, category_id: i64) -> LiveQuery<Topic> {
        self.store.observe_topics_by_category(category_id)
    }

    pub fn observe_topics(&self) -> LiveQuery<Topic> {
        self.store.observe_topics()
    }

    /// Count a view locally (see [`LocalStore::record_topic_view`])
    ///
    /// # Errors
    ///
    /// `TopicNotFound` when the topic is not cached.
    pub fn record_view(&self, topic_id: i64) -> Result<Topic> {
        self.store.record_topic_view(topic_id, now_millis())
    }
}

impl StreamState {
    fn replace_cache(&self, remote: Vec<Topic>) -> Result<Resource<Vec<Topic>>> {
        match self.store.replace_topics(&remote) {
            Ok(stored) => {
                tracing::debug!(
                    op = "stream_topics",
                    event = EVENT_CACHE_REPLACED,
                    received = remote.len() as u64,
                    item_count = stored.len() as u64,
                );
                self.succeed(stored.len());
                Ok(Resource::Success(stored))
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fall_back(&self, message: String) -> Result<Resource<Vec<Topic>>> {
        match self.store.list_topics() {
            Ok(cached) if cached.is_empty() => {
                tracing::debug!(op = "stream_topics", error = %message, "remote failed, cache empty");
                self.succeed(0);
                Ok(Resource::Error(message))
            }
            Ok(cached) => {
                tracing::debug!(
                    op = "stream_topics",
                    event = EVENT_CACHE_FALLBACK,
                    item_count = cached.len() as u64,
                    error = %message,
                );
                self.succeed(cached.len());
                Ok(Resource::Success(cached))
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn succeed(&self, item_count: usize) {
        log_op_end!(
            "stream_topics",
            duration_ms = self.started.elapsed().as_millis() as u64,
            item_count = item_count as u64
        );
    }

    fn fail(&self, err: gametalk_core::GtError) -> gametalk_core::GtError {
        log_op_error!(
            "stream_topics",
            err.clone(),
            duration_ms = self.started.elapsed().as_millis() as u64
        );
        err
    }
}

/// Cache the row a successful create/update returned
fn cache_written(store: &LocalStore, outcome: Resource<Topic>) -> Result<Resource<Topic>> {
    if let Resource::Success(topic) = &outcome {
        store.insert_topic(topic)?;
    }
    Ok(outcome)
}

fn rejected<T: Send + 'static>(message: String) -> RepoStream<T> {
    stream::iter(vec![Ok(Resource::Loading), Ok(Resource::Error(message))]).boxed()
}
