#![allow(dead_code)]

use futures::stream::{self, StreamExt};
use gametalk_core::model::{Resource, Topic, TopicDraft, User};
use gametalk_core_types::Sensitive;
use gametalk_remote::{RemoteError, ResourceStream, TopicApi, UserApi};
use gametalk_store::LocalStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const SERVER_ERROR: &str = "Error interno del servidor";

pub fn timeout_message() -> String {
    RemoteError::Timeout {
        cause: "operation timed out".to_string(),
    }
    .to_string()
}

pub fn setup_test_store() -> LocalStore {
    LocalStore::open_in_memory().expect("Failed to create in-memory store")
}

pub fn topic(id: i64, last_activity: i64) -> Topic {
    Topic {
        id,
        category_id: 1,
        user_id: 1,
        title: format!("Topic {}", id),
        description: format!("Body of topic {}", id),
        created_at: last_activity,
        replies_count: 0,
        views_count: 0,
        last_activity,
    }
}

fn scripted<T: Send + 'static>(outcome: Resource<T>) -> ResourceStream<T> {
    stream::iter(vec![Resource::Loading, outcome]).boxed()
}

/// Backend stand-in answering every topic call with a scripted outcome
pub struct FakeTopicApi {
    pub list: Mutex<Resource<Vec<Topic>>>,
    pub single: Mutex<Resource<Topic>>,
    pub delete: Mutex<Resource<()>>,
    pub calls: AtomicUsize,
}

impl FakeTopicApi {
    pub fn listing(list: Resource<Vec<Topic>>) -> Self {
        Self {
            list: Mutex::new(list),
            single: Mutex::new(Resource::error(SERVER_ERROR)),
            delete: Mutex::new(Resource::Success(())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn answering(single: Resource<Topic>) -> Self {
        let api = Self::listing(Resource::Success(Vec::new()));
        *api.single.lock().unwrap() = single;
        api
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn list_outcome(&self) -> ResourceStream<Vec<Topic>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        scripted(self.list.lock().unwrap().clone())
    }

    fn single_outcome(&self) -> ResourceStream<Topic> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        scripted(self.single.lock().unwrap().clone())
    }
}

impl TopicApi for FakeTopicApi {
    fn fetch_topics(&self) -> ResourceStream<Vec<Topic>> {
        self.list_outcome()
    }

    fn fetch_topics_by_category(&self, _category_id: i64) -> ResourceStream<Vec<Topic>> {
        self.list_outcome()
    }

    fn fetch_topics_by_user(&self, _user_id: i64) -> ResourceStream<Vec<Topic>> {
        self.list_outcome()
    }

    fn fetch_topic(&self, _topic_id: i64) -> ResourceStream<Topic> {
        self.single_outcome()
    }

    fn submit_topic(&self, _draft: &TopicDraft) -> ResourceStream<Topic> {
        self.single_outcome()
    }

    fn submit_topic_edit(&self, _topic_id: i64, _draft: &TopicDraft) -> ResourceStream<Topic> {
        self.single_outcome()
    }

    fn submit_topic_delete(&self, _topic_id: i64) -> ResourceStream<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        scripted(self.delete.lock().unwrap().clone())
    }
}

/// Backend stand-in for user calls
///
/// `submit_user` echoes its input under `next_id`, as the real backend does.
pub struct FakeUserApi {
    pub next_id: i64,
    pub fail_with: Option<String>,
    pub users: Vec<User>,
}

impl FakeUserApi {
    pub fn healthy(next_id: i64) -> Self {
        Self {
            next_id,
            fail_with: None,
            users: Vec::new(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            next_id: 0,
            fail_with: Some(message.to_string()),
            users: Vec::new(),
        }
    }

    fn outcome<T>(&self, data: T) -> Resource<T> {
        match &self.fail_with {
            Some(message) => Resource::error(message.clone()),
            None => Resource::Success(data),
        }
    }
}

impl UserApi for FakeUserApi {
    fn fetch_users(&self) -> ResourceStream<Vec<User>> {
        scripted(self.outcome(self.users.clone()))
    }

    fn fetch_user(&self, user_id: i64) -> ResourceStream<User> {
        match self.users.iter().find(|u| u.id == user_id) {
            Some(user) => scripted(self.outcome(user.clone())),
            None => scripted(Resource::error("No encontrado")),
        }
    }

    fn submit_user(
        &self,
        email: &str,
        password: &Sensitive<String>,
        username: &str,
    ) -> ResourceStream<User> {
        scripted(self.outcome(User {
            id: self.next_id,
            email: email.to_string(),
            username: username.to_string(),
            password: password.clone(),
        }))
    }

    fn submit_password_change(
        &self,
        _user_id: i64,
        _password: &Sensitive<String>,
    ) -> ResourceStream<()> {
        scripted(self.outcome(()))
    }
}

/// Backend stand-in whose topic listing answers only after `delay`
///
/// Every other call fails with `SERVER_ERROR`.
pub struct DelayedTopicApi {
    pub list: Vec<Topic>,
    pub delay: Duration,
}

impl DelayedTopicApi {
    pub fn new(list: Vec<Topic>, delay: Duration) -> Self {
        Self { list, delay }
    }
}

impl TopicApi for DelayedTopicApi {
    fn fetch_topics(&self) -> ResourceStream<Vec<Topic>> {
        let (list, delay) = (self.list.clone(), self.delay);
        stream::once(async { Resource::Loading })
            .chain(stream::once(async move {
                tokio::time::sleep(delay).await;
                Resource::Success(list)
            }))
            .boxed()
    }

    fn fetch_topics_by_category(&self, _category_id: i64) -> ResourceStream<Vec<Topic>> {
        scripted(Resource::error(SERVER_ERROR))
    }

    fn fetch_topics_by_user(&self, _user_id: i64) -> ResourceStream<Vec<Topic>> {
        scripted(Resource::error(SERVER_ERROR))
    }

    fn fetch_topic(&self, _topic_id: i64) -> ResourceStream<Topic> {
        scripted(Resource::error(SERVER_ERROR))
    }

    fn submit_topic(&self, _draft: &TopicDraft) -> ResourceStream<Topic> {
        scripted(Resource::error(SERVER_ERROR))
    }

    fn submit_topic_edit(&self, _topic_id: i64, _draft: &TopicDraft) -> ResourceStream<Topic> {
        scripted(Resource::error(SERVER_ERROR))
    }

    fn submit_topic_delete(&self, _topic_id: i64) -> ResourceStream<()> {
        scripted(Resource::error(SERVER_ERROR))
    }
}
