//! The seams the repositories depend on
//!
//! Both traits speak domain types so a repository never sees a DTO.
//! `RemoteClient` implements them; tests substitute scripted fakes.

use crate::client::{RemoteClient, ResourceStream};
use futures::StreamExt;
use gametalk_core::model::{Topic, TopicDraft, User};
use gametalk_core_types::Sensitive;

pub trait TopicApi: Send + Sync {
    fn fetch_topics(&self) -> ResourceStream<Vec<Topic>>;

    fn fetch_topics_by_category(&self, category_id: i64) -> ResourceStream<Vec<Topic>>;

    fn fetch_topics_by_user(&self, user_id: i64) -> ResourceStream<Vec<Topic>>;

    fn fetch_topic(&self, topic_id: i64) -> ResourceStream<Topic>;

    fn submit_topic(&self, draft: &TopicDraft) -> ResourceStream<Topic>;

    fn submit_topic_edit(&self, topic_id: i64, draft: &TopicDraft) -> ResourceStream<Topic>;

    fn submit_topic_delete(&self, topic_id: i64) -> ResourceStream<()>;
}

pub trait UserApi: Send + Sync {
    /// Users as the backend lists them. The password of each is empty.
    fn fetch_users(&self) -> ResourceStream<Vec<User>>;

    fn fetch_user(&self, user_id: i64) -> ResourceStream<User>;

    /// The created user carries the password it was created with
    fn submit_user(
        &self,
        email: &str,
        password: &Sensitive<String>,
        username: &str,
    ) -> ResourceStream<User>;

    fn submit_password_change(
        &self,
        user_id: i64,
        password: &Sensitive<String>,
    ) -> ResourceStream<()>;
}

fn into_topics(stream: ResourceStream<Vec<crate::dto::TopicDto>>) -> ResourceStream<Vec<Topic>> {
    stream
        .map(|resource| resource.map(|dtos| dtos.into_iter().map(|d| d.into_topic()).collect()))
        .boxed()
}

fn blank_password() -> Sensitive<String> {
    Sensitive::new(String::new())
}

impl TopicApi for RemoteClient {
    fn fetch_topics(&self) -> ResourceStream<Vec<Topic>> {
        into_topics(self.list_topics())
    }

    fn fetch_topics_by_category(&self, category_id: i64) -> ResourceStream<Vec<Topic>> {
        into_topics(self.topics_by_category(category_id))
    }

    fn fetch_topics_by_user(&self, user_id: i64) -> ResourceStream<Vec<Topic>> {
        into_topics(self.topics_by_user(user_id))
    }

    fn fetch_topic(&self, topic_id: i64) -> ResourceStream<Topic> {
        self.get_topic(topic_id)
            .map(|resource| resource.map(|dto| dto.into_topic()))
            .boxed()
    }

    fn submit_topic(&self, draft: &TopicDraft) -> ResourceStream<Topic> {
        self.create_topic(draft)
            .map(|resource| resource.map(|dto| dto.into_topic()))
            .boxed()
    }

    fn submit_topic_edit(&self, topic_id: i64, draft: &TopicDraft) -> ResourceStream<Topic> {
        self.update_topic(topic_id, draft)
            .map(|resource| resource.map(|dto| dto.into_topic()))
            .boxed()
    }

    fn submit_topic_delete(&self, topic_id: i64) -> ResourceStream<()> {
        self.delete_topic(topic_id)
    }
}

impl UserApi for RemoteClient {
    fn fetch_users(&self) -> ResourceStream<Vec<User>> {
        self.list_users()
            .map(|resource| {
                resource.map(|dtos| {
                    dtos.into_iter()
                        .map(|d| d.into_user(blank_password()))
                        .collect()
                })
            })
            .boxed()
    }

    fn fetch_user(&self, user_id: i64) -> ResourceStream<User> {
        self.get_user(user_id)
            .map(|resource| resource.map(|dto| dto.into_user(blank_password())))
            .boxed()
    }

    fn submit_user(
        &self,
        email: &str,
        password: &Sensitive<String>,
        username: &str,
    ) -> ResourceStream<User> {
        let password_for_row = password.clone();
        self.create_user(email, password, username)
            .map(move |resource| resource.map(|dto| dto.into_user(password_for_row.clone())))
            .boxed()
    }

    fn submit_password_change(
        &self,
        user_id: i64,
        password: &Sensitive<String>,
    ) -> ResourceStream<()> {
        self.change_password(user_id, password)
    }
}
