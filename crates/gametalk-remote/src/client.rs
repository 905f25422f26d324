//! Reqwest-backed Remote Client
//!
//! This adapter owns transport details only: URL resolution against the
//! switchable base URL, timeouts, status mapping and JSON decoding.

use crate::dto::{PasswordChangeDto, TopicDto, TopicWriteDto, UserCreateDto, UserDto};
use crate::errors::RemoteError;
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use gametalk_core::config::normalize_base_url;
use gametalk_core::errors::{GtError, GtErrorKind};
use gametalk_core::model::{Resource, TopicDraft};
use gametalk_core::{log_op_end, log_op_error, log_op_start, ClientConfig};
use gametalk_core_types::{RequestId, Sensitive};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use url::Url;

const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// `Loading`, then exactly one terminal `Success` or `Error`
pub type ResourceStream<T> = BoxStream<'static, Resource<T>>;

/// Wrap one remote call into a [`ResourceStream`]
///
/// Nothing runs until the stream is polled past `Loading`.
pub fn resource_stream<T, F>(op: &'static str, request: F) -> ResourceStream<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, RemoteError>> + Send + 'static,
{
    let outcome = stream::once(async move {
        let start = Instant::now();
        log_op_start!(op);
        match request.await {
            Ok(data) => {
                log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
                Resource::Success(data)
            }
            Err(err) => {
                let message = err.to_string();
                log_op_error!(op, err, duration_ms = start.elapsed().as_millis() as u64);
                Resource::Error(message)
            }
        }
    });

    stream::once(future::ready(Resource::Loading))
        .chain(outcome)
        .boxed()
}

/// Handle to the backend. Clones share the HTTP connection pool and the
/// base URL, so [`RemoteClient::set_base_url`] affects every clone.
#[derive(Clone)]
pub struct RemoteClient {
    http: Client,
    base_url: Arc<RwLock<Url>>,
}

impl RemoteClient {
    /// Build a client from loaded configuration
    ///
    /// # Errors
    ///
    /// `Config` when the base URL is invalid or the HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> gametalk_core::Result<Self> {
        Self::with_timeouts(
            &config.base_url,
            config.connect_timeout(),
            config.request_timeout(),
        )
    }

    /// Build a client with an explicit connect timeout and an overall
    /// per-request timeout, which bounds both sending the body and reading
    /// the response.
    ///
    /// # Errors
    ///
    /// See [`RemoteClient::new`].
    pub fn with_timeouts(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> gametalk_core::Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| {
                GtError::new(GtErrorKind::Config)
                    .with_op("build_http_client")
                    .with_message(e.to_string())
            })?;

        Ok(Self {
            http,
            base_url: Arc::new(RwLock::new(base_url)),
        })
    }

    pub fn base_url(&self) -> String {
        self.current_base().to_string()
    }

    /// Point this client (and every clone) at another backend. Calls whose
    /// stream has not started yet use the new URL.
    ///
    /// # Errors
    ///
    /// `Config` when `raw` is not an http(s) URL; the old URL stays active.
    pub fn set_base_url(&self, raw: &str) -> gametalk_core::Result<String> {
        let url = parse_base_url(raw)?;
        let normalized = url.to_string();
        let mut guard = self
            .base_url
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = url;
        tracing::info!(base_url = %normalized, "remote base url switched");
        Ok(normalized)
    }

    // ==================== TOPIC OPERATIONS ====================

    pub fn list_topics(&self) -> ResourceStream<Vec<TopicDto>> {
        let client = self.clone();
        resource_stream("list_topics", async move {
            client.get_json("api/topics", &[]).await
        })
    }

    pub fn topics_by_category(&self, category_id: i64) -> ResourceStream<Vec<TopicDto>> {
        let client = self.clone();
        resource_stream("topics_by_category", async move {
            client
                .get_json("api/topics", &[("categoryId", category_id)])
                .await
        })
    }

    pub fn topics_by_user(&self, user_id: i64) -> ResourceStream<Vec<TopicDto>> {
        let client = self.clone();
        resource_stream("topics_by_user", async move {
            client.get_json("api/topics", &[("userId", user_id)]).await
        })
    }

    pub fn get_topic(&self, topic_id: i64) -> ResourceStream<TopicDto> {
        let client = self.clone();
        resource_stream("get_topic", async move {
            client
                .get_json(&format!("api/topics/{}", topic_id), &[])
                .await
        })
    }

    pub fn create_topic(&self, draft: &TopicDraft) -> ResourceStream<TopicDto> {
        let client = self.clone();
        let body: TopicWriteDto = draft.clone();
        resource_stream("create_topic", async move {
            let response = client
                .send(Method::POST, "api/topics", |r| r.json(&body))
                .await?;
            decode(&response)
        })
    }

    pub fn update_topic(&self, topic_id: i64, draft: &TopicDraft) -> ResourceStream<TopicDto> {
        let client = self.clone();
        let body: TopicWriteDto = draft.clone();
        resource_stream("update_topic", async move {
            let response = client
                .send(Method::PUT, &format!("api/topics/{}", topic_id), |r| {
                    r.json(&body)
                })
                .await?;
            decode(&response)
        })
    }

    pub fn delete_topic(&self, topic_id: i64) -> ResourceStream<()> {
        let client = self.clone();
        resource_stream("delete_topic", async move {
            client
                .send(Method::DELETE, &format!("api/topics/{}", topic_id), |r| r)
                .await
                .map(|_| ())
        })
    }

    // ==================== USER OPERATIONS ====================

    pub fn list_users(&self) -> ResourceStream<Vec<UserDto>> {
        let client = self.clone();
        resource_stream("list_users", async move {
            client.get_json("api/users", &[]).await
        })
    }

    pub fn get_user(&self, user_id: i64) -> ResourceStream<UserDto> {
        let client = self.clone();
        resource_stream("get_user", async move {
            client.get_json(&format!("api/users/{}", user_id), &[]).await
        })
    }

    pub fn create_user(
        &self,
        email: &str,
        password: &Sensitive<String>,
        username: &str,
    ) -> ResourceStream<UserDto> {
        let client = self.clone();
        let (email, password, username) =
            (email.to_string(), password.clone(), username.to_string());
        resource_stream("create_user", async move {
            let body = UserCreateDto {
                email: &email,
                password: password.expose(),
                username: &username,
            };
            let response = client
                .send(Method::POST, "api/users", |r| r.json(&body))
                .await?;
            decode(&response)
        })
    }

    pub fn change_password(&self, user_id: i64, password: &Sensitive<String>) -> ResourceStream<()> {
        let client = self.clone();
        let password = password.clone();
        resource_stream("change_password", async move {
            let body = PasswordChangeDto {
                password: password.expose(),
            };
            client
                .send(
                    Method::PATCH,
                    &format!("api/users/{}/password", user_id),
                    |r| r.json(&body),
                )
                .await
                .map(|_| ())
        })
    }

    // ==================== TRANSPORT ====================

    fn current_base(&self) -> Url {
        self.base_url
            .read()
            .map(|url| url.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.current_base()
            .join(path)
            .map_err(|e| RemoteError::Network {
                cause: e.to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, i64)],
    ) -> Result<T, RemoteError> {
        let body = self.send(Method::GET, path, |r| r.query(query)).await?;
        decode(&body)
    }

    /// Issue one request and return the body of a 2xx response
    async fn send<F>(&self, method: Method, path: &str, build: F) -> Result<String, RemoteError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.endpoint(path)?;
        let request_id = RequestId::new();
        tracing::debug!(
            method = %method,
            path = url.path(),
            request_id = request_id.as_str(),
            "sending request"
        );

        let response = build(self.http.request(method, url))
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .send()
            .await
            .map_err(|e| RemoteError::from_transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::from_transport(&e))?;
        tracing::debug!(
            status = status.as_u16(),
            request_id = request_id.as_str(),
            body_len = body.len() as u64,
            "received response"
        );

        if !status.is_success() {
            return Err(RemoteError::from_status(status));
        }
        Ok(body)
    }
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("base_url", &self.base_url())
            .finish()
    }
}

fn parse_base_url(raw: &str) -> gametalk_core::Result<Url> {
    let normalized = normalize_base_url(raw)?;
    Url::parse(&normalized).map_err(|e| {
        GtError::new(GtErrorKind::Config)
            .with_op("set_base_url")
            .with_message(e.to_string())
    })
}

/// A 2xx body that must carry a value: blank or `null` is `BodyEmpty`
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, RemoteError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(RemoteError::BodyEmpty);
    }
    serde_json::from_str(trimmed).map_err(|e| RemoteError::Decode {
        cause: e.to_string(),
    })
}
