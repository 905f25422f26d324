//! Repository orchestration
//!
//! Repository streams carry `Result<Resource<T>>`: remote failures are
//! already folded into `Resource::Error`, while a Local Store failure comes
//! through as `Err` and ends the stream.

mod categories;
mod topics;
mod users;

pub use categories::CategoryRepository;
pub use topics::HybridTopicRepository;
pub use users::UserRepository;

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use gametalk_core::model::Resource;
use gametalk_core::Result;
use gametalk_remote::{RemoteError, ResourceStream};
use std::future::Future;

pub type RepoStream<T> = BoxStream<'static, Result<Resource<T>>>;

/// `Loading`, then whatever `outcome` resolves to
pub(crate) fn loading_then<T, F>(outcome: F) -> RepoStream<T>
where
    T: Send + 'static,
    F: Future<Output = Result<Resource<T>>> + Send + 'static,
{
    stream::once(future::ready(Ok(Resource::Loading)))
        .chain(stream::once(outcome))
        .boxed()
}

/// Drive a remote stream to its terminal emission
///
/// A stream that ends without one is reported as an empty response.
pub(crate) async fn settle<T>(remote: ResourceStream<T>) -> Resource<T> {
    remote
        .filter(|resource| future::ready(resource.is_terminal()))
        .next()
        .await
        .unwrap_or_else(|| Resource::Error(RemoteError::BodyEmpty.to_string()))
}
