use futures::StreamExt;
use gametalk_core::Resource;
use gametalk_engine::RepoStream;

/// Print each emission of a repository stream as it arrives
///
/// `Loading` becomes a progress line and every `Success` goes through
/// `show`. A `Resource::Error` ends rendering with its message as the error.
pub async fn render<T>(mut stream: RepoStream<T>, mut show: impl FnMut(&T)) -> anyhow::Result<()> {
    while let Some(item) = stream.next().await {
        match item? {
            Resource::Loading => println!("Cargando…"),
            Resource::Success(data) => show(&data),
            Resource::Error(message) => return Err(anyhow::anyhow!(message)),
        }
    }
    Ok(())
}
