//! Composition root: everything a command needs, built once per run

use anyhow::Context;
use gametalk_core::config::SERVER_URL_SETTING;
use gametalk_core::logging_facility;
use gametalk_core::ClientConfig;
use gametalk_engine::{CategoryRepository, HybridTopicRepository, UserRepository};
use gametalk_remote::RemoteClient;
use gametalk_store::LocalStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct App {
    pub config: ClientConfig,
    pub store: LocalStore,
    pub client: RemoteClient,
    pub topics: HybridTopicRepository,
    pub categories: CategoryRepository,
    pub users: UserRepository,
}

impl App {
    /// Load configuration, start logging, open the store, point the client
    /// at the persisted server URL when one was saved, and wire the
    /// repositories.
    pub fn build(config_file: Option<&Path>, db: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = ClientConfig::load(config_file)?;
        logging_facility::init(config.log_profile);

        let database_path = db.unwrap_or_else(|| config.database_path.clone());
        let store = LocalStore::open(&database_path)
            .with_context(|| format!("opening {}", database_path.display()))?;

        let client = RemoteClient::new(&config)?;
        if let Some(saved) = store.get_setting(SERVER_URL_SETTING)? {
            // A bad saved value must not lock the user out; the configured
            // URL stays active.
            if let Err(err) = client.set_base_url(&saved) {
                tracing::warn!(url = %saved, error = %err, "ignoring saved server url");
            }
        }

        let api = Arc::new(client.clone());
        Ok(Self {
            topics: HybridTopicRepository::new(store.clone(), api.clone()),
            categories: CategoryRepository::new(store.clone()),
            users: UserRepository::new(store.clone(), api),
            config,
            store,
            client,
        })
    }
}
