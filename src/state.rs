use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::config::Config;
use crate::planning::{load_graph_from, GraphSource};
use crate::services::mastery_store::MasteryStore;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    graph: Arc<GraphSource>,
    mastery_store: MasteryStore,
    app_version: String,
}

impl AppState {
    pub fn new(graph: GraphSource, mastery_store: MasteryStore) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            graph: Arc::new(graph),
            mastery_store,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Loads the prerequisite graph once and connects the mastery store. Neither
    /// step can fail: both degrade to built-in/in-memory defaults.
    pub async fn from_config(config: &Config) -> Self {
        let graph = load_graph_from(&config.graph_path);
        let mastery_store = MasteryStore::from_config(config).await;
        Self {
            app_version: config.app_version.clone(),
            ..Self::new(graph, mastery_store)
        }
    }

    pub fn graph(&self) -> &GraphSource {
        &self.graph
    }

    pub fn mastery_store(&self) -> &MasteryStore {
        &self.mastery_store
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}
