//! Application state.

use std::sync::Arc;
use std::time::Duration;

use gacha_engine::{RollConfig, RollEngine, StatsAggregator};
use gacha_store::Store;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// The roll engine.
    pub engine: RollEngine,

    /// The stats aggregator.
    pub stats: StatsAggregator,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        let op_timeout = Duration::from_secs(config.request_timeout_seconds);

        let roll_config = RollConfig {
            duplicate_reward: config.duplicate_reward,
            reward_payor: config.reward_payor.clone(),
            op_timeout,
        };
        tracing::info!(
            duplicate_reward = roll_config.duplicate_reward,
            reward_payor = %roll_config.reward_payor,
            "Roll engine configured"
        );

        let engine = RollEngine::new(Arc::clone(&store), roll_config);
        let stats = StatsAggregator::with_timeout(Arc::clone(&store), op_timeout);

        Self {
            store,
            engine,
            stats,
            config,
        }
    }
}
