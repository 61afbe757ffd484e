use std::sync::Arc;
use webpress_core::Config;
use webpress_processing::BatchConverter;
use webpress_storage::Storage;

/// Shared application state, built once at startup.
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub converter: BatchConverter,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let converter = BatchConverter::new(storage.clone());
        Self {
            config,
            storage,
            converter,
        }
    }
}
