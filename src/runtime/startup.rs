use std::sync::Arc;

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::ai::{GeminiClient, Offline, RecitationService};
use crate::config;
use crate::favorites::{Favorites, FileStore, KeyValueStore, MemoryStore};
use crate::logging;

/// Start file logging. Failure is reported on stderr and the app runs without logs.
pub fn init_logging(settings: &config::Settings) -> Option<WorkerGuard> {
    let Some(dir) = settings.log_dir() else {
        eprintln!("tilawa: no log directory (HOME unset?); logging disabled");
        return None;
    };
    match logging::init_logging(&dir, &settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("tilawa: failed to initialize logging in {}: {e}", dir.display());
            None
        }
    }
}

/// Open the favorites list from the data directory, or keep it in memory for
/// this session when there is nowhere to persist it.
pub fn open_favorites(settings: &config::Settings) -> Favorites {
    let store: Box<dyn KeyValueStore> = match settings.data_dir() {
        Some(dir) => {
            let store = FileStore::new(dir);
            info!(dir = %store.dir().display(), "favorites store");
            Box::new(store)
        }
        None => {
            warn!("no data directory; favorites will not be persisted");
            Box::new(MemoryStore::new())
        }
    };
    Favorites::load(store, settings.storage.favorites_key.clone())
}

pub fn recitation_service(settings: &config::Settings) -> Arc<dyn RecitationService> {
    match GeminiClient::new(&settings.ai) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            warn!(error = %e, "failed to build AI client; smart features disabled");
            Arc::new(Offline)
        }
    }
}
