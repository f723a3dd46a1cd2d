use std::fs;
use std::path::Path;

use crawldash_core::Endpoint;
use crawldash_engine::AtomicFileWriter;
use crawldash_logging::{dash_error, dash_info, dash_warn};
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".crawldash_state.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    #[serde(default)]
    server_url: Option<String>,
}

/// Reads the saved endpoint string, if any. Problems are logged, not raised.
pub(crate) fn load_endpoint(state_dir: &Path) -> Option<String> {
    let path = state_dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            dash_warn!("Failed to read persisted state from {:?}: {}", path, err);
            return None;
        }
    };

    let state: PersistedState = match ron::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            dash_warn!("Failed to parse persisted state from {:?}: {}", path, err);
            return None;
        }
    };

    if let Some(url) = &state.server_url {
        dash_info!("Restored server URL {} from {:?}", url, path);
    }
    state.server_url
}

pub(crate) fn save_endpoint(state_dir: &Path, endpoint: &Endpoint) {
    let state = PersistedState {
        server_url: Some(endpoint.to_string()),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&state, pretty) {
        Ok(text) => text,
        Err(err) => {
            dash_error!("Failed to serialize persisted state: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(state_dir);
    match writer.write(STATE_FILENAME, &content) {
        Ok(path) => dash_info!("Saved server URL {} to {:?}", endpoint, path),
        Err(err) => dash_error!("Failed to write persisted state to {:?}: {}", state_dir, err),
    }
}
