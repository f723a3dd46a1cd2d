use std::sync::{Arc, RwLock};

/// Endpoint cell shared by the submission and polling flows.
///
/// Each request reads the value once when it is issued, so an update only
/// affects requests started afterwards.
#[derive(Debug, Clone, Default)]
pub struct SharedEndpoint(Arc<RwLock<String>>);

impl SharedEndpoint {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(endpoint.into())))
    }

    pub fn get(&self) -> String {
        match self.0.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        match self.0.write() {
            Ok(mut guard) => *guard = endpoint,
            Err(poisoned) => *poisoned.into_inner() = endpoint,
        }
    }
}
