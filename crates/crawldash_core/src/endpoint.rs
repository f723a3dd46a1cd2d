use std::fmt;

use thiserror::Error;

/// Endpoint used when nothing has been persisted yet.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("endpoint must not be empty")]
pub struct InvalidEndpoint;

/// Base URL of the crawl service: never empty, no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(String);

impl Endpoint {
    /// Trims the candidate and strips exactly one trailing `/`.
    pub fn parse(candidate: &str) -> Result<Self, InvalidEndpoint> {
        let trimmed = candidate.trim();
        let stripped = trimmed.strip_suffix('/').unwrap_or(trimmed);
        if stripped.is_empty() {
            return Err(InvalidEndpoint);
        }
        Ok(Self(stripped.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self(DEFAULT_ENDPOINT.to_string())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single owner of the configured endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EndpointStore {
    current: Endpoint,
}

impl EndpointStore {
    pub fn new(current: Endpoint) -> Self {
        Self { current }
    }

    /// Restores a persisted value, falling back to the default when the
    /// stored string is missing or unusable.
    pub fn restore(saved: Option<&str>) -> Self {
        let current = saved
            .and_then(|value| Endpoint::parse(value).ok())
            .unwrap_or_default();
        Self { current }
    }

    pub fn get(&self) -> &Endpoint {
        &self.current
    }

    /// Replaces the endpoint. On error the store is left unchanged.
    pub fn set(&mut self, candidate: &str) -> Result<Endpoint, InvalidEndpoint> {
        let endpoint = Endpoint::parse(candidate)?;
        self.current = endpoint.clone();
        Ok(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_one_trailing_slash() {
        assert_eq!(Endpoint::parse("http://x//").unwrap().as_str(), "http://x/");
    }

    #[test]
    fn lone_slash_is_rejected() {
        assert_eq!(Endpoint::parse(" / "), Err(InvalidEndpoint));
    }

    #[test]
    fn restore_falls_back_to_default() {
        assert_eq!(EndpointStore::restore(None).get().as_str(), DEFAULT_ENDPOINT);
        assert_eq!(
            EndpointStore::restore(Some("   ")).get().as_str(),
            DEFAULT_ENDPOINT
        );
        assert_eq!(
            EndpointStore::restore(Some("http://saved/")).get().as_str(),
            "http://saved"
        );
    }
}
