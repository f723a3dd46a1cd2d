use std::time::Duration;

use crawldash_logging::{dash_debug, dash_warn};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::{ApiError, ApiErrorKind, StatusReply, SubmitReply};

/// Transport settings. Timeouts are off unless set; the transport defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

/// The two routes of the crawl service.
#[async_trait::async_trait]
pub trait CrawlApi: Send + Sync {
    /// POST `{endpoint}/crawl?limit={limit}` with `urls` as a JSON array.
    async fn submit(
        &self,
        endpoint: &str,
        urls: &[String],
        limit: u32,
    ) -> Result<SubmitReply, ApiError>;

    /// GET `{endpoint}/status` without following redirects.
    async fn status(&self, endpoint: &str) -> Result<StatusReply, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCrawlApi {
    submit_client: reqwest::Client,
    status_client: reqwest::Client,
}

impl ReqwestCrawlApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let submit_client = build_client(settings, reqwest::redirect::Policy::default())?;
        let status_client = build_client(settings, reqwest::redirect::Policy::none())?;
        Ok(Self {
            submit_client,
            status_client,
        })
    }
}

fn build_client(
    settings: &ClientSettings,
    policy: reqwest::redirect::Policy,
) -> Result<reqwest::Client, ApiError> {
    let mut builder = reqwest::Client::builder().redirect(policy);
    if let Some(timeout) = settings.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = settings.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| ApiError::new(ApiErrorKind::InvalidRequest, err.to_string()))
}

#[async_trait::async_trait]
impl CrawlApi for ReqwestCrawlApi {
    async fn submit(
        &self,
        endpoint: &str,
        urls: &[String],
        limit: u32,
    ) -> Result<SubmitReply, ApiError> {
        let url = format!("{endpoint}/crawl?limit={limit}");
        let body = serde_json::to_vec(urls)
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidRequest, err.to_string()))?;

        let response = self
            .submit_client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let http_status = if status.is_success() {
            None
        } else {
            dash_warn!("POST {} answered {}", url, status);
            Some(status.as_u16())
        };

        // A failing status may still carry a usable body.
        let outcome = read_json(response).await.map(|reply| {
            dash_debug!("POST {} replied {}", url, reply);
            is_truthy(&reply)
        });

        Ok(SubmitReply {
            http_status,
            outcome,
        })
    }

    async fn status(&self, endpoint: &str) -> Result<StatusReply, ApiError> {
        let url = format!("{endpoint}/status");
        let response = self
            .status_client
            .get(&url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_redirection() {
            return Err(ApiError::new(
                ApiErrorKind::UnexpectedRedirect(status.as_u16()),
                format!("GET {url} answered {status}"),
            ));
        }

        match read_json(response).await? {
            Value::Array(rows) => Ok(StatusReply::Rows(rows)),
            _ => Ok(StatusReply::NotAnArray),
        }
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| ApiError::new(ApiErrorKind::MalformedResponse, err.to_string()))
}

/// JavaScript-style truthiness of a decoded reply.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_f64()
            .map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        return ApiError::new(ApiErrorKind::InvalidRequest, err.to_string());
    }
    if err.is_timeout() {
        return ApiError::new(ApiErrorKind::Timeout, err.to_string());
    }
    ApiError::new(ApiErrorKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_javascript() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));

        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
    }

    #[test]
    fn client_builds_with_defaults() {
        assert!(ReqwestCrawlApi::new(&ClientSettings::default()).is_ok());
    }
}
