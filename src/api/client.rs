//! HTTP client for the farm API.
//!
//! Every call is exactly one request. The whole exchange (send + body read)
//! runs under the configured request timeout; nothing is retried.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tokio::time::timeout;

use super::envelope::{decode_data, error_from_body};
use super::error::ApiError;
use super::payload::Payload;
use crate::config::ApiConfig;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.request_timeout_seconds.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `animals` or `animals/42`.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let raw = format!("{}/api/{}", self.base_url, path.trim_start_matches('/'));
        let parsed = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };
        parsed.map_err(|e| ApiError::Network(format!("Invalid URL '{}': {}", raw, e)))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = self.url(path, query)?;
        let body = self.execute(self.request(Method::GET, url, token)).await?;
        decode_data(&body)
    }

    /// POST/PUT/PATCH with a JSON or multipart body.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = self.url(path, &[])?;
        let builder = self.request(method, url, token);
        let builder = if payload.is_multipart() {
            builder.multipart(payload.to_form()?)
        } else {
            builder.json(&payload.to_json())
        };
        let body = self.execute(builder).await?;
        decode_data(&body)
    }

    /// DELETE; a successful response body is ignored.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), ApiError> {
        let url = self.url(path, &[])?;
        self.execute(self.request(Method::DELETE, url, token)).await?;
        Ok(())
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, ApiError>((status, body))
        };

        let (status, body) = match timeout(self.request_timeout, exchange).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(ApiError::Timeout {
                    duration: self.request_timeout.as_secs(),
                })
            }
        };

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn url_joins_api_prefix() {
        let c = client("http://localhost:5000/");
        assert_eq!(
            c.url("animals", &[]).unwrap().as_str(),
            "http://localhost:5000/api/animals"
        );
        assert_eq!(
            c.url("/animals/42", &[]).unwrap().as_str(),
            "http://localhost:5000/api/animals/42"
        );
    }

    #[test]
    fn url_encodes_query() {
        let c = client("http://localhost:5000");
        let url = c
            .url("marketplace", &[("category", "feed & grain")])
            .unwrap();
        assert_eq!(url.query(), Some("category=feed+%26+grain"));
    }
}
