/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! URL Reader (spec §4.1 C1).
//!
//! Fetches a raw metadata document from one URL. Knows nothing about
//! graph structure, the cache, or the seen-set — those belong to
//! [`crate::node::MetadataNode`]. Stateless beyond the HTTP client and
//! the configured size/timeout caps.

use crate::client::ChainClientAdapter;
use resolver_core::{Error, ResolverConfig};
use resolver_models::MetadataUrl;
use serde_json::Value;
use tracing::{instrument, warn};

/// Sentinel JSON value returned for a `keetanet:` URL whose hostname is
/// not a parseable public key (spec §4.1 — deliberately non-fatal, so a
/// broken reference doesn't abort the enclosing evaluation).
pub fn empty_sentinel() -> Value {
  Value::String(String::new())
}

#[derive(Debug)]
pub struct UrlReader {
  http: reqwest::Client,
  max_response_bytes: u64,
}

impl UrlReader {
  pub fn new(config: &ResolverConfig) -> Self {
    let http = reqwest::Client::builder()
      .timeout(config.request_timeout)
      .user_agent("keeta-metadata-resolver/0.1")
      .build()
      .expect("failed to build HTTPS transport for metadata resolver");
    Self { http, max_response_bytes: config.max_response_bytes }
  }

  /// Fetch the document addressed by `url`. `chain_client` is used only
  /// for the `keetanet:` scheme.
  #[instrument(skip(self, chain_client), fields(url = %url))]
  pub async fn read(&self, url: &MetadataUrl, chain_client: &dyn ChainClientAdapter) -> Result<Value, Error> {
    match url {
      MetadataUrl::Keetanet { public_key } => self.read_keetanet(public_key, chain_client).await,
      MetadataUrl::Https(https_url) => self.read_https(https_url).await,
    }
  }

  async fn read_keetanet(
    &self,
    hostname: &str,
    chain_client: &dyn ChainClientAdapter,
  ) -> Result<Value, Error> {
    let Some(account) = chain_client.parse_public_key_string(hostname) else {
      warn!(hostname, "keetanet hostname is not a parseable public key, returning empty sentinel");
      return Ok(empty_sentinel());
    };

    let metadata_b64 = chain_client
      .fetch_account_metadata(&account)
      .await
      .map_err(|e| Error::Transport { status: None, message: e })?;

    let Some(metadata_b64) = metadata_b64 else {
      return Ok(empty_sentinel());
    };

    use base64::Engine;
    let decoded = base64::engine::general_purpose::STANDARD
      .decode(metadata_b64.trim())
      .map_err(|e| Error::Transport { status: None, message: format!("invalid base64 metadata: {e}") })?;

    let text = String::from_utf8(decoded)
      .map_err(|e| Error::Transport { status: None, message: format!("metadata is not valid UTF-8: {e}") })?;

    if text.is_empty() {
      return Ok(empty_sentinel());
    }

    let value: Value = serde_json::from_str(&text)?;
    Ok(value)
  }

  async fn read_https(&self, url: &url::Url) -> Result<Value, Error> {
    let response = self
      .http
      .get(url.clone())
      .header("Accept", "application/json")
      .send()
      .await
      .map_err(|e| Error::Transport { status: None, message: e.to_string() })?;

    let status = response.status();

    if status.as_u16() == 204 {
      return Ok(Value::Object(Default::default()));
    }

    if !status.is_success() {
      let text = response.text().await.unwrap_or_default();
      return Err(Error::Transport { status: Some(status.as_u16()), message: text });
    }

    if let Some(len) = response.content_length() {
      if len > self.max_response_bytes {
        return Err(Error::Transport {
          status: Some(status.as_u16()),
          message: format!("response body of {len} bytes exceeds cap of {}", self.max_response_bytes),
        });
      }
    }

    let bytes = response.bytes().await.map_err(|e| Error::Transport { status: None, message: e.to_string() })?;
    if bytes.len() as u64 > self.max_response_bytes {
      return Err(Error::Transport {
        status: Some(status.as_u16()),
        message: format!("response body of {} bytes exceeds cap of {}", bytes.len(), self.max_response_bytes),
      });
    }

    let value: Value = serde_json::from_slice(&bytes)?;
    Ok(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::client::MockChainClient;
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn config() -> ResolverConfig {
    ResolverConfig::default()
  }

  #[tokio::test]
  async fn test_read_keetanet_success() {
    let chain_client = MockChainClient::new().with_metadata("acct-a", r#"{"version":1}"#);
    let reader = UrlReader::new(&config());
    let result = reader.read_keetanet("acct-a", &chain_client).await.unwrap();
    assert_eq!(result, serde_json::json!({"version": 1}));
  }

  #[tokio::test]
  async fn test_read_keetanet_invalid_public_key_is_empty_sentinel() {
    let chain_client = MockChainClient::new().with_invalid_key("bad-host");
    let reader = UrlReader::new(&config());
    let result = reader.read_keetanet("bad-host", &chain_client).await.unwrap();
    assert_eq!(result, empty_sentinel());
  }

  #[tokio::test]
  async fn test_read_keetanet_unknown_account_is_empty_sentinel() {
    let chain_client = MockChainClient::new();
    let reader = UrlReader::new(&config());
    let result = reader.read_keetanet("ghost", &chain_client).await.unwrap();
    assert_eq!(result, empty_sentinel());
  }

  #[tokio::test]
  async fn test_read_https_200_parses_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/metadata"))
      .and(header("Accept", "application/json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": 1})))
      .mount(&server)
      .await;

    let reader = UrlReader::new(&config());
    let url = url::Url::parse(&format!("{}/metadata", server.uri())).unwrap();
    let result = reader.read_https(&url).await.unwrap();
    assert_eq!(result, serde_json::json!({"version": 1}));
  }

  #[tokio::test]
  async fn test_read_https_204_is_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/metadata")).respond_with(ResponseTemplate::new(204)).mount(&server).await;

    let reader = UrlReader::new(&config());
    let url = url::Url::parse(&format!("{}/metadata", server.uri())).unwrap();
    let result = reader.read_https(&url).await.unwrap();
    assert_eq!(result, serde_json::json!({}));
  }

  #[tokio::test]
  async fn test_read_https_non_200_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/metadata"))
      .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
      .mount(&server)
      .await;

    let reader = UrlReader::new(&config());
    let url = url::Url::parse(&format!("{}/metadata", server.uri())).unwrap();
    let err = reader.read_https(&url).await.unwrap_err();
    assert!(matches!(err, Error::Transport { status: Some(503), .. }));
  }

  #[tokio::test]
  async fn test_read_https_oversize_body_is_transport_error() {
    let server = MockServer::start().await;
    let big = "x".repeat(100);
    Mock::given(method("GET"))
      .and(path("/metadata"))
      .respond_with(ResponseTemplate::new(200).set_body_string(format!("\"{big}\"")))
      .mount(&server)
      .await;

    let mut small_config = config();
    small_config.max_response_bytes = 16;
    let reader = UrlReader::new(&small_config);
    let url = url::Url::parse(&format!("{}/metadata", server.uri())).unwrap();
    let err = reader.read_https(&url).await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
  }
}
