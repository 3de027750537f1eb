/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Tunable knobs for one resolver instance.
///
/// These are the resolver's *own* settings (cache TTLs, the HTTPS size
/// cap, the request timeout) — not configuration for whatever binds the
/// chain client or embeds the resolver in an HTTP server, which stays
/// out of scope per the spec.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
  /// TTL applied to a successfully read URL.
  pub positive_ttl: Duration,

  /// TTL applied to a URL that failed to read.
  pub negative_ttl: Duration,

  /// Maximum accepted size of an HTTPS response body, in bytes.
  pub max_response_bytes: u64,

  /// Timeout applied to a single HTTPS fetch.
  pub request_timeout: Duration,
}

impl Default for ResolverConfig {
  fn default() -> Self {
    Self {
      positive_ttl: Duration::from_millis(crate::DEFAULT_POSITIVE_TTL_MS),
      negative_ttl: Duration::from_millis(crate::DEFAULT_NEGATIVE_TTL_MS),
      max_response_bytes: crate::DEFAULT_MAX_RESPONSE_BYTES,
      request_timeout: Duration::from_secs(crate::DEFAULT_REQUEST_TIMEOUT_SECS),
    }
  }
}

impl ResolverConfig {
  /// Load configuration from environment variables, falling back to
  /// defaults for anything unset.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let positive_ttl_ms = parse_env_or("KEETA_RESOLVER_POSITIVE_TTL_MS", crate::DEFAULT_POSITIVE_TTL_MS)?;
    let negative_ttl_ms = parse_env_or("KEETA_RESOLVER_NEGATIVE_TTL_MS", crate::DEFAULT_NEGATIVE_TTL_MS)?;
    let max_response_bytes =
      parse_env_or("KEETA_RESOLVER_MAX_RESPONSE_BYTES", crate::DEFAULT_MAX_RESPONSE_BYTES)?;
    let request_timeout_secs =
      parse_env_or("KEETA_RESOLVER_REQUEST_TIMEOUT_SECS", crate::DEFAULT_REQUEST_TIMEOUT_SECS)?;

    Ok(Self {
      positive_ttl: Duration::from_millis(positive_ttl_ms),
      negative_ttl: Duration::from_millis(negative_ttl_ms),
      max_response_bytes,
      request_timeout: Duration::from_secs(request_timeout_secs),
    })
  }

  /// Build a config with explicit TTLs (useful for tests that need
  /// short-lived negative caching).
  pub fn with_ttls(positive_ttl: Duration, negative_ttl: Duration) -> Self {
    Self { positive_ttl, negative_ttl, ..Self::default() }
  }
}

fn parse_env_or(key: &str, default: u64) -> Result<u64> {
  match env::var(key) {
    Ok(v) => v.parse().map_err(|_| Error::Config(format!("Invalid {key}"))),
    Err(_) => Ok(default),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let config = ResolverConfig::default();
    assert_eq!(config.positive_ttl, Duration::from_secs(60));
    assert_eq!(config.negative_ttl, Duration::from_secs(5));
    assert_eq!(config.max_response_bytes, 1_048_576);
  }

  #[test]
  fn test_with_ttls() {
    let config = ResolverConfig::with_ttls(Duration::from_millis(10), Duration::from_millis(1));
    assert_eq!(config.positive_ttl, Duration::from_millis(10));
    assert_eq!(config.negative_ttl, Duration::from_millis(1));
    assert_eq!(config.max_response_bytes, crate::DEFAULT_MAX_RESPONSE_BYTES);
  }

  #[test]
  fn test_from_env_defaults_when_unset() {
    env::remove_var("KEETA_RESOLVER_POSITIVE_TTL_MS");
    let config = ResolverConfig::from_env().unwrap();
    assert_eq!(config.positive_ttl, Duration::from_secs(60));
  }
}
