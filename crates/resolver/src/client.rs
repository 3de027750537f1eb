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

//! Chain Client Adapter (spec §4.2 C2).
//!
//! A narrow interface the resolver holds a handle to. The concrete
//! binding to the actual chain SDK is injected by the caller; the
//! resolver never depends on anything richer than this trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Abstracts away the underlying chain SDK: the resolver only ever
/// needs to turn a public-key string into the account's raw,
/// Base64-encoded metadata field.
#[async_trait]
pub trait ChainClientAdapter: Send + Sync {
  /// Fetch the Base64-encoded metadata string stored on `public_key`'s
  /// account. `Ok(None)` means the account exists but has no metadata
  /// field set; the caller treats that the same as an empty string.
  async fn fetch_account_metadata(&self, public_key: &str) -> Result<Option<String>, String>;

  /// Parse a hostname component into a validated account public-key
  /// string. Returns `None` if `s` is not a well-formed public key —
  /// the URL Reader treats that as the non-fatal empty-string sentinel
  /// (spec §4.1), not as a propagated error.
  fn parse_public_key_string(&self, s: &str) -> Option<String>;
}

/// An in-memory [`ChainClientAdapter`] seeded with a fixed table of
/// public-key → metadata-JSON-text, for tests and examples. Analogous to
/// the teacher's `Transport::new_mock()` constructor.
#[derive(Debug, Default)]
pub struct MockChainClient {
  accounts: Mutex<HashMap<String, String>>,
  valid_keys: Mutex<HashMap<String, bool>>,
}

impl MockChainClient {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed an account's metadata document (will be Base64-encoded on
  /// read, mirroring how metadata is actually stored on-chain).
  pub fn with_metadata(self, public_key: impl Into<String>, metadata_json: impl Into<String>) -> Self {
    self.accounts.lock().unwrap().insert(public_key.into(), metadata_json.into());
    self
  }

  /// Mark a hostname as an unparseable public key (triggers the
  /// `ErrInvalidPublicKey` → empty-string softening path, spec §4.1/§7).
  pub fn with_invalid_key(self, hostname: impl Into<String>) -> Self {
    self.valid_keys.lock().unwrap().insert(hostname.into(), false);
    self
  }
}

#[async_trait]
impl ChainClientAdapter for MockChainClient {
  async fn fetch_account_metadata(&self, public_key: &str) -> Result<Option<String>, String> {
    use base64::Engine;
    let accounts = self.accounts.lock().unwrap();
    Ok(accounts.get(public_key).map(|json| base64::engine::general_purpose::STANDARD.encode(json)))
  }

  fn parse_public_key_string(&self, s: &str) -> Option<String> {
    if s.is_empty() {
      return None;
    }
    let valid_keys = self.valid_keys.lock().unwrap();
    if valid_keys.get(s) == Some(&false) {
      None
    } else {
      Some(s.to_string())
    }
  }
}
