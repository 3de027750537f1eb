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

//! Metadata Node (spec §4.4 C4).
//!
//! One logical node in the traversed graph: owns a URL, a `seenURLs` set
//! inherited from its parent (fresh for a root node), and the shared
//! cache/chain-client/stats/reader it reads through. Transient — one per
//! `value(...)` lookup chain.

use crate::cache::{Cache, CacheLookup};
use crate::client::ChainClientAdapter;
use crate::stats::Stats;
use crate::transport::UrlReader;
use crate::value::{valuize, Forced};
use resolver_core::{Error, Kind};
use resolver_models::{ExternalRef, MetadataUrl};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, trace};

/// State shared by every [`MetadataNode`] spawned from one resolver
/// instance: the cache, the chain client, the stateless URL reader, the
/// stats counters, and the configured TTLs. Cheap to clone (an `Arc`).
pub struct SharedCtx {
  pub cache: Cache,
  pub chain_client: Arc<dyn ChainClientAdapter>,
  pub reader: UrlReader,
  pub stats: Arc<Stats>,
  pub positive_ttl: Duration,
  pub negative_ttl: Duration,
}

/// `ChainClientAdapter` carries no `Debug` supertrait, so `dyn
/// ChainClientAdapter` (and therefore `Arc<dyn ChainClientAdapter>`)
/// isn't `Debug`. Hand-written rather than derived, redacting the
/// trait-object field — mirrors `av-client::transport::Transport`'s
/// manual `Debug` impl over its own non-`Debug` `reqwest::Client`.
impl std::fmt::Debug for SharedCtx {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SharedCtx")
      .field("cache", &self.cache)
      .field("chain_client", &"<dyn ChainClientAdapter>")
      .field("reader", &self.reader)
      .field("stats", &self.stats)
      .field("positive_ttl", &self.positive_ttl)
      .field("negative_ttl", &self.negative_ttl)
      .finish()
  }
}

/// A transient node bound to one URL in the metadata graph.
#[derive(Debug, Clone)]
pub struct MetadataNode {
  url: String,
  ctx: Arc<SharedCtx>,
  seen_urls: HashSet<String>,
}

impl MetadataNode {
  /// Construct a root node with a fresh, empty `seenURLs` set.
  pub fn root(url: impl Into<String>, ctx: Arc<SharedCtx>) -> Self {
    Self { url: url.into(), ctx, seen_urls: HashSet::new() }
  }

  /// Construct a child node, inheriting `seen` from the parent chain
  /// (spec §3 invariant 2 — the cycle guard is per logical chain).
  pub(crate) fn child(url: impl Into<String>, ctx: Arc<SharedCtx>, seen: HashSet<String>) -> Self {
    Self { url: url.into(), ctx, seen_urls: seen }
  }

  pub fn url(&self) -> &str {
    &self.url
  }

  /// The root accessor: read this node's URL, flatten any top-level
  /// external-reference chain, then assert/coerce to `kind` (spec §4.4).
  #[instrument(skip(self), fields(url = %self.url))]
  pub async fn value(&self, kind: Kind) -> Result<Forced, Error> {
    let mut seen = self.seen_urls.clone();
    let raw = self.read_and_resolve(&self.url, &mut seen).await?;
    valuize(raw, kind, &self.ctx, &seen)
  }

  /// Read `url`, following external-reference chains at the document
  /// root until a non-reference document is returned (spec §3 invariant 3,
  /// §4.4 `resolveValue`).
  async fn read_and_resolve(&self, url: &str, seen: &mut HashSet<String>) -> Result<Value, Error> {
    let mut current = url.to_string();
    loop {
      let raw = self.read_url(&current, seen).await?;
      match ExternalRef::detect(&raw) {
        Some(ext) => current = ext.url,
        None => return Ok(raw),
      }
    }
  }

  /// `readURL` (spec §4.4): the cache/seen-set/scheme-dispatch sequence
  /// that turns a URL into a JSON document.
  async fn read_url(&self, url: &str, seen: &mut HashSet<String>) -> Result<Value, Error> {
    self.ctx.stats.record_read();

    if seen.contains(url) {
      trace!(url, "cycle short-circuit");
      return Ok(Value::String(String::new()));
    }
    seen.insert(url.to_string());

    match self.ctx.cache.get(url) {
      CacheLookup::Hit(v) => {
        self.ctx.stats.record_cache_hit();
        return Ok(v);
      }
      CacheLookup::HitFailure(e) => {
        self.ctx.stats.record_cache_hit();
        return Err(e);
      }
      CacheLookup::Miss => {
        self.ctx.stats.record_cache_miss();
      }
    }

    let parsed = match MetadataUrl::parse(url) {
      Ok(p) => p,
      Err(e) => {
        self.ctx.stats.record_unsupported_read();
        self.ctx.cache.put_failure(url, e.clone(), self.ctx.negative_ttl);
        return Err(e);
      }
    };

    match &parsed {
      MetadataUrl::Keetanet { .. } => self.ctx.stats.record_keetanet_read(),
      MetadataUrl::Https(_) => self.ctx.stats.record_https_read(),
    }

    match self.ctx.reader.read(&parsed, self.ctx.chain_client.as_ref()).await {
      Ok(v) => {
        self.ctx.cache.put_success(url, v.clone(), self.ctx.positive_ttl);
        Ok(v)
      }
      Err(e) => {
        self.ctx.cache.put_failure(url, e.clone(), self.ctx.negative_ttl);
        Err(e)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::client::MockChainClient;
  use resolver_core::ResolverConfig;

  fn shared_ctx(chain_client: MockChainClient) -> Arc<SharedCtx> {
    let config = ResolverConfig::default();
    Arc::new(SharedCtx {
      cache: Cache::new(),
      chain_client: Arc::new(chain_client),
      reader: UrlReader::new(&config),
      stats: Arc::new(Stats::new()),
      positive_ttl: Duration::from_secs(60),
      negative_ttl: Duration::from_secs(5),
    })
  }

  #[tokio::test]
  async fn test_root_value_reads_object() {
    let client = MockChainClient::new().with_metadata("root", r#"{"version": 1}"#);
    let ctx = shared_ctx(client);
    let node = MetadataNode::root("keetanet://root/metadata", ctx);
    let obj = node.value(Kind::Object).await.unwrap().into_object().unwrap();
    assert_eq!(obj.get("version").unwrap().number().await.unwrap(), 1.0);
  }

  #[tokio::test]
  async fn test_self_cycle_short_circuits() {
    let client =
      MockChainClient::new().with_metadata("l", r#"{"external":"2b828e33-2692-46e9-817e-9b93d63f28fd","url":"keetanet://l/metadata"}"#);
    let ctx = shared_ctx(client);
    let node = MetadataNode::root("keetanet://l/metadata", ctx);
    // The self-reference flattens forever until the cycle short-circuit
    // returns the empty-string sentinel, which is a primitive.
    let forced = node.value(Kind::Any).await.unwrap();
    assert!(matches!(forced, Forced::Scalar(Value::String(s)) if s.is_empty()));
  }

  #[tokio::test]
  async fn test_repeat_read_is_cache_hit() {
    let client = MockChainClient::new().with_metadata("root", r#"{"version": 1}"#);
    let ctx = shared_ctx(client);
    let node = MetadataNode::root("keetanet://root/metadata", ctx.clone());
    node.value(Kind::Object).await.unwrap();
    node.value(Kind::Object).await.unwrap();
    let snap = ctx.stats.snapshot();
    assert_eq!(snap.keetanet_reads, 1);
    assert!(snap.cache_hit >= 1);
  }

  #[tokio::test]
  async fn test_external_reference_indirection_counts_one_read() {
    let client = MockChainClient::new()
      .with_metadata("root", r#"{"external":"2b828e33-2692-46e9-817e-9b93d63f28fd","url":"keetanet://b/metadata"}"#)
      .with_metadata("b", r#"{"countryCodes":["US"]}"#);
    let ctx = shared_ctx(client);
    let node = MetadataNode::root("keetanet://root/metadata", ctx.clone());
    let obj = node.value(Kind::Object).await.unwrap().into_object().unwrap();
    assert!(obj.contains_key("countryCodes"));
    assert_eq!(ctx.stats.snapshot().keetanet_reads, 2);
  }

  #[tokio::test]
  async fn test_negative_cache_then_retry_after_ttl() {
    let ctx = shared_ctx(MockChainClient::new());
    let node = MetadataNode::root("https://unreachable.invalid/metadata", ctx.clone());
    let err = node.value(Kind::Object).await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
    // second call within negativeTTL should be a cache hit, not another attempt
    let err2 = node.value(Kind::Object).await.unwrap_err();
    assert!(matches!(err2, Error::Transport { .. }));
    assert_eq!(ctx.stats.snapshot().https_reads, 1);
  }

  #[tokio::test]
  async fn test_json_null_and_invalid_scheme_error() {
    let ctx = shared_ctx(MockChainClient::new());
    let node = MetadataNode::root("ftp://example.com/x", ctx);
    let err = node.value(Kind::Any).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedProtocol(_)));
  }

  #[tokio::test]
  async fn test_basic_banking_provider_lookup_shape() {
    let client = MockChainClient::new().with_metadata(
      "root",
      r#"{"version":1,"services":{"banking":{"keeta_foo":{"countryCodes":["MX"],"currencyCodes":["MXN"],"operations":{"createAccount":"https://x.example/createAccount"}}}}}"#,
    );
    let ctx = shared_ctx(client);
    let node = MetadataNode::root("keetanet://root/metadata", ctx);
    let root = node.value(Kind::Object).await.unwrap().into_object().unwrap();
    let services = root.get("services").unwrap().object().await.unwrap();
    let banking = services.get("banking").unwrap().object().await.unwrap();
    let foo = banking.get("keeta_foo").unwrap().object().await.unwrap();
    let ops = foo.get("operations").unwrap().object().await.unwrap();
    assert_eq!(ops.get("createAccount").unwrap().string().await.unwrap(), "https://x.example/createAccount");
  }
}
