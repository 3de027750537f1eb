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

//! Resolver Facade (spec §4.6 C6).
//!
//! The public entry point: constructed with a root account and a chain
//! client, it keeps the shared cache and stats for every lookup run
//! through it, and dispatches typed service lookups against search
//! criteria (spec §4.7 C7) to the metadata graph rooted at the account's
//! `keetanet://<root>/metadata` document.

use crate::cache::Cache;
use crate::client::ChainClientAdapter;
use crate::evaluator::{self, Criteria};
use crate::node::{MetadataNode, SharedCtx};
use crate::stats::{Stats, StatsSnapshot};
use crate::transport::UrlReader;
use crate::value::LazyValue;
use indexmap::IndexMap;
use resolver_core::{Error, Kind, ResolverConfig, SUPPORTED_METADATA_VERSION};
use resolver_models::{MetadataUrl, ServiceCategory};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// A matched provider descriptor: its `services.<category>` id, plus the
/// forced fields a caller can introspect further (each may itself be an
/// unforced external reference — forcing one field never forces its
/// siblings, spec §4.5).
#[derive(Debug, Clone)]
pub struct ProviderMatch {
  id: String,
  fields: IndexMap<String, LazyValue>,
}

impl ProviderMatch {
  /// The provider id it was registered under (`services.<category>.<id>`).
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Look up one field of the matched provider's descriptor.
  pub fn field(&self, name: &str) -> Option<&LazyValue> {
    self.fields.get(name)
  }

  /// All forced top-level fields.
  pub fn fields(&self) -> &IndexMap<String, LazyValue> {
    &self.fields
  }
}

/// A crude capability token guarding [`Resolver::stats_mut`] (spec §4.6,
/// §9 design notes: "a statically typed implementation should prefer
/// package-private visibility ... the sentinel test exists so external
/// code cannot accidentally mutate stats"). Each [`Resolver`] mints its
/// own token at construction; comparison is by `Arc` identity, not value,
/// so no other token — however constructed — can satisfy it.
#[derive(Clone)]
pub struct AccessToken(Arc<()>);

impl AccessToken {
  pub(crate) fn new() -> Self {
    AccessToken(Arc::new(()))
  }
}

/// Resolver statistics (spec §4.6): six monotonically increasing
/// counters, reset together by [`Resolver::clear_cache`].
pub type ResolverStats = StatsSnapshot;

/// The public metadata-resolver API (spec §4.6 C6).
pub struct Resolver {
  root: String,
  /// Trusted CA list: opaque pass-through for future certificate
  /// verification layered on top of the resolver; unused by the core.
  trusted_ca: Vec<String>,
  id: String,
  ctx: Arc<SharedCtx>,
  internal_token: AccessToken,
}

impl Resolver {
  /// Construct a resolver with default TTLs, no trusted CA list, and a
  /// random id.
  pub fn new(root: impl Into<String>, chain_client: Arc<dyn ChainClientAdapter>) -> Self {
    Self::with_options(root, chain_client, ResolverConfig::default(), Vec::new(), None)
  }

  /// Construct a resolver with every optional parameter spec §4.6 lists:
  /// cache TTLs via `config`, a `trusted_ca` pass-through list, and an
  /// explicit `id` (a random UUID is minted if `None`).
  pub fn with_options(
    root: impl Into<String>,
    chain_client: Arc<dyn ChainClientAdapter>,
    config: ResolverConfig,
    trusted_ca: Vec<String>,
    id: Option<String>,
  ) -> Self {
    let ctx = Arc::new(SharedCtx {
      cache: Cache::new(),
      reader: UrlReader::new(&config),
      chain_client,
      stats: Arc::new(Stats::new()),
      positive_ttl: config.positive_ttl,
      negative_ttl: config.negative_ttl,
    });
    Self { root: root.into(), trusted_ca, id: id.unwrap_or_else(|| Uuid::new_v4().to_string()), ctx, internal_token: AccessToken::new() }
  }

  /// The root account this resolver evaluates `services.*` against.
  pub fn root(&self) -> &str {
    &self.root
  }

  /// This resolver instance's id (random, unless set at construction).
  pub fn id(&self) -> &str {
    &self.id
  }

  /// The opaque trusted-CA pass-through given at construction.
  pub fn trusted_ca(&self) -> &[String] {
    &self.trusted_ca
  }

  /// A deep copy of the current stats — external observers cannot
  /// mutate internal counters through it (spec §4.6).
  pub fn stats(&self) -> ResolverStats {
    self.ctx.stats.snapshot()
  }

  /// The token-guarded internal mutable-stats accessor (spec §4.6, §9,
  /// P7). Any token other than the one minted for this exact resolver
  /// instance raises [`Error::InvalidAccessToken`]; there is no way for
  /// code outside this crate to construct a valid one.
  pub fn stats_mut(&self, token: &AccessToken) -> Result<&Stats, Error> {
    if !Arc::ptr_eq(&token.0, &self.internal_token.0) {
      return Err(Error::InvalidAccessToken);
    }
    Ok(&self.ctx.stats)
  }

  #[cfg(test)]
  pub(crate) fn internal_token(&self) -> AccessToken {
    self.internal_token.clone()
  }

  /// Clear the cache and zero every stats counter in one step (spec §4.6).
  pub fn clear_cache(&self) {
    self.ctx.cache.clear();
    self.ctx.stats.reset();
  }

  /// Dispatch a typed service lookup against `criteria` (spec §4.6).
  ///
  /// Verifies the root document's `version`, extracts `services.<category>`
  /// (absent category → `Ok(None)`), then evaluates each provider entry
  /// against `criteria`. A provider descriptor that is missing required
  /// fields, of the wrong kind, or otherwise invalid is logged at debug
  /// and skipped — it must never fail the whole lookup (spec §7, P4).
  #[instrument(skip(self, criteria), fields(resolver_id = %self.id, category = %criteria.category()))]
  pub async fn lookup(&self, criteria: &Criteria) -> Result<Option<IndexMap<String, ProviderMatch>>, Error> {
    let category = criteria.category();
    let root_url = MetadataUrl::keetanet_metadata(&self.root);
    let node = MetadataNode::root(root_url, self.ctx.clone());
    let root_obj = node.value(Kind::Object).await?.into_object()?;

    let version = match root_obj.get("version") {
      Some(v) => v.number().await? as i64,
      None => 0,
    };
    if version != SUPPORTED_METADATA_VERSION {
      return Err(Error::UnsupportedVersion(version));
    }

    let services = match root_obj.get("services") {
      Some(v) => v.object().await?,
      None => return Err(Error::MissingServices),
    };

    let Some(category_val) = services.get(category.json_key()) else {
      return Ok(None);
    };
    let providers = category_val.object().await?;

    let mut matches = IndexMap::new();
    for (provider_id, provider_lazy) in providers {
      let fields = match provider_lazy.object().await {
        Ok(f) => f,
        Err(e) => {
          debug!(provider = %provider_id, error = %e, "provider descriptor invalid, skipping");
          continue;
        }
      };
      match evaluator::evaluate(category, &fields, criteria).await {
        Ok(true) => {
          matches.insert(provider_id.clone(), ProviderMatch { id: provider_id, fields });
        }
        Ok(false) => {}
        Err(e) => {
          debug!(provider = %provider_id, error = %e, "provider evaluation failed, skipping");
        }
      }
    }

    if matches.is_empty() {
      Ok(None)
    } else {
      Ok(Some(matches))
    }
  }
}
