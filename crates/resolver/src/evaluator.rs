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

//! Search Criteria Evaluator (spec §4.7 C7).
//!
//! Per-category predicates that decide whether a forced provider
//! descriptor satisfies a caller's search criteria. Every predicate
//! treats an empty criteria list as vacuously true, forces only the
//! fields it needs (never the whole descriptor), and turns any missing
//! or wrong-kind required field into [`Error::ProviderInvalid`] so a
//! single bad provider can be skipped by the caller (spec §7, P4)
//! without failing the whole lookup.

use crate::value::LazyValue;
use indexmap::IndexMap;
use resolver_core::Error;
use resolver_models::canon::{canonicalize_country, canonicalize_currency, canonicalize_token};
use resolver_models::{
  AssetMovementCriteria, AssetSelector, BankingCriteria, FxCriteria, KycCriteria, OrderMatcherCriteria,
  ServiceCategory, UsernameCriteria,
};

/// The typed search criteria accepted by [`crate::facade::Resolver::lookup`],
/// one variant per [`ServiceCategory`].
#[derive(Debug, Clone)]
pub enum Criteria {
  Banking(BankingCriteria),
  Kyc(KycCriteria),
  Fx(FxCriteria),
  AssetMovement(AssetMovementCriteria),
  OrderMatcher(OrderMatcherCriteria),
  Username(UsernameCriteria),
}

impl Criteria {
  /// The category this criteria variant belongs to.
  pub fn category(&self) -> ServiceCategory {
    match self {
      Criteria::Banking(_) => ServiceCategory::Banking,
      Criteria::Kyc(_) => ServiceCategory::Kyc,
      Criteria::Fx(_) => ServiceCategory::Fx,
      Criteria::AssetMovement(_) => ServiceCategory::AssetMovement,
      Criteria::OrderMatcher(_) => ServiceCategory::OrderMatcher,
      Criteria::Username(_) => ServiceCategory::Username,
    }
  }
}

/// Evaluate whether a forced provider descriptor (`fields`) matches
/// `criteria`. `category` must agree with `criteria`'s own category —
/// a caller that somehow mismatches the two gets [`Error::NotImplemented`],
/// since that combination has no defined match rule.
pub(crate) async fn evaluate(
  category: ServiceCategory,
  fields: &IndexMap<String, LazyValue>,
  criteria: &Criteria,
) -> Result<bool, Error> {
  match (category, criteria) {
    (ServiceCategory::Banking, Criteria::Banking(c)) => match_banking(fields, c).await,
    (ServiceCategory::Kyc, Criteria::Kyc(c)) => match_kyc(fields, c).await,
    (ServiceCategory::Fx, Criteria::Fx(c)) => match_fx(fields, c).await,
    (ServiceCategory::AssetMovement, Criteria::AssetMovement(c)) => match_asset_movement(fields, c).await,
    (ServiceCategory::OrderMatcher, Criteria::OrderMatcher(c)) => match_order_matcher(fields, c).await,
    (ServiceCategory::Username, Criteria::Username(_)) => match_username(fields).await,
    (cat, _) => Err(Error::NotImplemented(format!("criteria do not match category {cat}"))),
  }
}

/// A provider is required to expose `operations`, regardless of category.
async fn require_operations(fields: &IndexMap<String, LazyValue>) -> Result<(), Error> {
  let ops = fields.get("operations").ok_or_else(|| Error::ProviderInvalid("missing operations".to_string()))?;
  ops.object().await.map_err(|e| Error::ProviderInvalid(format!("operations: {e}")))?;
  Ok(())
}

/// Force `fields[key]` to an array of canonicalized strings. `None` if
/// the provider omits the field entirely — distinct from an empty array,
/// since some categories (kyc) treat "omitted" as "matches anything"
/// while an explicit empty list still means "supports nothing".
async fn provider_string_list(
  fields: &IndexMap<String, LazyValue>,
  key: &str,
  canon: impl Fn(&str) -> Result<String, Error>,
) -> Result<Option<Vec<String>>, Error> {
  let Some(lazy) = fields.get(key) else {
    return Ok(None);
  };
  let items = lazy.array().await.map_err(|e| Error::ProviderInvalid(format!("{key}: {e}")))?;
  let mut out = Vec::with_capacity(items.len());
  for item in items {
    let raw = item.string().await.map_err(|e| Error::ProviderInvalid(format!("{key} entry: {e}")))?;
    out.push(canon(&raw).map_err(|e| Error::ProviderInvalid(format!("{key} entry: {e}")))?);
  }
  Ok(Some(out))
}

/// `true` iff every element of `required` appears in `have` (the
/// "all-in" rule shared by banking/kyc's currency/country/provider
/// criteria, spec §4.7).
fn all_in(required: &[String], have: &[String]) -> bool {
  required.iter().all(|r| have.contains(r))
}

async fn match_banking(fields: &IndexMap<String, LazyValue>, criteria: &BankingCriteria) -> Result<bool, Error> {
  require_operations(fields).await?;

  if !criteria.currency_codes.is_empty() {
    let have = provider_string_list(fields, "currencyCodes", canonicalize_currency).await?.unwrap_or_default();
    if !all_in(&criteria.currency_codes, &have) {
      return Ok(false);
    }
  }
  if !criteria.country_codes.is_empty() {
    let have = provider_string_list(fields, "countryCodes", canonicalize_country).await?.unwrap_or_default();
    if !all_in(&criteria.country_codes, &have) {
      return Ok(false);
    }
  }
  if !criteria.kyc_providers.is_empty() {
    let have = provider_string_list(fields, "kycProviders", canonicalize_token).await?.unwrap_or_default();
    if !all_in(&criteria.kyc_providers, &have) {
      return Ok(false);
    }
  }
  Ok(true)
}

async fn match_kyc(fields: &IndexMap<String, LazyValue>, criteria: &KycCriteria) -> Result<bool, Error> {
  require_operations(fields).await?;

  if criteria.country_codes.is_empty() {
    return Ok(true);
  }
  match provider_string_list(fields, "countryCodes", canonicalize_country).await? {
    None => Ok(true),
    Some(have) => Ok(all_in(&criteria.country_codes, &have)),
  }
}

async fn match_fx(fields: &IndexMap<String, LazyValue>, criteria: &FxCriteria) -> Result<bool, Error> {
  require_operations(fields).await?;

  let from_lazy = fields.get("from").ok_or_else(|| Error::ProviderInvalid("missing from list".to_string()))?;
  let entries = from_lazy.array().await.map_err(|e| Error::ProviderInvalid(format!("from: {e}")))?;

  for entry in entries {
    let entry_fields = entry.object().await.map_err(|e| Error::ProviderInvalid(format!("from entry: {e}")))?;
    let currency_codes =
      provider_string_list(&entry_fields, "currencyCodes", canonicalize_currency).await?.unwrap_or_default();
    if !currency_codes.contains(&criteria.input_currency_code) {
      continue;
    }
    let to_codes = provider_string_list(&entry_fields, "to", canonicalize_currency).await?.unwrap_or_default();
    if to_codes.contains(&criteria.output_currency_code) {
      return Ok(true);
    }
  }
  Ok(false)
}

async fn match_asset_movement(
  fields: &IndexMap<String, LazyValue>,
  criteria: &AssetMovementCriteria,
) -> Result<bool, Error> {
  let supported =
    fields.get("supportedAssets").ok_or_else(|| Error::ProviderInvalid("missing supportedAssets".to_string()))?;
  let groups = supported.array().await.map_err(|e| Error::ProviderInvalid(format!("supportedAssets: {e}")))?;

  for group in groups {
    let group_fields = group.object().await.map_err(|e| Error::ProviderInvalid(format!("supportedAssets entry: {e}")))?;
    let Some(paths_lazy) = group_fields.get("paths") else { continue };
    let paths = paths_lazy.array().await.map_err(|e| Error::ProviderInvalid(format!("paths: {e}")))?;
    for path in paths {
      let path_fields = path.object().await.map_err(|e| Error::ProviderInvalid(format!("path: {e}")))?;
      if path_matches(&path_fields, criteria).await? {
        return Ok(true);
      }
    }
  }
  Ok(false)
}

async fn path_matches(path_fields: &IndexMap<String, LazyValue>, criteria: &AssetMovementCriteria) -> Result<bool, Error> {
  let pair_lazy = path_fields.get("pair").ok_or_else(|| Error::ProviderInvalid("path missing pair".to_string()))?;
  let pair_items = pair_lazy.array().await.map_err(|e| Error::ProviderInvalid(format!("pair: {e}")))?;
  let mut pair = Vec::with_capacity(pair_items.len());
  for item in pair_items {
    pair.push(item.string().await.map_err(|e| Error::ProviderInvalid(format!("pair entry: {e}")))?);
  }

  let asset_ok = match &criteria.asset {
    AssetSelector::Single(token) => pair.contains(token),
    AssetSelector::Pair(base, quote) => pair.contains(base) && pair.contains(quote),
  };
  if !asset_ok {
    return Ok(false);
  }

  // from/to/rails in published metadata are already canonical strings,
  // so these compare literally rather than re-canonicalizing.
  let literal = |s: &str| Ok(s.to_string());

  if let Some(from) = &criteria.from {
    let locations = provider_string_list(path_fields, "from", literal).await?.unwrap_or_default();
    if !locations.contains(from) {
      return Ok(false);
    }
  }
  if let Some(to) = &criteria.to {
    let locations = provider_string_list(path_fields, "to", literal).await?.unwrap_or_default();
    if !locations.contains(to) {
      return Ok(false);
    }
  }
  if let Some(rail) = &criteria.rail {
    let rails = provider_string_list(path_fields, "rails", literal).await?.unwrap_or_default();
    if !rails.iter().any(|r| r == rail) {
      return Ok(false);
    }
  }
  Ok(true)
}

async fn match_order_matcher(
  fields: &IndexMap<String, LazyValue>,
  criteria: &OrderMatcherCriteria,
) -> Result<bool, Error> {
  let pairs_lazy = fields.get("pairs").ok_or_else(|| Error::ProviderInvalid("missing pairs".to_string()))?;
  let pairs = pairs_lazy.array().await.map_err(|e| Error::ProviderInvalid(format!("pairs: {e}")))?;

  for pair in pairs {
    let pair_fields = pair.object().await.map_err(|e| Error::ProviderInvalid(format!("pair entry: {e}")))?;
    let base = match pair_fields.get("base") {
      Some(v) => Some(v.string().await.map_err(|e| Error::ProviderInvalid(format!("base: {e}")))?),
      None => None,
    };
    let quote = match pair_fields.get("quote") {
      Some(v) => Some(v.string().await.map_err(|e| Error::ProviderInvalid(format!("quote: {e}")))?),
      None => None,
    };
    let base_ok = criteria.base.as_ref().is_none_or(|b| base.as_deref() == Some(b.as_str()));
    let quote_ok = criteria.quote.as_ref().is_none_or(|q| quote.as_deref() == Some(q.as_str()));
    if base_ok && quote_ok {
      return Ok(true);
    }
  }
  Ok(false)
}

async fn match_username(fields: &IndexMap<String, LazyValue>) -> Result<bool, Error> {
  let ops = fields.get("operations").ok_or_else(|| Error::ProviderInvalid("missing operations".to_string()))?;
  let ops_fields = ops.object().await.map_err(|e| Error::ProviderInvalid(format!("operations: {e}")))?;
  if !ops_fields.contains_key("resolve") {
    return Err(Error::ProviderInvalid("missing resolve operation".to_string()));
  }
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::Cache;
  use crate::client::MockChainClient;
  use crate::node::SharedCtx;
  use crate::stats::Stats;
  use crate::transport::UrlReader;
  use resolver_core::ResolverConfig;
  use serde_json::json;
  use std::collections::HashSet;
  use std::sync::Arc;
  use std::time::Duration;

  fn ctx() -> Arc<SharedCtx> {
    let config = ResolverConfig::default();
    Arc::new(SharedCtx {
      cache: Cache::new(),
      chain_client: Arc::new(MockChainClient::new()),
      reader: UrlReader::new(&config),
      stats: Arc::new(Stats::new()),
      positive_ttl: Duration::from_secs(60),
      negative_ttl: Duration::from_secs(5),
    })
  }

  async fn fields(raw: serde_json::Value) -> IndexMap<String, LazyValue> {
    let ctx = ctx();
    let seen = HashSet::new();
    LazyValue::from_json(raw, &ctx, &seen).object().await.unwrap()
  }

  #[tokio::test]
  async fn test_banking_matches_on_country_code() {
    let f = fields(json!({
      "countryCodes": ["MX"],
      "currencyCodes": ["MXN"],
      "operations": {"createAccount": "https://x.example/createAccount"}
    }))
    .await;
    let criteria = BankingCriteria::new(&[], &["mx"], &[]).unwrap();
    assert!(match_banking(&f, &criteria).await.unwrap());
  }

  #[tokio::test]
  async fn test_banking_rejects_when_currency_not_all_in() {
    let f = fields(json!({
      "countryCodes": ["US"],
      "currencyCodes": ["MXN"],
      "operations": {"createAccount": "https://x.example/createAccount"}
    }))
    .await;
    let criteria = BankingCriteria::new(&["mxn", "usd"], &["us"], &[]).unwrap();
    assert!(!match_banking(&f, &criteria).await.unwrap());
  }

  #[tokio::test]
  async fn test_banking_missing_operations_is_provider_invalid() {
    let f = fields(json!({"countryCodes": ["US"]})).await;
    let criteria = BankingCriteria::default();
    let err = match_banking(&f, &criteria).await.unwrap_err();
    assert!(matches!(err, Error::ProviderInvalid(_)));
  }

  #[tokio::test]
  async fn test_kyc_matches_when_country_codes_omitted() {
    let f = fields(json!({"operations": {"verify": "https://x.example/verify"}})).await;
    let criteria = KycCriteria::new(&["mx"]).unwrap();
    assert!(match_kyc(&f, &criteria).await.unwrap());
  }

  #[tokio::test]
  async fn test_kyc_rejects_when_country_not_listed() {
    let f = fields(json!({
      "operations": {"verify": "https://x.example/verify"},
      "countryCodes": ["US"]
    }))
    .await;
    let criteria = KycCriteria::new(&["mx"]).unwrap();
    assert!(!match_kyc(&f, &criteria).await.unwrap());
  }

  #[tokio::test]
  async fn test_fx_matches_direction() {
    let f = fields(json!({
      "operations": {"quote": "https://x.example/quote"},
      "from": [{"currencyCodes": ["USD"], "to": ["MXN", "EUR"]}]
    }))
    .await;
    let criteria = FxCriteria::new("usd", "mxn").unwrap();
    assert!(match_fx(&f, &criteria).await.unwrap());
  }

  #[tokio::test]
  async fn test_fx_rejects_unsupported_direction() {
    let f = fields(json!({
      "operations": {"quote": "https://x.example/quote"},
      "from": [{"currencyCodes": ["USD"], "to": ["MXN"]}]
    }))
    .await;
    let criteria = FxCriteria::new("usd", "eur").unwrap();
    assert!(!match_fx(&f, &criteria).await.unwrap());
  }

  #[tokio::test]
  async fn test_asset_movement_matches_pair_and_rail() {
    let f = fields(json!({
      "supportedAssets": [{
        "paths": [{
          "pair": ["$BTC", "$ETH"],
          "from": ["chain:keeta:1"],
          "to": ["bank-account:us"],
          "rails": ["ach", "wire"]
        }]
      }]
    }))
    .await;
    let criteria = AssetMovementCriteria::pair("$BTC", "$ETH")
      .unwrap()
      .with_from("chain:keeta:1")
      .unwrap()
      .with_to("bank-account:us")
      .unwrap()
      .with_rail("ach");
    assert!(match_asset_movement(&f, &criteria).await.unwrap());
  }

  #[tokio::test]
  async fn test_asset_movement_rejects_wrong_rail() {
    let f = fields(json!({
      "supportedAssets": [{
        "paths": [{"pair": ["$BTC"], "rails": ["wire"]}]
      }]
    }))
    .await;
    let criteria = AssetMovementCriteria::single("$BTC").unwrap().with_rail("ach");
    assert!(!match_asset_movement(&f, &criteria).await.unwrap());
  }

  #[tokio::test]
  async fn test_order_matcher_matches_base_and_quote() {
    let f = fields(json!({"pairs": [{"base": "keeta_btc", "quote": "keeta_usd"}]})).await;
    let criteria = OrderMatcherCriteria::new(Some("keeta_btc"), Some("keeta_usd")).unwrap();
    assert!(match_order_matcher(&f, &criteria).await.unwrap());
  }

  #[tokio::test]
  async fn test_order_matcher_empty_criteria_matches_any_pair() {
    let f = fields(json!({"pairs": [{"base": "a", "quote": "b"}]})).await;
    let criteria = OrderMatcherCriteria::default();
    assert!(match_order_matcher(&f, &criteria).await.unwrap());
  }

  #[tokio::test]
  async fn test_username_requires_resolve_operation() {
    let f = fields(json!({"operations": {"resolve": "https://x.example/resolve"}})).await;
    assert!(match_username(&f).await.unwrap());
  }

  #[tokio::test]
  async fn test_username_missing_resolve_is_provider_invalid() {
    let f = fields(json!({"operations": {"other": "x"}})).await;
    let err = match_username(&f).await.unwrap_err();
    assert!(matches!(err, Error::ProviderInvalid(_)));
  }

  #[tokio::test]
  async fn test_evaluate_rejects_mismatched_category_and_criteria() {
    let f = fields(json!({"operations": {}})).await;
    let criteria = Criteria::Username(UsernameCriteria);
    let err = evaluate(ServiceCategory::Banking, &f, &criteria).await.unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)));
  }
}
