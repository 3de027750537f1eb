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

//! Lazy Value Protocol (spec §4.5 C5).
//!
//! A [`LazyValue`] is either a plain JSON sub-tree reached by a field
//! already in hand (`Inline`), or an external-reference edge that has
//! not been followed yet (`Deferred`). Forcing an `Inline` value never
//! performs I/O; forcing a `Deferred` one suspends on a network read.
//! Forcing one key of an object never forces its siblings — the
//! `IndexMap`/`Vec` returned by [`Forced::Object`]/[`Forced::Array`]
//! holds more `LazyValue`s, not already-forced data.

use crate::node::{MetadataNode, SharedCtx};
use indexmap::IndexMap;
use resolver_core::{Error, Kind};
use resolver_models::ExternalRef;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// The result of forcing a [`LazyValue`] (or a [`MetadataNode`]) to a
/// requested [`Kind`].
#[derive(Debug, Clone)]
pub enum Forced {
  Object(IndexMap<String, LazyValue>),
  Array(Vec<LazyValue>),
  Scalar(Value),
}

impl Forced {
  pub fn into_object(self) -> Result<IndexMap<String, LazyValue>, Error> {
    match self {
      Forced::Object(m) => Ok(m),
      other => Err(Error::WrongKind { expected: Kind::Object, actual: other.actual_kind() }),
    }
  }

  pub fn into_array(self) -> Result<Vec<LazyValue>, Error> {
    match self {
      Forced::Array(a) => Ok(a),
      other => Err(Error::WrongKind { expected: Kind::Array, actual: other.actual_kind() }),
    }
  }

  pub fn into_scalar(self) -> Result<Value, Error> {
    match self {
      Forced::Scalar(v) => Ok(v),
      other => Err(Error::WrongKind { expected: Kind::Primitive, actual: other.actual_kind() }),
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Forced::Scalar(Value::String(s)) => Some(s.as_str()),
      _ => None,
    }
  }

  fn actual_kind(&self) -> Kind {
    match self {
      Forced::Object(_) => Kind::Object,
      Forced::Array(_) => Kind::Array,
      Forced::Scalar(v) => scalar_kind(v),
    }
  }
}

fn scalar_kind(v: &Value) -> Kind {
  match v {
    Value::String(_) => Kind::String,
    Value::Number(_) => Kind::Number,
    Value::Bool(_) => Kind::Boolean,
    Value::Null => Kind::Primitive,
    Value::Object(_) => Kind::Object,
    Value::Array(_) => Kind::Array,
  }
}

fn actual_kind_of(v: &Value) -> Kind {
  match v {
    Value::Object(_) => Kind::Object,
    Value::Array(_) => Kind::Array,
    other => scalar_kind(other),
  }
}

/// Assert that `v`'s runtime JSON type matches `kind`, per the coercion
/// rules in spec §4.4 ("Kind assertion").
fn assert_kind(v: &Value, kind: Kind) -> Result<(), Error> {
  let ok = match kind {
    Kind::Any => true,
    Kind::Object => v.is_object(),
    Kind::Array => v.is_array(),
    Kind::Primitive => !v.is_object() && !v.is_array(),
    Kind::String => v.is_string(),
    Kind::Number => v.is_number(),
    Kind::Boolean => v.is_boolean(),
  };
  if ok {
    Ok(())
  } else {
    Err(Error::WrongKind { expected: kind, actual: actual_kind_of(v) })
  }
}

/// One lazily-evaluated node of the metadata graph's value tree.
#[derive(Debug, Clone)]
pub enum LazyValue {
  /// Raw JSON already in hand; forcing it only classifies/recurses, no I/O.
  Inline { raw: Value, ctx: Arc<SharedCtx>, seen: HashSet<String> },
  /// An external reference edge not yet followed.
  Deferred(MetadataNode),
}

impl LazyValue {
  pub(crate) fn from_json(raw: Value, ctx: &Arc<SharedCtx>, seen: &HashSet<String>) -> Self {
    if let Some(ext) = ExternalRef::detect(&raw) {
      LazyValue::Deferred(MetadataNode::child(ext.url, ctx.clone(), seen.clone()))
    } else {
      LazyValue::Inline { raw, ctx: ctx.clone(), seen: seen.clone() }
    }
  }

  /// Force this value to `kind`. Suspends on I/O only for `Deferred`.
  pub async fn value(&self, kind: Kind) -> Result<Forced, Error> {
    match self {
      LazyValue::Inline { raw, ctx, seen } => valuize(raw.clone(), kind, ctx, seen),
      LazyValue::Deferred(node) => node.value(kind).await,
    }
  }

  pub async fn object(&self) -> Result<IndexMap<String, LazyValue>, Error> {
    self.value(Kind::Object).await?.into_object()
  }

  pub async fn array(&self) -> Result<Vec<LazyValue>, Error> {
    self.value(Kind::Array).await?.into_array()
  }

  pub async fn string(&self) -> Result<String, Error> {
    let scalar = self.value(Kind::String).await?.into_scalar()?;
    Ok(scalar.as_str().unwrap_or_default().to_string())
  }

  pub async fn number(&self) -> Result<f64, Error> {
    let scalar = self.value(Kind::Number).await?.into_scalar()?;
    Ok(scalar.as_f64().unwrap_or_default())
  }

  pub async fn boolean(&self) -> Result<bool, Error> {
    let scalar = self.value(Kind::Boolean).await?.into_scalar()?;
    Ok(scalar.as_bool().unwrap_or_default())
  }

  /// Force to `any` and return the raw scalar/array/object as plain JSON
  /// (recursively re-forcing children) — used by callers that just want
  /// to materialize a whole sub-tree, e.g. debug logging.
  pub async fn materialize(&self) -> Result<Value, Error> {
    match self.value(Kind::Any).await? {
      Forced::Scalar(v) => Ok(v),
      Forced::Object(map) => {
        let mut out = serde_json::Map::new();
        for (k, v) in map {
          out.insert(k, Box::pin(v.materialize()).await?);
        }
        Ok(Value::Object(out))
      }
      Forced::Array(items) => {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
          out.push(Box::pin(item.materialize()).await?);
        }
        Ok(Value::Array(out))
      }
    }
  }
}

/// Build a [`Forced`] view of `raw`, asserting `kind` and wrapping any
/// child that is an external reference as a [`LazyValue::Deferred`].
pub(crate) fn valuize(raw: Value, kind: Kind, ctx: &Arc<SharedCtx>, seen: &HashSet<String>) -> Result<Forced, Error> {
  assert_kind(&raw, kind)?;
  match raw {
    Value::Object(map) => {
      let mut out = IndexMap::with_capacity(map.len());
      for (k, v) in map {
        out.insert(k, LazyValue::from_json(v, ctx, seen));
      }
      Ok(Forced::Object(out))
    }
    Value::Array(arr) => Ok(Forced::Array(arr.into_iter().map(|v| LazyValue::from_json(v, ctx, seen)).collect())),
    scalar => Ok(Forced::Scalar(scalar)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::Cache;
  use crate::client::MockChainClient;
  use crate::stats::Stats;
  use crate::transport::UrlReader;
  use resolver_core::ResolverConfig;
  use serde_json::json;
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

  #[tokio::test]
  async fn test_inline_object_forces_without_forcing_siblings() {
    let ctx = ctx();
    let seen = HashSet::new();
    let lazy = LazyValue::from_json(json!({"a": 1, "b": {"c": 2}}), &ctx, &seen);
    let obj = lazy.object().await.unwrap();
    assert_eq!(obj.len(), 2);
    // Forcing "a" must not require forcing "b".
    let a = obj.get("a").unwrap().number().await.unwrap();
    assert_eq!(a, 1.0);
  }

  #[tokio::test]
  async fn test_inline_array() {
    let ctx = ctx();
    let seen = HashSet::new();
    let lazy = LazyValue::from_json(json!([1, "x", true]), &ctx, &seen);
    let arr = lazy.array().await.unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0].number().await.unwrap(), 1.0);
    assert_eq!(arr[1].string().await.unwrap(), "x");
    assert!(arr[2].boolean().await.unwrap());
  }

  #[tokio::test]
  async fn test_wrong_kind_is_typed_error() {
    let ctx = ctx();
    let seen = HashSet::new();
    let lazy = LazyValue::from_json(json!("a string"), &ctx, &seen);
    let err = lazy.object().await.unwrap_err();
    assert!(matches!(err, Error::WrongKind { expected: Kind::Object, actual: Kind::String }));
  }

  #[tokio::test]
  async fn test_external_reference_child_is_deferred() {
    let ctx = ctx();
    let seen = HashSet::new();
    let lazy = LazyValue::from_json(
      json!({ "external": resolver_core::EXTERNAL_REF_TAG, "url": "keetanet://b/metadata" }),
      &ctx,
      &seen,
    );
    assert!(matches!(lazy, LazyValue::Deferred(_)));
  }

  #[tokio::test]
  async fn test_materialize_recurses() {
    let ctx = ctx();
    let seen = HashSet::new();
    let lazy = LazyValue::from_json(json!({"a": [1, 2], "b": "x"}), &ctx, &seen);
    let materialized = lazy.materialize().await.unwrap();
    assert_eq!(materialized, json!({"a": [1, 2], "b": "x"}));
  }
}
