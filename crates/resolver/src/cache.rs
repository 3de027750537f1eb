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

//! The per-resolver URL cache (spec §3 Cache Entry, §4.3 C3).
//!
//! A concurrent mapping from a URL string to an immutable success/failure
//! entry with its own expiry. This is pure cache — it does not coordinate
//! "one fetch per key" (spec §4.3): concurrent misses on the same key may
//! each perform a fetch and race to insert, and the contract is only
//! "at-most-one cached outcome per TTL window, eventually".

use dashmap::DashMap;
use resolver_core::Error;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// The outcome of one URL read, as remembered by the cache.
#[derive(Debug, Clone)]
enum Outcome {
  Success(Value),
  Failure(Error),
}

#[derive(Debug, Clone)]
struct Entry {
  outcome: Outcome,
  expires_at: Instant,
}

impl Entry {
  fn is_expired(&self, now: Instant) -> bool {
    now > self.expires_at
  }
}

/// What a cache lookup returns to the caller.
#[derive(Debug, Clone)]
pub enum CacheLookup {
  /// A live (unexpired) success entry.
  Hit(Value),
  /// A live (unexpired) failure entry.
  HitFailure(Error),
  /// No entry, or the entry present was expired and has been evicted.
  Miss,
}

/// Concurrent URL → outcome cache, shared by every [`crate::node::MetadataNode`]
/// spawned from the same resolver instance (spec §3 invariant 1, §5).
#[derive(Debug, Default)]
pub struct Cache {
  entries: DashMap<String, Entry>,
}

impl Cache {
  pub fn new() -> Self {
    Self { entries: DashMap::new() }
  }

  /// Look up `key`. An expired entry is evicted as part of the lookup —
  /// callers must treat `now > expires_at` as absent regardless of
  /// whether an implementation evicts eagerly (spec §4.3).
  pub fn get(&self, key: &str) -> CacheLookup {
    let now = Instant::now();
    let found = {
      let entry = self.entries.get(key);
      entry.map(|e| (e.is_expired(now), e.outcome.clone()))
    };
    match found {
      Some((false, Outcome::Success(v))) => {
        trace!(url = key, "cache hit");
        CacheLookup::Hit(v)
      }
      Some((false, Outcome::Failure(e))) => {
        trace!(url = key, "cache hit (cached failure)");
        CacheLookup::HitFailure(e)
      }
      Some((true, _)) => {
        self.entries.remove(key);
        debug!(url = key, "cache entry expired, evicting");
        CacheLookup::Miss
      }
      None => CacheLookup::Miss,
    }
  }

  /// Install a successful outcome with the given TTL.
  pub fn put_success(&self, key: impl Into<String>, payload: Value, ttl: Duration) {
    let key = key.into();
    debug!(url = %key, ?ttl, "caching successful read");
    self.entries.insert(key, Entry { outcome: Outcome::Success(payload), expires_at: Instant::now() + ttl });
  }

  /// Install a failed outcome with the given TTL.
  pub fn put_failure(&self, key: impl Into<String>, err: Error, ttl: Duration) {
    let key = key.into();
    warn!(url = %key, ?ttl, error = %err, "caching failed read");
    self.entries.insert(key, Entry { outcome: Outcome::Failure(err), expires_at: Instant::now() + ttl });
  }

  /// Remove a single entry.
  pub fn delete(&self, key: &str) {
    self.entries.remove(key);
  }

  /// Empty the cache entirely.
  pub fn clear(&self) {
    self.entries.clear();
  }

  /// Current number of entries, expired or not (diagnostic only).
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
