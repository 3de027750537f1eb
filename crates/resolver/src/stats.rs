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

//! Resolver statistics (spec §4.6, §5, §8 P6).
//!
//! Every counter is monotonically increasing between `clear()` calls and
//! is updated at the value level with `Ordering::Relaxed` — there is no
//! cross-counter invariant that requires a stronger ordering, only that
//! each individual counter never observes a torn increment.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared, atomically-updated counters for one resolver instance.
#[derive(Debug, Default)]
pub struct Stats {
  reads: AtomicU64,
  cache_hit: AtomicU64,
  cache_miss: AtomicU64,
  keetanet_reads: AtomicU64,
  https_reads: AtomicU64,
  unsupported_reads: AtomicU64,
}

/// An immutable, deep-copied view of [`Stats`] at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
  pub reads: u64,
  pub cache_hit: u64,
  pub cache_miss: u64,
  pub keetanet_reads: u64,
  pub https_reads: u64,
  pub unsupported_reads: u64,
}

impl Stats {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record_read(&self) {
    self.reads.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_cache_hit(&self) {
    self.cache_hit.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_cache_miss(&self) {
    self.cache_miss.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_keetanet_read(&self) {
    self.keetanet_reads.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_https_read(&self) {
    self.https_reads.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_unsupported_read(&self) {
    self.unsupported_reads.fetch_add(1, Ordering::Relaxed);
  }

  pub fn snapshot(&self) -> StatsSnapshot {
    StatsSnapshot {
      reads: self.reads.load(Ordering::Relaxed),
      cache_hit: self.cache_hit.load(Ordering::Relaxed),
      cache_miss: self.cache_miss.load(Ordering::Relaxed),
      keetanet_reads: self.keetanet_reads.load(Ordering::Relaxed),
      https_reads: self.https_reads.load(Ordering::Relaxed),
      unsupported_reads: self.unsupported_reads.load(Ordering::Relaxed),
    }
  }

  pub fn reset(&self) {
    self.reads.store(0, Ordering::Relaxed);
    self.cache_hit.store(0, Ordering::Relaxed);
    self.cache_miss.store(0, Ordering::Relaxed);
    self.keetanet_reads.store(0, Ordering::Relaxed);
    self.https_reads.store(0, Ordering::Relaxed);
    self.unsupported_reads.store(0, Ordering::Relaxed);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_snapshot_starts_zero() {
    let stats = Stats::new();
    assert_eq!(stats.snapshot(), StatsSnapshot::default());
  }

  #[test]
  fn test_counters_increment_independently() {
    let stats = Stats::new();
    stats.record_read();
    stats.record_read();
    stats.record_cache_hit();
    stats.record_keetanet_read();
    let snap = stats.snapshot();
    assert_eq!(snap.reads, 2);
    assert_eq!(snap.cache_hit, 1);
    assert_eq!(snap.cache_miss, 0);
    assert_eq!(snap.keetanet_reads, 1);
  }

  #[test]
  fn test_reset_zeroes_every_counter() {
    let stats = Stats::new();
    stats.record_read();
    stats.record_cache_miss();
    stats.record_https_read();
    stats.reset();
    assert_eq!(stats.snapshot(), StatsSnapshot::default());
  }

  #[test]
  fn test_snapshot_is_a_deep_copy() {
    let stats = Stats::new();
    stats.record_read();
    let snap = stats.snapshot();
    stats.record_read();
    assert_eq!(snap.reads, 1, "snapshot must not observe later mutations");
  }
}
