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

//! # resolver-core
//!
//! Error handling, configuration, and crate-wide constants for the
//! metadata resolver.
//!
//! - [`Error`] and [`Result`] — unified error handling, one variant per
//!   row of the resolver's error taxonomy.
//! - [`Kind`] — the set of coercions a lazy value can be forced to.
//! - [`ResolverConfig`] — cache TTLs, HTTPS size cap, request timeout.
//!
//! ## Example
//!
//! ```
//! use resolver_core::ResolverConfig;
//!
//! let config = ResolverConfig::default();
//! assert_eq!(config.positive_ttl.as_secs(), 60);
//! ```

pub mod config;
pub mod error;

pub use config::ResolverConfig;
pub use error::{Error, Kind, Result};

/// Magic UUID tag identifying an external-reference slot (spec §3).
///
/// Distinguishes `{ "external": "<tag>", "url": "..." }` from an
/// ordinary JSON object that happens to have a `url` field.
pub const EXTERNAL_REF_TAG: &str = "2b828e33-2692-46e9-817e-9b93d63f28fd";

/// Default TTL for a successfully read URL, in milliseconds.
pub const DEFAULT_POSITIVE_TTL_MS: u64 = 60_000;

/// Default TTL for a failed read, in milliseconds.
pub const DEFAULT_NEGATIVE_TTL_MS: u64 = 5_000;

/// Default cap on an HTTPS response body, in bytes (spec §9 open question).
pub const DEFAULT_MAX_RESPONSE_BYTES: u64 = 1_048_576;

/// Default per-request timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// The only metadata document version this resolver understands.
pub const SUPPORTED_METADATA_VERSION: i64 = 1;
