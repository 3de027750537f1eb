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

use thiserror::Error;

/// The kinds a lazy value can be coerced to (`value(kind)` in the spec).
///
/// `Any` is only ever requested by a caller, never produced as an
/// "actual" kind in a [`Error::WrongKind`] — the actual kind is always
/// one of the other six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
  Any,
  Object,
  Array,
  Primitive,
  String,
  Number,
  Boolean,
}

impl std::fmt::Display for Kind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Kind::Any => "any",
      Kind::Object => "object",
      Kind::Array => "array",
      Kind::Primitive => "primitive",
      Kind::String => "string",
      Kind::Number => "number",
      Kind::Boolean => "boolean",
    };
    write!(f, "{s}")
  }
}

/// Errors surfaced by the metadata resolver.
///
/// Every variant holds owned, cloneable data on purpose: a failed read
/// is cached as a [`Error`] and replayed verbatim to every reader that
/// hits the same URL within the negative TTL window (invariant 4 — a
/// cache write must be atomic with respect to read visibility), which
/// means the cached error has to be cheap to clone out of the cache.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Unsupported path for keetanet URL: {0}")]
  UnsupportedPath(String),

  #[error("Unsupported protocol scheme: {0}")]
  UnsupportedProtocol(String),

  #[error("Invalid public key: {0}")]
  InvalidPublicKey(String),

  #[error("Transport error ({status:?}): {message}")]
  Transport { status: Option<u16>, message: String },

  #[error("Unsupported metadata version: {0}")]
  UnsupportedVersion(i64),

  #[error("Root metadata has no services object")]
  MissingServices,

  #[error("Expected {expected} value, found {actual}")]
  WrongKind { expected: Kind, actual: Kind },

  #[error("Provider descriptor invalid: {0}")]
  ProviderInvalid(String),

  #[error("Category not implemented: {0}")]
  NotImplemented(String),

  #[error("Invalid internal access token")]
  InvalidAccessToken,

  #[error("JSON error: {0}")]
  Json(String),

  #[error("Canonicalization error: {0}")]
  Canonicalization(String),
}

impl From<serde_json::Error> for Error {
  fn from(e: serde_json::Error) -> Self {
    Error::Json(e.to_string())
  }
}

pub type Result<T> = std::result::Result<T, Error>;
