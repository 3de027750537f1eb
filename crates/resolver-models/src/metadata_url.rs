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

//! The two-scheme metadata URL grammar (spec §3, §6).

use resolver_core::Error;
use std::fmt;

/// `keetanet://<pubkey>/metadata` path literal; any other path is invalid.
pub const KEETANET_METADATA_PATH: &str = "/metadata";

/// A parsed metadata URL: either a chain-account address or an HTTPS URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetadataUrl {
  /// `keetanet://<pubkey>/metadata`
  Keetanet { public_key: String },
  /// An ordinary `https://...` URL.
  Https(url::Url),
}

impl MetadataUrl {
  /// Parse a raw URL string into the two-scheme grammar.
  ///
  /// Unknown schemes fail with [`Error::UnsupportedProtocol`]; a
  /// `keetanet:` URL whose path isn't exactly `/metadata` fails with
  /// [`Error::UnsupportedPath`].
  pub fn parse(raw: &str) -> Result<Self, Error> {
    let parsed = url::Url::parse(raw)
      .map_err(|e| Error::UnsupportedProtocol(format!("{raw}: {e}")))?;

    match parsed.scheme() {
      "keetanet" => {
        let path = parsed.path();
        if path != KEETANET_METADATA_PATH {
          return Err(Error::UnsupportedPath(path.to_string()));
        }
        let public_key = parsed.host_str().unwrap_or_default().to_string();
        Ok(MetadataUrl::Keetanet { public_key })
      }
      "https" => Ok(MetadataUrl::Https(parsed)),
      other => Err(Error::UnsupportedProtocol(other.to_string())),
    }
  }

  /// Build a `keetanet://<pubkey>/metadata` URL for an account.
  pub fn keetanet_metadata(public_key: &str) -> String {
    format!("keetanet://{public_key}{KEETANET_METADATA_PATH}")
  }
}

impl fmt::Display for MetadataUrl {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MetadataUrl::Keetanet { public_key } => {
        write!(f, "keetanet://{public_key}{KEETANET_METADATA_PATH}")
      }
      MetadataUrl::Https(url) => write!(f, "{url}"),
    }
  }
}
