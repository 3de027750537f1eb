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

//! External reference detection (spec §3): a JSON object is treated as
//! a graph edge, not ordinary data, only when it carries the exact
//! magic UUID tag.

use resolver_core::EXTERNAL_REF_TAG;
use serde_json::Value;

/// A detected external reference: `{ "external": "<tag>", "url": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRef {
  pub url: String,
}

impl ExternalRef {
  /// Inspect a JSON value and, if it is an external reference object,
  /// return its target URL. A plain object that happens to have a
  /// `url` field but not the magic `external` tag is NOT a reference.
  pub fn detect(value: &Value) -> Option<ExternalRef> {
    let obj = value.as_object()?;
    let tag = obj.get("external")?.as_str()?;
    if tag != EXTERNAL_REF_TAG {
      return None;
    }
    let url = obj.get("url")?.as_str()?;
    Some(ExternalRef { url: url.to_string() })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_detect_valid_reference() {
    let value = json!({ "external": EXTERNAL_REF_TAG, "url": "keetanet://x/metadata" });
    let detected = ExternalRef::detect(&value).unwrap();
    assert_eq!(detected.url, "keetanet://x/metadata");
  }

  #[test]
  fn test_detect_rejects_wrong_tag() {
    let value = json!({ "external": "not-the-magic-uuid", "url": "keetanet://x/metadata" });
    assert!(ExternalRef::detect(&value).is_none());
  }

  #[test]
  fn test_detect_rejects_plain_object_with_url_field() {
    let value = json!({ "url": "https://example.com", "other": 1 });
    assert!(ExternalRef::detect(&value).is_none());
  }

  #[test]
  fn test_detect_rejects_non_object() {
    assert!(ExternalRef::detect(&json!("a string")).is_none());
    assert!(ExternalRef::detect(&json!(42)).is_none());
    assert!(ExternalRef::detect(&json!([1, 2, 3])).is_none());
  }

  #[test]
  fn test_detect_rejects_missing_url() {
    let value = json!({ "external": EXTERNAL_REF_TAG });
    assert!(ExternalRef::detect(&value).is_none());
  }
}
