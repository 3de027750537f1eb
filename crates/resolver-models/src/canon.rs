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

//! Canonicalization of search-criteria inputs (spec §4.7, §9).
//!
//! Matching is always exact on the canonical form — no fuzzy matching,
//! per the design notes. Every function here is idempotent:
//! `canonicalize(canonicalize(x)) == canonicalize(x)` (property P8).

use resolver_core::Error;

/// A representative subset of active ISO 4217 alpha-3 currency codes.
/// Not exhaustive by design — enough to validate well-formed input
/// without pretending to be a currency registry.
const ISO_4217_CODES: &[&str] = &[
  "USD", "EUR", "GBP", "JPY", "CHF", "CAD", "AUD", "NZD", "CNY", "HKD", "SGD", "MXN", "BRL", "INR",
  "KRW", "ZAR", "SEK", "NOK", "DKK", "PLN", "TRY", "RUB", "AED", "SAR", "ILS", "THB", "IDR", "MYR",
  "PHP", "VND", "ARS", "CLP", "COP", "PEN", "EGP", "NGN", "KES", "GHS", "PKR", "BDT", "CZK", "HUF",
  "RON", "UAH", "TWD", "QAR", "KWD", "BHD", "OMR", "JOD", "LKR", "MAD", "DZD", "TND", "XOF", "XAF",
];

/// A representative subset of ISO 3166-1 alpha-2 country codes.
const ISO_3166_1_ALPHA2_CODES: &[&str] = &[
  "US", "GB", "DE", "FR", "IT", "ES", "CH", "CA", "AU", "NZ", "CN", "HK", "SG", "MX", "BR", "IN",
  "KR", "ZA", "SE", "NO", "DK", "PL", "TR", "RU", "AE", "SA", "IL", "TH", "ID", "MY", "PH", "VN",
  "AR", "CL", "CO", "PE", "EG", "NG", "KE", "GH", "PK", "BD", "CZ", "HU", "RO", "UA", "TW", "QA",
  "KW", "BH", "OM", "JO", "LK", "MA", "DZ", "TN", "JP", "NL", "BE", "AT", "PT", "IE", "IS",
];

/// Valid bank-account location kinds (spec §4.7 canonicalization).
const BANK_ACCOUNT_KINDS: &[&str] = &["us", "iban-swift", "clabe", "pix"];

/// Valid chain identifiers for asset/location canonicalization.
const CHAIN_KINDS: &[&str] = &["keeta", "evm"];

/// Canonicalize a currency input to its ISO 4217 alpha code, or pass a
/// `$`-prefixed tokenized currency through unchanged (it's an opaque
/// identifier matched only by literal equality, per spec §6).
pub fn canonicalize_currency(input: &str) -> Result<String, Error> {
  let trimmed = input.trim();
  if let Some(rest) = trimmed.strip_prefix('$') {
    if rest.is_empty() {
      return Err(Error::Canonicalization("empty tokenized currency".to_string()));
    }
    return Ok(trimmed.to_string());
  }

  let upper = trimmed.to_ascii_uppercase();
  if upper.len() == 3 && ISO_4217_CODES.contains(&upper.as_str()) {
    Ok(upper)
  } else {
    Err(Error::Canonicalization(format!("unknown currency code: {input}")))
  }
}

/// Canonicalize a country input to its ISO 3166-1 alpha-2 code.
pub fn canonicalize_country(input: &str) -> Result<String, Error> {
  let upper = input.trim().to_ascii_uppercase();
  if upper.len() == 2 && ISO_3166_1_ALPHA2_CODES.contains(&upper.as_str()) {
    Ok(upper)
  } else {
    Err(Error::Canonicalization(format!("unknown country code: {input}")))
  }
}

/// Canonicalize a token input to its public-key string. Public keys are
/// case-sensitive, so unlike currency/country codes this does not
/// upper-case — it only trims and rejects the empty string.
pub fn canonicalize_token(input: &str) -> Result<String, Error> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(Error::Canonicalization("empty token public key".to_string()));
  }
  Ok(trimmed.to_string())
}

/// Canonicalize an asset-location input to `chain:<kind>:<u64-id>` or
/// `bank-account:<kind>`. Rejects `u64` overflow explicitly rather than
/// silently truncating (spec §9 open question).
pub fn canonicalize_location(input: &str) -> Result<String, Error> {
  let trimmed = input.trim();
  let parts: Vec<&str> = trimmed.split(':').collect();

  match parts.as_slice() {
    ["chain", kind, id] => {
      if !CHAIN_KINDS.contains(kind) {
        return Err(Error::Canonicalization(format!("unknown chain kind: {kind}")));
      }
      let parsed: u64 = id
        .parse()
        .map_err(|_| Error::Canonicalization(format!("chain id does not fit u64: {id}")))?;
      Ok(format!("chain:{kind}:{parsed}"))
    }
    ["bank-account", kind] => {
      if !BANK_ACCOUNT_KINDS.contains(kind) {
        return Err(Error::Canonicalization(format!("unknown bank-account kind: {kind}")));
      }
      Ok(format!("bank-account:{kind}"))
    }
    _ => Err(Error::Canonicalization(format!("malformed asset location: {input}"))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_canonicalize_currency_plain() {
    assert_eq!(canonicalize_currency("usd").unwrap(), "USD");
    assert_eq!(canonicalize_currency("MXN").unwrap(), "MXN");
  }

  #[test]
  fn test_canonicalize_currency_tokenized() {
    assert_eq!(canonicalize_currency("$BTC").unwrap(), "$BTC");
  }

  #[test]
  fn test_canonicalize_currency_unknown() {
    assert!(canonicalize_currency("ZZZ").is_err());
  }

  #[test]
  fn test_canonicalize_currency_idempotent() {
    let once = canonicalize_currency("usd").unwrap();
    let twice = canonicalize_currency(&once).unwrap();
    assert_eq!(once, twice);
  }

  #[test]
  fn test_canonicalize_country() {
    assert_eq!(canonicalize_country("mx").unwrap(), "MX");
    assert!(canonicalize_country("ZZ").is_err());
  }

  #[test]
  fn test_canonicalize_country_idempotent() {
    let once = canonicalize_country("us").unwrap();
    let twice = canonicalize_country(&once).unwrap();
    assert_eq!(once, twice);
  }

  #[test]
  fn test_canonicalize_token() {
    assert_eq!(canonicalize_token("  keeta_abc123  ").unwrap(), "keeta_abc123");
    assert!(canonicalize_token("").is_err());
  }

  #[test]
  fn test_canonicalize_location_chain() {
    assert_eq!(canonicalize_location("chain:keeta:42").unwrap(), "chain:keeta:42");
    assert_eq!(canonicalize_location("chain:evm:18446744073709551615").unwrap(), "chain:evm:18446744073709551615");
  }

  #[test]
  fn test_canonicalize_location_chain_overflow() {
    assert!(canonicalize_location("chain:keeta:99999999999999999999999").is_err());
  }

  #[test]
  fn test_canonicalize_location_bank_account() {
    assert_eq!(canonicalize_location("bank-account:iban-swift").unwrap(), "bank-account:iban-swift");
    assert!(canonicalize_location("bank-account:unknown").is_err());
  }

  #[test]
  fn test_canonicalize_location_malformed() {
    assert!(canonicalize_location("not-a-location").is_err());
  }

  #[test]
  fn test_canonicalize_location_idempotent() {
    let once = canonicalize_location("chain:keeta:42").unwrap();
    let twice = canonicalize_location(&once).unwrap();
    assert_eq!(once, twice);
  }
}
