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

//! Per-category search criteria (spec §4.7).
//!
//! Every list-valued field is canonicalized at construction time and
//! treated as vacuously-matching when empty. Asset and location fields
//! go through [`crate::canon`] the same way.

use crate::canon::{canonicalize_country, canonicalize_currency, canonicalize_location, canonicalize_token};
use resolver_core::Error;

/// A single asset-movement endpoint: either a bank-account rail or a
/// chain location, already canonicalized.
pub type CanonicalLocation = String;

/// `services.banking` search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankingCriteria {
  pub currency_codes: Vec<String>,
  pub country_codes: Vec<String>,
  pub kyc_providers: Vec<String>,
}

impl BankingCriteria {
  pub fn new(currency_codes: &[&str], country_codes: &[&str], kyc_providers: &[&str]) -> Result<Self, Error> {
    Ok(Self {
      currency_codes: currency_codes.iter().map(|c| canonicalize_currency(c)).collect::<Result<_, _>>()?,
      country_codes: country_codes.iter().map(|c| canonicalize_country(c)).collect::<Result<_, _>>()?,
      kyc_providers: kyc_providers.iter().map(|p| canonicalize_token(p)).collect::<Result<_, _>>()?,
    })
  }
}

/// `services.kyc` search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KycCriteria {
  pub country_codes: Vec<String>,
}

impl KycCriteria {
  pub fn new(country_codes: &[&str]) -> Result<Self, Error> {
    Ok(Self {
      country_codes: country_codes.iter().map(|c| canonicalize_country(c)).collect::<Result<_, _>>()?,
    })
  }
}

/// `services.fx` search criteria. Both currencies are required — an FX
/// lookup without a direction is meaningless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FxCriteria {
  pub input_currency_code: String,
  pub output_currency_code: String,
}

impl FxCriteria {
  pub fn new(input_currency_code: &str, output_currency_code: &str) -> Result<Self, Error> {
    Ok(Self {
      input_currency_code: canonicalize_currency(input_currency_code)?,
      output_currency_code: canonicalize_currency(output_currency_code)?,
    })
  }
}

/// An asset-movement search target: a single asset, or an asset pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSelector {
  Single(String),
  Pair(String, String),
}

/// `services.assetMovement` search criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMovementCriteria {
  pub asset: AssetSelector,
  pub from: Option<CanonicalLocation>,
  pub to: Option<CanonicalLocation>,
  pub rail: Option<String>,
}

impl AssetMovementCriteria {
  pub fn single(asset_token: &str) -> Result<Self, Error> {
    Ok(Self {
      asset: AssetSelector::Single(canonicalize_token(asset_token)?),
      from: None,
      to: None,
      rail: None,
    })
  }

  pub fn pair(base_token: &str, quote_token: &str) -> Result<Self, Error> {
    Ok(Self {
      asset: AssetSelector::Pair(canonicalize_token(base_token)?, canonicalize_token(quote_token)?),
      from: None,
      to: None,
      rail: None,
    })
  }

  pub fn with_from(mut self, location: &str) -> Result<Self, Error> {
    self.from = Some(canonicalize_location(location)?);
    Ok(self)
  }

  pub fn with_to(mut self, location: &str) -> Result<Self, Error> {
    self.to = Some(canonicalize_location(location)?);
    Ok(self)
  }

  pub fn with_rail(mut self, rail: &str) -> Self {
    self.rail = Some(rail.to_string());
    self
  }
}

/// `services.orderMatcher` search criteria. Both fields are optional —
/// an empty criteria matches every pairs provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderMatcherCriteria {
  pub base: Option<String>,
  pub quote: Option<String>,
}

impl OrderMatcherCriteria {
  pub fn new(base: Option<&str>, quote: Option<&str>) -> Result<Self, Error> {
    Ok(Self {
      base: base.map(canonicalize_token).transpose()?,
      quote: quote.map(canonicalize_token).transpose()?,
    })
  }
}

/// `services.username` search criteria. No category-specific fields —
/// a `resolve` operation is the only requirement (spec §4.7).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsernameCriteria;
