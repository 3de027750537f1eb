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

//! Service categories under `services.<category>` (spec §6).

use resolver_core::Error;
use std::fmt;
use std::str::FromStr;

/// The service categories a root metadata document may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
  Banking,
  Kyc,
  Fx,
  AssetMovement,
  OrderMatcher,
  Username,
}

impl ServiceCategory {
  /// The JSON key this category is addressed under (`services.<key>`).
  pub fn json_key(self) -> &'static str {
    match self {
      ServiceCategory::Banking => "banking",
      ServiceCategory::Kyc => "kyc",
      ServiceCategory::Fx => "fx",
      ServiceCategory::AssetMovement => "assetMovement",
      ServiceCategory::OrderMatcher => "orderMatcher",
      ServiceCategory::Username => "username",
    }
  }
}

impl fmt::Display for ServiceCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.json_key())
  }
}

impl FromStr for ServiceCategory {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "banking" => Ok(ServiceCategory::Banking),
      "kyc" => Ok(ServiceCategory::Kyc),
      "fx" => Ok(ServiceCategory::Fx),
      "assetMovement" => Ok(ServiceCategory::AssetMovement),
      "orderMatcher" => Ok(ServiceCategory::OrderMatcher),
      "username" => Ok(ServiceCategory::Username),
      other => Err(Error::NotImplemented(other.to_string())),
    }
  }
}
