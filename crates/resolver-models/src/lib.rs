/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

//! # resolver-models
//!
//! The metadata graph's data shapes: the two-scheme URL grammar, the
//! external-reference edge tag, service categories, canonicalization of
//! search-criteria inputs, and the per-category criteria structs
//! themselves. Nothing in this crate performs IO — it is pure data plus
//! the pure functions that normalize and classify it.
//!
//! ## Usage
//!
//! ```
//! use resolver_models::metadata_url::MetadataUrl;
//!
//! let url = MetadataUrl::parse("keetanet://abc123/metadata").unwrap();
//! assert_eq!(url.to_string(), "keetanet://abc123/metadata");
//! ```

#![warn(clippy::all)]

pub mod canon;
pub mod category;
pub mod criteria;
pub mod external_ref;
pub mod metadata_url;

pub use category::ServiceCategory;
pub use external_ref::ExternalRef;
pub use metadata_url::MetadataUrl;

pub use criteria::{
  AssetMovementCriteria, AssetSelector, BankingCriteria, CanonicalLocation, FxCriteria, KycCriteria,
  OrderMatcherCriteria, UsernameCriteria,
};
