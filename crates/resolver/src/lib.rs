#![warn(clippy::all)]

//! # resolver
//!
//! A lazy, caching, cycle-safe evaluator of the KeetaNetwork metadata
//! graph (spec §2): accounts publish Base64-encoded JSON describing
//! which services they offer, clients discover capable providers by
//! walking that graph on demand.
//!
//! - [`client::ChainClientAdapter`] (C2) — the narrow interface through
//!   which a `keetanet:` URL's account metadata is fetched; bind your
//!   own chain SDK to it.
//! - [`transport::UrlReader`] (C1) — fetches one raw document from one
//!   URL, chain or HTTPS, knowing nothing about graph structure.
//! - [`cache::Cache`] (C3) — the per-resolver URL → outcome cache.
//! - [`node::MetadataNode`] (C4) and [`value::LazyValue`] (C5) — the
//!   lazy, cycle-safe traversal of the metadata graph.
//! - [`evaluator::Criteria`] (C7) — per-category search criteria.
//! - [`facade::Resolver`] (C6) — the public API: construct with a root
//!   account and a chain client, then [`facade::Resolver::lookup`].
//!
//! ## Example
//!
//! ```
//! use resolver::client::MockChainClient;
//! use resolver::evaluator::Criteria;
//! use resolver::facade::Resolver;
//! use resolver_models::BankingCriteria;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = MockChainClient::new().with_metadata(
//!   "acct",
//!   r#"{"version":1,"services":{"banking":{"p":{
//!     "countryCodes":["MX"],"operations":{"createAccount":"https://x.example/a"}
//!   }}}}"#,
//! );
//! let resolver = Resolver::new("acct", Arc::new(client));
//! let criteria = Criteria::Banking(BankingCriteria::new(&[], &["MX"], &[]).unwrap());
//! let matches = resolver.lookup(&criteria).await.unwrap();
//! assert!(matches.is_some());
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod evaluator;
pub mod facade;
pub mod node;
pub mod stats;
pub mod transport;
pub mod value;

pub use client::ChainClientAdapter;
pub use evaluator::Criteria;
pub use facade::{AccessToken, ProviderMatch, Resolver, ResolverStats};
pub use resolver_core::{Error, Kind, Result};
pub use resolver_models::*;
pub use stats::StatsSnapshot;
pub use value::{Forced, LazyValue};
