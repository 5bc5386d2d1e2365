//! Catalog data access: a thin HTTP client for the upstream product API plus
//! a provider that layers cache policy and fallback substitution on top of it.

pub mod client;
pub mod error;
pub mod fallback;
pub mod provider;

pub use client::{CatalogClient, ProbeReport};
pub use error::CatalogError;
pub use fallback::{fallback_product_by_id, fallback_products};
pub use provider::{CatalogProvider, CatalogSnapshot, DataOrigin};
