use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use storefront_core::{AppConfig, CachePolicy, Product};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::fallback::{fallback_product_by_id, fallback_products};

/// Where a [`CatalogSnapshot`]'s products came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Fetched from the upstream API during this resolution.
    Live,
    /// Substituted from the embedded fallback dataset.
    Fallback,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// One complete catalog resolution.
///
/// A snapshot is entirely live or entirely fallback, never a merge of the
/// two, and it is never empty: when the upstream yields nothing usable the
/// whole fallback dataset takes its place.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub origin: DataOrigin,
    pub resolved_at: DateTime<Utc>,
    products: Arc<[Product]>,
}

impl CatalogSnapshot {
    fn live(products: Vec<Product>) -> Self {
        Self {
            origin: DataOrigin::Live,
            resolved_at: Utc::now(),
            products: products.into(),
        }
    }

    fn fallback() -> Self {
        Self {
            origin: DataOrigin::Fallback,
            resolved_at: Utc::now(),
            products: fallback_products().into(),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn product_by_id(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Catalog access with cache policy and fallback substitution.
///
/// The provider never surfaces upstream trouble to callers: transport
/// failures, bot-block pages, timeouts, and malformed bodies are logged and
/// absorbed by the embedded dataset. The only error that crosses this
/// boundary is [`CatalogError::NotFound`], for an id that exists nowhere.
///
/// Under [`CachePolicy::CacheIndefinitely`] the first resolution is pinned
/// for the life of the provider, whether it came back live or fallback.
/// Every later read answers from that pinned snapshot, so a product list and
/// a product detail page can never disagree about price or title within one
/// process. Concurrent first reads coalesce into a single upstream fetch.
pub struct CatalogProvider {
    client: CatalogClient,
    policy: CachePolicy,
    cache: OnceCell<CatalogSnapshot>,
}

impl CatalogProvider {
    #[must_use]
    pub fn new(client: CatalogClient, policy: CachePolicy) -> Self {
        Self {
            client,
            policy,
            cache: OnceCell::new(),
        }
    }

    /// Builds a provider from application config.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] or [`CatalogError::Http`] if
    /// the HTTP client cannot be constructed from the configured values.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let client = CatalogClient::new(
            &config.catalog_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(Self::new(client, config.cache_policy))
    }

    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the full catalog snapshot for this provider's policy.
    ///
    /// Infallible: when the upstream cannot produce a usable product list the
    /// snapshot carries the fallback dataset with [`DataOrigin::Fallback`].
    pub async fn snapshot(&self) -> CatalogSnapshot {
        match self.policy {
            CachePolicy::NoCache => self.resolve().await,
            CachePolicy::CacheIndefinitely => {
                self.cache.get_or_init(|| self.resolve()).await.clone()
            }
            CachePolicy::StaticOnly => {
                self.cache
                    .get_or_init(|| async { CatalogSnapshot::fallback() })
                    .await
                    .clone()
            }
        }
    }

    /// Returns every product visible under the current policy.
    pub async fn all_products(&self) -> Vec<Product> {
        self.snapshot().await.products().to_vec()
    }

    /// Looks up one product by id.
    ///
    /// Under [`CachePolicy::NoCache`] this asks the upstream for the single
    /// product; under the caching policies it answers from the pinned
    /// snapshot so detail reads always agree with list reads. Either way a
    /// miss falls through to a fallback dataset scan before giving up.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the id is absent from both the
    /// resolved catalog and the fallback dataset.
    pub async fn product_by_id(&self, id: u32) -> Result<Product, CatalogError> {
        match self.policy {
            CachePolicy::NoCache => match self.client.fetch_product(id).await {
                Ok(product) => Ok(product),
                Err(CatalogError::NotFound { .. }) => {
                    debug!(id, "upstream reports no such product, scanning fallback dataset");
                    fallback_product_by_id(id).ok_or(CatalogError::NotFound { id })
                }
                Err(error) => {
                    warn!(%error, id, "upstream product lookup failed, scanning fallback dataset");
                    fallback_product_by_id(id).ok_or(CatalogError::NotFound { id })
                }
            },
            CachePolicy::CacheIndefinitely | CachePolicy::StaticOnly => {
                let snapshot = self.snapshot().await;
                match snapshot.product_by_id(id) {
                    Some(product) => Ok(product.clone()),
                    None => fallback_product_by_id(id).ok_or(CatalogError::NotFound { id }),
                }
            }
        }
    }

    /// Returns the catalog's category labels.
    ///
    /// Under the caching policies labels are derived from the same snapshot
    /// that backs the product list, so they never name a category with no
    /// visible products. Under [`CachePolicy::NoCache`] the dedicated
    /// upstream endpoint is asked first, with fallback derivation on failure.
    pub async fn categories(&self) -> Vec<String> {
        match self.policy {
            CachePolicy::NoCache => match self.client.fetch_categories().await {
                Ok(categories) if !categories.is_empty() => categories,
                Ok(_) => {
                    warn!("upstream returned an empty category list, deriving from fallback");
                    distinct_categories(fallback_products())
                }
                Err(error) => {
                    warn!(%error, "upstream category fetch failed, deriving from fallback");
                    distinct_categories(fallback_products())
                }
            },
            CachePolicy::CacheIndefinitely | CachePolicy::StaticOnly => {
                distinct_categories(self.snapshot().await.products())
            }
        }
    }

    /// Returns the products in one category, matched case-insensitively.
    ///
    /// An unknown category yields an empty list; that is a legitimate answer,
    /// not a failure, so no fallback substitution happens for it.
    pub async fn products_by_category(&self, category: &str) -> Vec<Product> {
        match self.policy {
            CachePolicy::NoCache => match self.client.fetch_products_in_category(category).await {
                Ok(products) => products,
                Err(error) => {
                    warn!(%error, category, "upstream category query failed, filtering fallback");
                    filter_by_category(fallback_products(), category)
                }
            },
            CachePolicy::CacheIndefinitely | CachePolicy::StaticOnly => {
                filter_by_category(self.snapshot().await.products(), category)
            }
        }
    }

    /// One full catalog fetch, absorbing every failure into the fallback.
    async fn resolve(&self) -> CatalogSnapshot {
        match self.client.fetch_products().await {
            Ok(products) if !products.is_empty() => {
                debug!(count = products.len(), "resolved live catalog");
                CatalogSnapshot::live(products)
            }
            Ok(_) => {
                warn!(
                    policy = %self.policy,
                    "upstream returned an empty product list, substituting fallback dataset"
                );
                CatalogSnapshot::fallback()
            }
            Err(error) => {
                warn!(
                    %error,
                    policy = %self.policy,
                    "upstream catalog unavailable, substituting fallback dataset"
                );
                CatalogSnapshot::fallback()
            }
        }
    }
}

/// Distinct category labels in first-occurrence order, deduplicated
/// case-insensitively with the first-seen spelling kept.
fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    for product in products {
        if seen.insert(product.category.to_lowercase()) {
            categories.push(product.category.clone());
        }
    }
    categories
}

fn filter_by_category(products: &[Product], category: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.matches_category(category))
        .cloned()
        .collect()
}
