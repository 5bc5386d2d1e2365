use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use storefront_core::Product;

use crate::error::CatalogError;

/// Number of body characters retained in a [`ProbeReport`] preview.
const PROBE_PREVIEW_CHARS: usize = 200;

/// HTTP client for the upstream catalog API.
///
/// Maps not-found (404) and other non-2xx responses to typed errors and never
/// retries: callers that want resilience layer the fallback dataset on top via
/// [`crate::provider::CatalogProvider`] instead of hammering an upstream that
/// is known to block aggressively.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

/// Outcome of a connectivity probe against the upstream API.
///
/// A probe succeeds whenever a response comes back at all, including bot-block
/// pages and server errors; `ok` records whether the status was 2xx.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub ok: bool,
    pub status: u16,
    pub content_type: Option<String>,
    pub body_length: usize,
    /// First [`PROBE_PREVIEW_CHARS`] characters of the body, enough to tell a
    /// JSON payload from an HTML block page.
    pub body_preview: String,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with configured base URL, timeout, and `User-Agent`.
    ///
    /// The upstream rejects default library user agents, so the caller always
    /// supplies one explicitly. A trailing slash on `base_url` is optional.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidBaseUrl`] if `base_url` does not parse into an
    ///   absolute URL that can carry path segments.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed (e.g., invalid TLS config).
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalized).map_err(|e| CatalogError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry path segments".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Builds an endpoint URL by appending percent-encoded path segments to the
    /// base URL. Category names contain spaces and apostrophes, so segments are
    /// never spliced into the path by string formatting.
    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .expect("base URL validated as a base at construction");
            // pop_if_empty keeps the normalized trailing slash from producing
            // a double slash in the joined path.
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetches the full product list from `GET /products`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnexpectedStatus`] — any non-2xx status.
    /// - [`CatalogError::Http`] — network, TLS, or timeout failure.
    /// - [`CatalogError::Deserialize`] — body is not a JSON product array.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint_url(&["products"]);
        self.request_json(url, "product list").await
    }

    /// Fetches a single product from `GET /products/{id}`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] — upstream answered 404 for this id.
    /// - [`CatalogError::Deserialize`] — body did not contain a product
    ///   object. The upstream answers `200 OK` with a `null` body for ids it
    ///   does not know, so an unknown id usually surfaces here.
    /// - [`CatalogError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`CatalogError::Http`] — network, TLS, or timeout failure.
    pub async fn fetch_product(&self, id: u32) -> Result<Product, CatalogError> {
        let url = self.endpoint_url(&["products", &id.to_string()]);
        match self.request_json(url, &format!("product {id}")).await {
            Err(CatalogError::UnexpectedStatus { status: 404, .. }) => {
                Err(CatalogError::NotFound { id })
            }
            other => other,
        }
    }

    /// Fetches the category label list from `GET /products/categories`.
    ///
    /// # Errors
    ///
    /// Same classification as [`Self::fetch_products`].
    pub async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.endpoint_url(&["products", "categories"]);
        self.request_json(url, "category list").await
    }

    /// Fetches the products in one category from `GET /products/category/{name}`.
    ///
    /// The upstream answers an empty array (not a 404) for category names it
    /// does not know.
    ///
    /// # Errors
    ///
    /// Same classification as [`Self::fetch_products`].
    pub async fn fetch_products_in_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint_url(&["products", "category", category]);
        self.request_json(url, &format!("products in category '{category}'"))
            .await
    }

    /// Performs one diagnostic request against `GET /products/1` and reports
    /// what came back without classifying non-2xx statuses as errors.
    ///
    /// Useful for telling apart "upstream is down", "upstream is blocking this
    /// user agent", and "upstream is healthy" when the provider keeps serving
    /// fallback data.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] only when no response came back at all
    /// (connect failure, timeout, TLS error).
    pub async fn probe(&self) -> Result<ProbeReport, CatalogError> {
        let url = self.endpoint_url(&["products", "1"]);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        Ok(ProbeReport {
            ok: status.is_success(),
            status: status.as_u16(),
            content_type,
            body_length: body.len(),
            body_preview: body.chars().take(PROBE_PREVIEW_CHARS).collect(),
        })
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, CatalogError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}
