use thiserror::Error;

/// Errors produced while fetching catalog data from the upstream API.
///
/// Callers going through [`crate::provider::CatalogProvider`] only ever see
/// [`CatalogError::NotFound`]; every other variant is absorbed by the fallback
/// dataset substitution and logged instead of surfaced.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure: connect error, timeout, TLS, etc.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a status outside the 2xx range.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body was not the JSON shape we expected. The upstream is
    /// known to answer `200 OK` with a literal `null` body for unknown product
    /// ids, which lands here rather than in `UnexpectedStatus`.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL could not be parsed into a usable endpoint.
    #[error("invalid catalog base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The product id exists neither upstream nor in the fallback dataset.
    #[error("product {id} not found in the live catalog or the fallback dataset")]
    NotFound { id: u32 },
}
