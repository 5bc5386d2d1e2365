use std::str::FromStr;

/// How the catalog provider balances live upstream data against the embedded
/// fallback dataset.
///
/// The policy is fixed for the lifetime of one provider so that every call
/// feeding the same rendered view (product list, product detail) resolves
/// against the same data source. Mixing policies across those calls is how a
/// list and a detail page end up showing different prices for one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Revalidate with the upstream on every call.
    NoCache,
    /// Resolve the catalog once and reuse that result for the process
    /// lifetime, whether the resolution came from the upstream or from the
    /// fallback dataset.
    CacheIndefinitely,
    /// Never contact the upstream; serve the embedded dataset only.
    StaticOnly,
}

impl std::fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CachePolicy::NoCache => write!(f, "no-cache"),
            CachePolicy::CacheIndefinitely => write!(f, "cache-indefinitely"),
            CachePolicy::StaticOnly => write!(f, "static-only"),
        }
    }
}

impl FromStr for CachePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no-cache" => Ok(CachePolicy::NoCache),
            "cache-indefinitely" => Ok(CachePolicy::CacheIndefinitely),
            "static-only" => Ok(CachePolicy::StaticOnly),
            other => Err(format!(
                "unknown cache policy '{other}'; expected no-cache, cache-indefinitely, or static-only"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the upstream catalog API.
    pub catalog_base_url: String,
    /// Bounded per-request timeout for upstream calls.
    pub request_timeout_secs: u64,
    /// `User-Agent` sent on upstream calls. Deployments stuck behind the
    /// upstream's bot protection can override this with a browser-like
    /// string.
    pub user_agent: String,
    /// Default cache policy for catalog resolution.
    pub cache_policy: CachePolicy,
    pub log_level: String,
}
