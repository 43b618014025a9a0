//! Catalog source client.
//!
//! Fetches the product list from the configured catalog API as plain JSON
//! over `reqwest`, and caches the parsed response in `moka` so a page load
//! does not hit the upstream on every request. The cache is check-then-fetch:
//! concurrent misses may fetch in parallel, and the last insert wins, which
//! is harmless for an immutable product list.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};

use copper_fern_core::Product;

/// Cache key for the full product list. There is a single catalog, so a
/// single key; the TTL does the invalidation.
const PRODUCTS_CACHE_KEY: &str = "products:all";

/// Maximum number of cached catalog responses.
const CACHE_CAPACITY: u64 = 16;

/// Errors that can occur when talking to the catalog source.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog source returned a non-success status.
    #[error("catalog source returned HTTP {0}")]
    Status(u16),

    /// Response body did not parse as a product list.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the catalog API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// `base_url` is the catalog API root; products are fetched from
    /// `{base_url}/products`. `cache_ttl` bounds how stale a served list
    /// can be.
    #[must_use]
    pub fn new(base_url: &str, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_owned(),
                cache,
            }),
        }
    }

    /// Fetch the full product list, serving from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, a non-2xx upstream
    /// status, or a malformed body. Errors are never cached.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(products) = self.inner.cache.get(PRODUCTS_CACHE_KEY).await {
            debug!(count = products.len(), "catalog cache hit");
            return Ok(products);
        }

        let products = Arc::new(self.fetch_products().await?);
        self.inner
            .cache
            .insert(PRODUCTS_CACHE_KEY.to_owned(), Arc::clone(&products))
            .await;

        debug!(count = products.len(), "catalog fetched and cached");
        Ok(products)
    }

    /// Fetch the product list from the upstream, bypassing the cache.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/products", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, url = %url, "catalog source returned non-success status");
            return Err(CatalogError::Status(status.as_u16()));
        }

        // Read the body as text first so a parse failure can be diagnosed
        // separately from a transport failure.
        let body = response.text().await?;
        let products: Vec<Product> = serde_json::from_str(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse catalog response"
            );
        })?;

        Ok(products)
    }
}
