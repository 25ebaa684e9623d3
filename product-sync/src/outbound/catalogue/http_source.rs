//! Reqwest-backed product catalogue adapter.
//!
//! This adapter owns transport details only: query construction, optional
//! timeout, HTTP status mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::ProductsEnvelopeDto;
use crate::domain::RawProduct;
use crate::domain::ports::{
    ProductCatalogueRequest, ProductCatalogueResponse, ProductCatalogueSource,
    ProductCatalogueSourceError,
};

/// Catalogue endpoint used when none is configured.
pub const DEFAULT_CATALOGUE_ENDPOINT: &str = "https://dummyjson.com/products";
/// Number of products requested in the single bounded call.
pub const DEFAULT_PRODUCT_LIMIT: u32 = 100;
/// User-agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "product-sync/0.1";
const LIMIT_QUERY_KEY: &str = "limit";

/// Request shaping options for catalogue calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueHttpOptions {
    /// Value sent as the `limit` query parameter. Zero is rejected when
    /// fetching.
    pub limit: u32,
    /// Whole-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// HTTP user-agent sent to the catalogue.
    pub user_agent: String,
}

impl Default for CatalogueHttpOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PRODUCT_LIMIT,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Catalogue source adapter performing one HTTP GET against one endpoint.
pub struct CatalogueHttpSource {
    client: Client,
    endpoint: Url,
    limit: u32,
}

impl CatalogueHttpSource {
    /// Build an adapter with default options: `limit=100` and no timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        Self::with_options(endpoint, CatalogueHttpOptions::default())
    }

    /// Build an adapter with explicit request options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    ///
    /// use product_sync::outbound::catalogue::{CatalogueHttpOptions, CatalogueHttpSource};
    /// use reqwest::Url;
    ///
    /// let endpoint = Url::parse("https://dummyjson.com/products").expect("endpoint parses");
    /// let options = CatalogueHttpOptions {
    ///     limit: 20,
    ///     timeout: Some(Duration::from_secs(10)),
    ///     ..CatalogueHttpOptions::default()
    /// };
    /// let source = CatalogueHttpSource::with_options(endpoint, options);
    /// assert!(source.is_ok());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_options(
        endpoint: Url,
        options: CatalogueHttpOptions,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(options.user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            endpoint,
            limit: options.limit,
        })
    }
}

#[async_trait]
impl ProductCatalogueSource for CatalogueHttpSource {
    async fn fetch_products(
        &self,
        _request: &ProductCatalogueRequest,
    ) -> Result<ProductCatalogueResponse, ProductCatalogueSourceError> {
        let url = build_products_url(&self.endpoint, self.limit)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status != StatusCode::OK {
            return Err(map_status_error(status, body.as_ref()));
        }

        let transfer_bytes = body.len() as u64;
        let products = parse_products(body.as_ref())?;
        Ok(ProductCatalogueResponse {
            products,
            transfer_bytes,
        })
    }
}

fn build_products_url(endpoint: &Url, limit: u32) -> Result<Url, ProductCatalogueSourceError> {
    if limit == 0 {
        return Err(ProductCatalogueSourceError::invalid_request(
            "product limit must be at least 1",
        ));
    }
    if !matches!(endpoint.scheme(), "http" | "https") || endpoint.cannot_be_a_base() {
        return Err(ProductCatalogueSourceError::invalid_request(format!(
            "endpoint must be an http(s) URL, got {endpoint}"
        )));
    }

    let retained: Vec<(String, String)> = endpoint
        .query_pairs()
        .filter(|(key, _)| key != LIMIT_QUERY_KEY)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(LIMIT_QUERY_KEY, &limit.to_string());
    Ok(url)
}

fn parse_products(body: &[u8]) -> Result<Vec<RawProduct>, ProductCatalogueSourceError> {
    let decoded: ProductsEnvelopeDto = serde_json::from_slice(body).map_err(|error| {
        ProductCatalogueSourceError::decode(format!("invalid catalogue JSON payload: {error}"))
    })?;
    Ok(decoded.into_domain_products())
}

fn map_transport_error(error: reqwest::Error) -> ProductCatalogueSourceError {
    if error.is_timeout() {
        ProductCatalogueSourceError::timeout(error.to_string())
    } else {
        ProductCatalogueSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ProductCatalogueSourceError {
    ProductCatalogueSourceError::unexpected_status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
