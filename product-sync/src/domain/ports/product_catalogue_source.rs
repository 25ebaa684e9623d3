//! Driven port for reading product records from the external catalogue.
//!
//! The domain owns the request and response shapes so the sync service stays
//! independent of the HTTP adapter.

use async_trait::async_trait;
use uuid::Uuid;

use super::define_port_error;
use crate::domain::RawProduct;

/// Domain-owned fetch request passed to the catalogue adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductCatalogueRequest {
    /// Identifier for trace correlation.
    pub request_id: Uuid,
}

impl ProductCatalogueRequest {
    /// Build a request with a fresh correlation id.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
        }
    }
}

impl Default for ProductCatalogueRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Records returned by one catalogue call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductCatalogueResponse {
    /// Raw records, in catalogue order.
    pub products: Vec<RawProduct>,
    /// Response body size in bytes.
    pub transfer_bytes: u64,
}

define_port_error! {
    /// Errors surfaced while calling the product catalogue.
    pub enum ProductCatalogueSourceError {
        /// Network transport failed before a complete response arrived.
        Transport { message: String } =>
            "product catalogue transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "product catalogue timeout: {message}",
        /// The catalogue answered with a status other than 200.
        UnexpectedStatus { status: u16, message: String } =>
            "product catalogue returned status {status}: {message}",
        /// The response body was not a product envelope.
        Decode { message: String } =>
            "product catalogue response decode failed: {message}",
        /// The adapter rejected the request before sending it.
        InvalidRequest { message: String } =>
            "product catalogue request invalid: {message}",
    }
}

/// Port for fetching one bounded page of products from the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogueSource: Send + Sync {
    /// Fetch products for one request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use product_sync::domain::ports::{
    ///     FixtureProductCatalogueSource, ProductCatalogueRequest, ProductCatalogueSource,
    ///     ProductCatalogueSourceError,
    /// };
    ///
    /// # async fn demo() -> Result<(), ProductCatalogueSourceError> {
    /// let source = FixtureProductCatalogueSource;
    /// let response = source.fetch_products(&ProductCatalogueRequest::new()).await?;
    /// assert!(response.products.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    async fn fetch_products(
        &self,
        request: &ProductCatalogueRequest,
    ) -> Result<ProductCatalogueResponse, ProductCatalogueSourceError>;
}

/// Fixture implementation returning an empty catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureProductCatalogueSource;

#[async_trait]
impl ProductCatalogueSource for FixtureProductCatalogueSource {
    async fn fetch_products(
        &self,
        _request: &ProductCatalogueRequest,
    ) -> Result<ProductCatalogueResponse, ProductCatalogueSourceError> {
        Ok(ProductCatalogueResponse::default())
    }
}
