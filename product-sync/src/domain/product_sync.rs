//! Product sync service composing the catalogue fetch and the taxonomy
//! mapping.
//!
//! `fetch_all_products` and `sync` never fail: every catalogue error degrades
//! to an empty result plus a diagnostic. Callers that must tell "no
//! products" apart from "fetch failed" use the `try_` variants instead.

use std::sync::Arc;

use tracing::{Instrument, info, info_span, warn};

use crate::domain::ports::{
    ProductCatalogueRequest, ProductCatalogueSource, ProductCatalogueSourceError,
};
use crate::domain::{ProductMapping, RawProduct, create_product_mapping};

/// Stateless service fetching catalogue products and mapping them for the
/// sales system.
#[derive(Clone)]
pub struct ProductSyncService<S> {
    source: Arc<S>,
}

impl<S> ProductSyncService<S> {
    /// Create a service reading from `source`.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

impl<S> ProductSyncService<S>
where
    S: ProductCatalogueSource,
{
    /// Fetch every product the catalogue returns for one bounded request.
    ///
    /// # Errors
    ///
    /// Returns the adapter's [`ProductCatalogueSourceError`] unchanged.
    pub async fn try_fetch_all_products(
        &self,
    ) -> Result<Vec<RawProduct>, ProductCatalogueSourceError> {
        let request = ProductCatalogueRequest::new();
        let span = info_span!("product_fetch", request_id = %request.request_id);
        async {
            let response = self.source.fetch_products(&request).await?;
            info!(
                product_count = response.products.len(),
                transfer_bytes = response.transfer_bytes,
                "Successfully fetched products from API"
            );
            Ok::<_, ProductCatalogueSourceError>(response.products)
        }
        .instrument(span)
        .await
    }

    /// Fetch every product, degrading any failure to an empty list.
    pub async fn fetch_all_products(&self) -> Vec<RawProduct> {
        match self.try_fetch_all_products().await {
            Ok(products) => products,
            Err(error) => {
                report_fetch_failure(&error);
                Vec::new()
            }
        }
    }

    /// Fetch and map in one step.
    ///
    /// # Errors
    ///
    /// Returns the adapter's [`ProductCatalogueSourceError`] unchanged.
    pub async fn try_sync(&self) -> Result<ProductMapping, ProductCatalogueSourceError> {
        self.try_fetch_all_products()
            .await
            .map(create_product_mapping)
    }

    /// Fetch and map in one step; an unreachable catalogue yields an empty
    /// mapping.
    pub async fn sync(&self) -> ProductMapping {
        create_product_mapping(self.fetch_all_products().await)
    }
}

fn report_fetch_failure(error: &ProductCatalogueSourceError) {
    match error {
        ProductCatalogueSourceError::UnexpectedStatus { status, message } => {
            warn!(status, body = %message, "Failed to fetch products from API");
        }
        other => warn!(error = %other, "API Error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the product sync service.

    use super::*;
    use crate::domain::ProductId;
    use crate::domain::ports::{MockProductCatalogueSource, ProductCatalogueResponse};
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn iphone() -> RawProduct {
        RawProduct {
            id: Some(ProductId::Integer(1)),
            title: Some(json!("iPhone")),
            category: Some("fragrances".to_owned()),
            brand: Some("Chanel".to_owned()),
            rating: Some(json!(4.6)),
        }
    }

    fn service_returning(
        result: Result<ProductCatalogueResponse, ProductCatalogueSourceError>,
    ) -> ProductSyncService<MockProductCatalogueSource> {
        let mut source = MockProductCatalogueSource::new();
        source
            .expect_fetch_products()
            .times(1)
            .return_once(move |_| result);
        ProductSyncService::new(Arc::new(source))
    }

    #[fixture]
    fn successful_service() -> ProductSyncService<MockProductCatalogueSource> {
        service_returning(Ok(ProductCatalogueResponse {
            products: vec![iphone()],
            transfer_bytes: 96,
        }))
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_returns_catalogue_records_verbatim(
        successful_service: ProductSyncService<MockProductCatalogueSource>,
    ) {
        let products = successful_service.fetch_all_products().await;
        assert_eq!(products, vec![iphone()]);
    }

    #[rstest]
    #[case::status(ProductCatalogueSourceError::unexpected_status(404_u16, "missing"))]
    #[case::transport(ProductCatalogueSourceError::transport("connection refused"))]
    #[case::timeout(ProductCatalogueSourceError::timeout("deadline elapsed"))]
    #[case::decode(ProductCatalogueSourceError::decode("expected value"))]
    #[case::invalid(ProductCatalogueSourceError::invalid_request("bad endpoint"))]
    #[tokio::test]
    async fn fetch_failures_degrade_to_empty(#[case] error: ProductCatalogueSourceError) {
        let service = service_returning(Err(error));
        assert!(service.fetch_all_products().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn try_fetch_surfaces_the_failure() {
        let service = service_returning(Err(ProductCatalogueSourceError::transport("reset")));
        let error = service
            .try_fetch_all_products()
            .await
            .expect_err("transport error should surface");
        assert!(matches!(
            error,
            ProductCatalogueSourceError::Transport { .. }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn try_fetch_distinguishes_empty_catalogue_from_failure() {
        let service = service_returning(Ok(ProductCatalogueResponse::default()));
        let products = service
            .try_fetch_all_products()
            .await
            .expect("empty catalogue is a success");
        assert!(products.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn sync_maps_fetched_products(
        successful_service: ProductSyncService<MockProductCatalogueSource>,
    ) {
        let mapping = successful_service.sync().await;
        assert_eq!(mapping.len(), 1);
        let entry = mapping
            .get(Some(ProductId::Integer(1)))
            .expect("entry for id 1");
        assert_eq!(entry.title, Some(json!("iPhone")));
        assert_eq!(entry.category, "mobile-accessories");
        assert_eq!(entry.brand, "Apple");
        assert_eq!(entry.rating, Some(json!(4.6)));
    }

    #[rstest]
    #[tokio::test]
    async fn sync_after_failure_is_empty() {
        let service = service_returning(Err(ProductCatalogueSourceError::unexpected_status(
            500_u16, "",
        )));
        assert!(service.sync().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn try_sync_propagates_failure() {
        let service = service_returning(Err(ProductCatalogueSourceError::decode("not json")));
        let result = service.try_sync().await;
        assert!(matches!(
            result,
            Err(ProductCatalogueSourceError::Decode { .. })
        ));
    }
}
