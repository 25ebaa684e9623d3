//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod product_catalogue_source;

#[cfg(test)]
pub use product_catalogue_source::MockProductCatalogueSource;
pub use product_catalogue_source::{
    FixtureProductCatalogueSource, ProductCatalogueRequest, ProductCatalogueResponse,
    ProductCatalogueSource, ProductCatalogueSourceError,
};
