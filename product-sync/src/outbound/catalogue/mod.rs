//! Product catalogue outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `ProductCatalogueSource` port.

mod dto;
mod http_source;

pub use http_source::{
    CatalogueHttpOptions, CatalogueHttpSource, DEFAULT_CATALOGUE_ENDPOINT, DEFAULT_PRODUCT_LIMIT,
    DEFAULT_USER_AGENT,
};
