//! Domain records, taxonomy mapping, and the product sync service.
//!
//! Public surface:
//! - `RawProduct`, `MappedProduct`, `ProductId`: records either side of the
//!   mapping.
//! - `ProductMapping` and `create_product_mapping`: the id-keyed output.
//! - `ProductSyncService`: fetch-then-map orchestration over the
//!   `ports::ProductCatalogueSource` port.
//! - `taxonomy`: the closed category and brand tables.

pub mod mapping;
pub mod ports;
pub mod product;
pub mod product_sync;
pub mod taxonomy;

pub use self::mapping::{ProductMapping, create_product_mapping, map_product};
pub use self::product::{MappedProduct, ProductId, RawProduct};
pub use self::product_sync::ProductSyncService;
