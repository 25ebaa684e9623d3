//! DTOs for decoding catalogue JSON responses.
//!
//! Records are decoded leniently. `id`, `title`, and `rating` keep any JSON
//! value; `category` and `brand` become `None` unless they are strings. A
//! missing or `null` field is `None`. Only an envelope that is not an object,
//! or a `products` entry that is not an object, is a decode error.

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;

use crate::domain::{ProductId, RawProduct};

#[derive(Debug, serde::Deserialize)]
pub(super) struct ProductsEnvelopeDto {
    #[serde(default)]
    products: Option<Vec<ProductDto>>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ProductDto {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    category: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    brand: Option<String>,
    #[serde(default)]
    rating: Option<Value>,
}

impl ProductsEnvelopeDto {
    pub(super) fn into_domain_products(self) -> Vec<RawProduct> {
        self.products
            .unwrap_or_default()
            .into_iter()
            .map(ProductDto::into_domain_product)
            .collect()
    }
}

impl ProductDto {
    fn into_domain_product(self) -> RawProduct {
        RawProduct {
            id: self.id.and_then(ProductId::from_json),
            title: self.title,
            category: self.category,
            brand: self.brand,
            rating: self.rating,
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
