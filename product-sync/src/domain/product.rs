//! Product records on either side of the taxonomy mapping.
//!
//! `RawProduct` is what the catalogue hands us, unvalidated and with every
//! field optional. `MappedProduct` is what the sales system consumes.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Identifier carried by catalogue records, kept as received.
///
/// The catalogue promises integers but nothing checks that, so other JSON
/// values are keyed too. Distinct JSON values stay distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductId {
    /// Integral id that fits in `i64`.
    Integer(i64),
    /// JSON string id.
    Text(String),
    /// Any other JSON value, held as its compact JSON text.
    Other(String),
}

impl ProductId {
    /// Classify a decoded JSON id. `null` is the absent id.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use product_sync::domain::ProductId;
    /// use serde_json::json;
    ///
    /// assert_eq!(ProductId::from_json(json!(7)), Some(ProductId::Integer(7)));
    /// assert_eq!(ProductId::from_json(json!(1.5)), Some(ProductId::Other("1.5".to_owned())));
    /// assert_eq!(ProductId::from_json(json!(null)), None);
    /// ```
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(Self::Text(text)),
            Value::Number(number) => Some(
                number
                    .as_i64()
                    .map_or_else(|| Self::Other(number.to_string()), Self::Integer),
            ),
            other => Some(Self::Other(other.to_string())),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Integer(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

/// Renders the id as a JSON object key.
impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(id) => write!(f, "{id}"),
            Self::Text(text) | Self::Other(text) => f.write_str(text),
        }
    }
}

/// Unvalidated product record as received from the catalogue API.
///
/// `id`, `title`, and `rating` hold whatever JSON the catalogue sent.
/// `category` and `brand` are `None` unless they arrived as strings, since
/// only strings can match the taxonomy tables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawProduct {
    /// Catalogue identifier.
    pub id: Option<ProductId>,
    /// Display title, any JSON value.
    pub title: Option<Value>,
    /// Catalogue category slug, e.g. `fragrances`.
    pub category: Option<String>,
    /// Catalogue brand name, e.g. `Chanel`.
    pub brand: Option<String>,
    /// Average customer rating, any JSON value.
    pub rating: Option<Value>,
}

impl RawProduct {
    /// Category used for taxonomy lookup; a missing category is the empty
    /// string.
    pub fn category_or_empty(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }

    /// Brand used for taxonomy lookup; a missing brand is the empty string.
    pub fn brand_or_empty(&self) -> &str {
        self.brand.as_deref().unwrap_or_default()
    }
}

/// Product record translated into the sales taxonomy.
///
/// `title` and `rating` are copied from the source record untouched, so
/// absence propagates and serialises as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedProduct {
    /// Title copied from the catalogue.
    pub title: Option<Value>,
    /// Sales category from the closed category table.
    pub category: &'static str,
    /// Sales brand from the closed brand table.
    pub brand: &'static str,
    /// Rating copied from the catalogue.
    pub rating: Option<Value>,
}

#[cfg(test)]
mod tests {
    //! Unit tests for raw product accessors and id classification.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn missing_lookup_fields_read_as_empty() {
        let product = RawProduct::default();
        assert_eq!(product.category_or_empty(), "");
        assert_eq!(product.brand_or_empty(), "");
    }

    #[rstest]
    fn present_lookup_fields_are_returned_verbatim() {
        let product = RawProduct {
            category: Some("Fragrances ".to_owned()),
            brand: Some("Dolce & Gabbana".to_owned()),
            ..RawProduct::default()
        };
        assert_eq!(product.category_or_empty(), "Fragrances ");
        assert_eq!(product.brand_or_empty(), "Dolce & Gabbana");
    }

    #[rstest]
    #[case::integer(json!(42), ProductId::Integer(42), "42")]
    #[case::negative(json!(-3), ProductId::Integer(-3), "-3")]
    #[case::text(json!("a1"), ProductId::Text("a1".to_owned()), "a1")]
    #[case::float(json!(1.0), ProductId::Other("1.0".to_owned()), "1.0")]
    #[case::beyond_i64(json!(u64::MAX), ProductId::Other(u64::MAX.to_string()), "18446744073709551615")]
    #[case::boolean(json!(true), ProductId::Other("true".to_owned()), "true")]
    #[case::list(json!([1, 2]), ProductId::Other("[1,2]".to_owned()), "[1,2]")]
    fn json_ids_keep_their_value(
        #[case] value: Value,
        #[case] expected: ProductId,
        #[case] key: &str,
    ) {
        let id = ProductId::from_json(value).expect("non-null id");
        assert_eq!(id, expected);
        assert_eq!(id.to_string(), key);
    }

    #[rstest]
    fn string_and_integer_ids_stay_distinct() {
        assert_ne!(ProductId::from(1), ProductId::from("1"));
    }
}
