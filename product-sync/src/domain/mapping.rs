//! Build the id-keyed product mapping consumed by the sales system.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::product::{MappedProduct, ProductId, RawProduct};
use super::taxonomy::{map_brand, map_category};

/// Mapped products keyed by catalogue id.
///
/// ## Invariants
/// - One entry per distinct id seen in the input, including the absent id.
/// - When ids repeat, the entry reflects the last record carrying that id.
///
/// Serialises as a JSON object keyed by each id's display form, with
/// `"null"` for the absent id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductMapping {
    entries: BTreeMap<Option<ProductId>, MappedProduct>,
}

impl ProductMapping {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry for `id`; pass `None` for the absent id.
    pub fn get(&self, id: Option<ProductId>) -> Option<&MappedProduct> {
        self.entries.get(&id)
    }

    /// Iterate entries in id order: absent id first, then integers, strings,
    /// and other values.
    pub fn iter(&self) -> btree_map::Iter<'_, Option<ProductId>, MappedProduct> {
        self.entries.iter()
    }

    fn insert(&mut self, id: Option<ProductId>, product: MappedProduct) {
        self.entries.insert(id, product);
    }
}

impl<'a> IntoIterator for &'a ProductMapping {
    type Item = (&'a Option<ProductId>, &'a MappedProduct);
    type IntoIter = btree_map::Iter<'a, Option<ProductId>, MappedProduct>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ProductMapping {
    type Item = (Option<ProductId>, MappedProduct);
    type IntoIter = btree_map::IntoIter<Option<ProductId>, MappedProduct>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for ProductMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, product) in &self.entries {
            match id {
                Some(id) => map.serialize_entry(&id.to_string(), product)?,
                None => map.serialize_entry("null", product)?,
            }
        }
        map.end()
    }
}

/// Translate one raw record into the sales taxonomy.
pub fn map_product(product: &RawProduct) -> MappedProduct {
    MappedProduct {
        title: product.title.clone(),
        category: map_category(product.category_or_empty()),
        brand: map_brand(product.brand_or_empty()),
        rating: product.rating.clone(),
    }
}

/// Map every record, in input order, into an id-keyed [`ProductMapping`].
///
/// Never fails: partial records produce fallback taxonomy values and absent
/// passthrough fields. A later record silently replaces an earlier one with
/// the same id.
///
/// # Examples
///
/// ```rust
/// use product_sync::domain::{ProductId, RawProduct, create_product_mapping};
/// use serde_json::json;
///
/// let mapping = create_product_mapping(vec![RawProduct {
///     id: Some(ProductId::Integer(1)),
///     title: Some(json!("iPhone")),
///     category: Some("fragrances".to_owned()),
///     brand: Some("Chanel".to_owned()),
///     rating: Some(json!(4.6)),
/// }]);
///
/// let entry = mapping.get(Some(ProductId::Integer(1))).expect("entry for id 1");
/// assert_eq!(entry.category, "mobile-accessories");
/// assert_eq!(entry.brand, "Apple");
/// ```
pub fn create_product_mapping<I>(api_products: I) -> ProductMapping
where
    I: IntoIterator<Item = RawProduct>,
{
    let mut mapping = ProductMapping::default();
    for product in api_products {
        let mapped = map_product(&product);
        mapping.insert(product.id, mapped);
    }
    mapping
}
