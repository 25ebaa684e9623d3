//! Closed lookup tables translating catalogue categories and brands into the
//! sales taxonomy.
//!
//! The catalogue carries beauty and fashion products while the sales system
//! only knows electronics, so both tables fold the catalogue vocabulary onto
//! electronics-flavoured values. Lookups are exact and case-sensitive.

/// Sales category used when the catalogue category is not in the table.
pub const DEFAULT_CATEGORY: &str = "electronics";

/// Sales brand used when the catalogue brand is not in the table.
pub const DEFAULT_BRAND: &str = "Generic";

/// Catalogue category to sales category.
pub const CATEGORY_TABLE: [(&str, &str); 3] = [
    ("fragrances", "mobile-accessories"),
    ("beauty", "electronics"),
    ("skincare", "electronics"),
];

/// Catalogue brand to sales brand.
pub const BRAND_TABLE: [(&str, &str); 5] = [
    ("Chanel", "Apple"),
    ("Gucci", "Asus"),
    ("Dior", "Seagate"),
    ("Dolce & Gabbana", "TechGear"),
    ("Calvin Klein", "Logitech"),
];

/// Translate a catalogue category, falling back to [`DEFAULT_CATEGORY`].
///
/// # Examples
///
/// ```rust
/// use product_sync::domain::taxonomy::map_category;
///
/// assert_eq!(map_category("fragrances"), "mobile-accessories");
/// assert_eq!(map_category("groceries"), "electronics");
/// ```
pub fn map_category(raw: &str) -> &'static str {
    lookup(&CATEGORY_TABLE, raw).unwrap_or(DEFAULT_CATEGORY)
}

/// Translate a catalogue brand, falling back to [`DEFAULT_BRAND`].
///
/// # Examples
///
/// ```rust
/// use product_sync::domain::taxonomy::map_brand;
///
/// assert_eq!(map_brand("Gucci"), "Asus");
/// assert_eq!(map_brand("gucci"), "Generic");
/// ```
pub fn map_brand(raw: &str) -> &'static str {
    lookup(&BRAND_TABLE, raw).unwrap_or(DEFAULT_BRAND)
}

fn lookup(table: &[(&'static str, &'static str)], raw: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(source, _)| *source == raw)
        .map(|(_, target)| *target)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the taxonomy tables.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::fragrances("fragrances", "mobile-accessories")]
    #[case::beauty("beauty", "electronics")]
    #[case::skincare("skincare", "electronics")]
    #[case::unknown("groceries", "electronics")]
    #[case::empty("", "electronics")]
    #[case::case_sensitive("Fragrances", "electronics")]
    fn maps_categories(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(map_category(raw), expected);
    }

    #[rstest]
    #[case::chanel("Chanel", "Apple")]
    #[case::gucci("Gucci", "Asus")]
    #[case::dior("Dior", "Seagate")]
    #[case::dolce("Dolce & Gabbana", "TechGear")]
    #[case::calvin_klein("Calvin Klein", "Logitech")]
    #[case::unknown("Essence", "Generic")]
    #[case::empty("", "Generic")]
    #[case::untrimmed(" Dior", "Generic")]
    fn maps_brands(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(map_brand(raw), expected);
    }

    #[rstest]
    fn table_sources_are_unique() {
        let mut categories = CATEGORY_TABLE.map(|(source, _)| source);
        categories.sort_unstable();
        assert!(categories.windows(2).all(|pair| pair[0] != pair[1]));

        let mut brands = BRAND_TABLE.map(|(source, _)| source);
        brands.sort_unstable();
        assert!(brands.windows(2).all(|pair| pair[0] != pair[1]));
    }
}
