// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Product filters applied to a product set after the cache read.

use crate::model::Product;

/// Optional, conjunctive product filters.
///
/// `brand`, `category` and `product_type` are case-insensitive exact
/// matches. Empty strings disable a filter. Price bounds are inclusive and
/// never exclude a product whose price cannot be parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub brand: Option<String>,
    pub category: Option<String>,
    pub product_type: Option<String>,
    /// Case-insensitive substring of name, brand or description.
    pub search: Option<String>,
    /// Every tag must be present on the product.
    pub tags: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn price_between(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        active(&self.brand).is_none()
            && active(&self.category).is_none()
            && active(&self.product_type).is_none()
            && active(&self.search).is_none()
            && self.tags.iter().all(|t| t.is_empty())
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if !equals_ignore_case(&self.brand, &product.brand)
            || !equals_ignore_case(&self.category, &product.category)
            || !equals_ignore_case(&self.product_type, &product.product_type)
        {
            return false;
        }

        if let Some(query) = active(&self.search) {
            let query = query.to_lowercase();
            let hit = [&product.name, &product.brand, &product.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        if !self
            .tags
            .iter()
            .filter(|t| !t.is_empty())
            .all(|t| product.has_tag(t))
        {
            return false;
        }

        if let Some(price) = product.price_value() {
            if self.min_price.is_some_and(|min| price < min) {
                return false;
            }
            if self.max_price.is_some_and(|max| price > max) {
                return false;
            }
        }
        true
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn equals_ignore_case(wanted: &Option<String>, actual: &str) -> bool {
    active(wanted).is_none_or(|w| w.to_lowercase() == actual.to_lowercase())
}

/// Products matching `filter`, in their original order.
pub fn filter_products(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    if filter.is_empty() {
        return products.to_vec();
    }
    products.iter().filter(|p| filter.matches(p)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use glow_test_utils::fixtures::{raw_product, three_valid_one_invalid, with_fields};
    use proptest::prelude::*;
    use serde_json::{Value, json};

    fn sample() -> Vec<Product> {
        normalize(&Value::Array(three_valid_one_invalid())).unwrap()
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_returns_everything() {
        let products = sample();
        assert!(ProductFilter::default().is_empty());
        assert!(ProductFilter::default().brand("").is_empty());
        assert_eq!(filter_products(&products, &ProductFilter::default()), products);
    }

    #[test]
    fn brand_match_is_case_insensitive_and_exact() {
        let products = sample();
        let hits = filter_products(&products, &ProductFilter::default().brand("MAYBELLINE"));
        assert_eq!(ids(&hits), vec!["1", "3"]);
        assert!(filter_products(&products, &ProductFilter::default().brand("maybe")).is_empty());
    }

    #[test]
    fn filters_intersect() {
        let products = sample();
        let filter = ProductFilter::default().brand("maybelline").product_type("mascara");
        assert_eq!(ids(&filter_products(&products, &filter)), vec!["3"]);

        let disjoint = ProductFilter::default().brand("nyx").category("powder");
        assert!(filter_products(&products, &disjoint).is_empty());
    }

    #[test]
    fn search_covers_name_brand_and_description() {
        let products = sample();
        let by_name = ProductFilter::default().search("gloss");
        assert_eq!(ids(&filter_products(&products, &by_name)), vec!["2"]);
        let by_description = ProductFilter::default().search("BY NYX");
        assert_eq!(ids(&filter_products(&products, &by_description)), vec!["2"]);
    }

    #[test]
    fn tags_require_all() {
        let products = normalize(&json!([
            with_fields(raw_product(1, "a", "x"), json!({"tag_list": ["Vegan", "Organic"]})),
            with_fields(raw_product(2, "a", "y"), json!({"tag_list": ["vegan"]})),
        ]))
        .unwrap();
        let filter = ProductFilter::default().tag("vegan").tag("organic");
        assert_eq!(ids(&filter_products(&products, &filter)), vec!["1"]);
    }

    #[test]
    fn price_bounds_are_inclusive_and_skip_unparseable() {
        let products = normalize(&json!([
            with_fields(raw_product(1, "a", "x"), json!({"price": "5.00"})),
            with_fields(raw_product(2, "a", "y"), json!({"price": "10.00"})),
            with_fields(raw_product(3, "a", "z"), json!({"price": "call us"})),
        ]))
        .unwrap();
        let filter = ProductFilter::default().price_between(Some(5.0), Some(9.99));
        assert_eq!(ids(&filter_products(&products, &filter)), vec!["1", "3"]);
    }

    proptest! {
        #[test]
        fn brand_filter_selects_exactly_matching_subset(pick in 0usize..3, upper in any::<bool>()) {
            let products = sample();
            let brand = ["maybelline", "nyx", "acme"][pick];
            let query = if upper { brand.to_uppercase() } else { brand.to_string() };
            let hits = filter_products(&products, &ProductFilter::default().brand(query));
            let expected: Vec<Product> = products
                .iter()
                .filter(|p| p.brand.to_lowercase() == brand)
                .cloned()
                .collect();
            prop_assert_eq!(hits, expected);
        }
    }
}
