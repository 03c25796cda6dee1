// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregates derived from a product set on every query.
//!
//! Nothing here is stored; every function is a pure view over the products
//! it is given.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::Product;

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new("[^a-z0-9]+").unwrap());

/// Lowercase `name` and collapse each run of non `[a-z0-9]` characters into
/// a single `-`.
///
/// Accented letters count as separators, so `"L'Oréal"` becomes
/// `"l-or-al"`. Leading and trailing separators are kept.
pub fn slugify(name: &str) -> String {
    NON_ALNUM.replace_all(&name.to_lowercase(), "-").into_owned()
}

/// Per-brand summary of the current product set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandAggregate {
    /// Brand name as spelled by the first product seen.
    pub name: String,
    pub slug: String,
    pub product_count: usize,
    pub categories: Vec<String>,
    pub product_types: Vec<String>,
    /// Image of the first product seen.
    pub image: String,
    pub products: Vec<Product>,
}

/// Group products by brand slug, in order of first appearance.
///
/// Brands whose names slugify identically collapse into one aggregate.
pub fn group_by_brand(products: &[Product]) -> Vec<BrandAggregate> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut brands: Vec<BrandAggregate> = Vec::new();

    for product in products {
        let slug = slugify(&product.brand);
        let at = *index.entry(slug.clone()).or_insert_with(|| {
            brands.push(BrandAggregate {
                name: product.brand.clone(),
                slug,
                product_count: 0,
                categories: Vec::new(),
                product_types: Vec::new(),
                image: product.image_link.clone(),
                products: Vec::new(),
            });
            brands.len() - 1
        });

        let brand = &mut brands[at];
        brand.product_count += 1;
        push_unique(&mut brand.categories, &product.category);
        push_unique(&mut brand.product_types, &product.product_type);
        brand.products.push(product.clone());
    }
    brands
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// Distinct non-empty categories, in order of first appearance.
pub fn categories(products: &[Product]) -> Vec<String> {
    distinct(products.iter().map(|p| p.category.as_str()))
}

/// Distinct non-empty product types, in order of first appearance.
pub fn product_types(products: &[Product]) -> Vec<String> {
    distinct(products.iter().map(|p| p.product_type.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Headline numbers for a product set.
///
/// Brands are counted by slug and categories and types by their distinct
/// non-empty values, so the counts agree with [`group_by_brand`],
/// [`categories`] and [`product_types`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    pub total_brands: usize,
    pub total_categories: usize,
    pub total_types: usize,
    /// Mean over rated products, `0.0` when none are rated.
    pub average_rating: f64,
    pub rated_products: usize,
}

pub fn stats(products: &[Product]) -> ProductStats {
    let ratings: Vec<f64> = products.iter().filter_map(|p| p.rating).collect();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    };

    ProductStats {
        total_products: products.len(),
        total_brands: products
            .iter()
            .map(|p| slugify(&p.brand))
            .collect::<HashSet<_>>()
            .len(),
        total_categories: categories(products).len(),
        total_types: product_types(products).len(),
        average_rating,
        rated_products: ratings.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Range over positive, parseable prices; `None` if there are none.
pub fn price_range(products: &[Product]) -> Option<PriceRange> {
    products
        .iter()
        .filter_map(Product::price_value)
        .filter(|p| *p > 0.0)
        .fold(None, |range, price| {
            Some(match range {
                None => PriceRange { min: price, max: price },
                Some(PriceRange { min, max }) => PriceRange {
                    min: min.min(price),
                    max: max.max(price),
                },
            })
        })
}

/// All tags, lower-cased, de-duplicated and sorted.
pub fn unique_tags(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .flat_map(|p| p.tag_list.iter().map(|t| t.to_lowercase()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
