//! Filter, sort and paginate over a catalog snapshot.
//!
//! Stages run in a fixed order (category, price buckets, status tags,
//! keyword). Each stage narrows the previous one; selections inside a stage
//! are OR-combined. The input slice is never reordered.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use utoipa::ToSchema;

use crate::{
    models::{Category, Product, StatusTag},
    validation::ValidationError,
};

pub const PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

/// Inclusive price range, written `min-max` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBucket {
    pub min: u64,
    pub max: u64,
}

impl PriceBucket {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: u64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

impl FromStr for PriceBucket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidPriceBucket(s.to_string());
        let (min, max) = s.trim().split_once('-').ok_or_else(invalid)?;
        let min: u64 = min.trim().parse().map_err(|_| invalid())?;
        let max: u64 = max.trim().parse().map_err(|_| invalid())?;
        if min > max {
            return Err(invalid());
        }
        Ok(PriceBucket { min, max })
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Relevance,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortKey {
    /// Unknown keys fall back to catalog order, like an unset sort select.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim() {
            "name-asc" => SortKey::NameAsc,
            "name-desc" => SortKey::NameDesc,
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            "newest" => SortKey::Newest,
            _ => SortKey::Relevance,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: CategoryFilter,
    pub price_buckets: Vec<PriceBucket>,
    pub statuses: Vec<StatusTag>,
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub sort: SortKey,
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().collect();

    if let CategoryFilter::Only(category) = filter.category {
        matched.retain(|p| p.category == category);
    }

    if !filter.price_buckets.is_empty() {
        matched.retain(|p| filter.price_buckets.iter().any(|b| b.contains(p.price)));
    }

    if !filter.statuses.is_empty() {
        matched.retain(|p| filter.statuses.iter().any(|tag| p.has_status(*tag)));
    }

    if let Some(keyword) = filter
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
    {
        let needle = keyword.to_lowercase();
        matched.retain(|p| p.name.to_lowercase().contains(&needle));
    }

    matched
}

/// Sort key for product names: canonical decomposition with combining
/// marks stripped, lowercased, `đ` read as `d`. "Đồ gỗ" folds to "do go".
pub fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect()
}

/// Compares folded names first, so accented letters sort next to their base
/// letter. Ties fall back to lowercase and then the raw string so the order
/// is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_name(a)
        .cmp(&fold_name(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Stable sort, so sorting an already sorted sequence is a no-op.
pub fn sort_products(products: &mut [&Product], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::NameAsc => products.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::NameDesc => products.sort_by(|a, b| compare_names(&b.name, &a.name)),
        SortKey::PriceAsc => products.sort_by_key(|p| p.price),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Newest => products.sort_by(|a, b| b.id.cmp(&a.id)),
    }
}

/// Pages are 1-based; page 0 is read as page 1. Pages past the end come back
/// empty.
pub fn paginate<T: Clone>(items: &[T], page: usize) -> Page<T> {
    let page = page.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(PAGE_SIZE).min(total);
    let end = start.saturating_add(PAGE_SIZE).min(total);
    Page {
        items: items[start..end].to_vec(),
        page,
        per_page: PAGE_SIZE,
        total,
        total_pages: total.div_ceil(PAGE_SIZE),
    }
}

pub fn run_query(products: &[Product], query: &ProductQuery) -> Page<Product> {
    let mut matched = filter_products(products, &query.filter);
    sort_products(&mut matched, query.sort);
    let owned: Vec<Product> = matched.into_iter().cloned().collect();
    paginate(&owned, query.page)
}
