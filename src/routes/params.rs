use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    catalog::query::{CategoryFilter, PriceBucket, ProductFilter, ProductQuery, SortKey},
    models::StatusTag,
    validation::ValidationError,
};

/// Raw `GET /products` query. Multi-select fields are comma-separated.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// Category slug, or `all`.
    pub category: Option<String>,
    /// Price buckets such as `0-100000,100000-300000`.
    pub price: Option<String>,
    /// Status tags such as `new,sale`.
    pub status: Option<String>,
    pub search: Option<String>,
    /// Alias of `search`.
    pub q: Option<String>,
    /// `relevance`, `name-asc`, `name-desc`, `price-asc`, `price-desc` or `newest`.
    pub sort: Option<String>,
    pub page: Option<usize>,
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

impl ProductListParams {
    pub fn into_query(self) -> Result<ProductQuery, ValidationError> {
        let category = match self.category.as_deref() {
            Some(raw) => raw.parse::<CategoryFilter>()?,
            None => CategoryFilter::All,
        };
        let price_buckets = split_list(self.price.as_deref())
            .map(str::parse::<PriceBucket>)
            .collect::<Result<Vec<_>, _>>()?;
        let statuses = split_list(self.status.as_deref())
            .map(str::parse::<StatusTag>)
            .collect::<Result<Vec<_>, _>>()?;
        let keyword = self
            .search
            .or(self.q)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(ProductQuery {
            filter: ProductFilter {
                category,
                price_buckets,
                statuses,
                keyword,
            },
            sort: self
                .sort
                .as_deref()
                .map(SortKey::parse_lenient)
                .unwrap_or_default(),
            page: self.page.unwrap_or(1),
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestionQuery {
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn empty_params_select_everything() {
        let query = ProductListParams::default().into_query().unwrap();
        assert_eq!(query.filter, ProductFilter::default());
        assert_eq!(query.sort, SortKey::Relevance);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn multi_select_lists_are_parsed() {
        let params = ProductListParams {
            category: Some("standee".into()),
            price: Some("0-100000, 500000-1000000".into()),
            status: Some("hot,sale".into()),
            q: Some("  mica ".into()),
            sort: Some("price-desc".into()),
            page: Some(2),
            ..Default::default()
        };
        let query = params.into_query().unwrap();
        assert_eq!(
            query.filter.category,
            CategoryFilter::Only(Category::Standee)
        );
        assert_eq!(
            query.filter.price_buckets,
            vec![PriceBucket::new(0, 100_000), PriceBucket::new(500_000, 1_000_000)]
        );
        assert_eq!(query.filter.statuses, vec![StatusTag::Hot, StatusTag::Sale]);
        assert_eq!(query.filter.keyword.as_deref(), Some("mica"));
        assert_eq!(query.sort, SortKey::PriceDesc);
        assert_eq!(query.page, 2);
    }

    #[test]
    fn search_takes_precedence_over_q() {
        let params = ProductListParams {
            search: Some("standee".into()),
            q: Some("wood".into()),
            ..Default::default()
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.filter.keyword.as_deref(), Some("standee"));
    }

    #[test]
    fn invalid_bucket_and_unknown_status_are_rejected() {
        let bad_bucket = ProductListParams {
            price: Some("500-100".into()),
            ..Default::default()
        };
        assert!(matches!(
            bad_bucket.into_query(),
            Err(ValidationError::InvalidPriceBucket(_))
        ));

        let bad_status = ProductListParams {
            status: Some("clearance".into()),
            ..Default::default()
        };
        assert!(matches!(
            bad_status.into_query(),
            Err(ValidationError::UnknownStatus(_))
        ));
    }
}
