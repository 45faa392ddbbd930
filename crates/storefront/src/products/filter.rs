//! Query-parameter filtering and sorting of the aggregated product list.

use std::cmp::Reverse;
use std::str::FromStr;

use thiserror::Error;
use url::form_urlencoded;
use velour_core::{PriceRange, Product};

/// Raw `GET /api/products` query parameters.
///
/// Every field is optional; an empty value is treated the same as an absent
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub is_new: Option<String>,
    pub sort: Option<String>,
}

impl ProductQuery {
    /// Parse a raw, percent-encoded query string.
    ///
    /// When a parameter repeats, the first value wins. Unknown parameters are
    /// ignored.
    #[must_use]
    pub fn from_query_string(raw: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "category" => &mut query.category,
                "subCategory" => &mut query.sub_category,
                "search" => &mut query.search,
                "minPrice" => &mut query.min_price,
                "maxPrice" => &mut query.max_price,
                "color" => &mut query.color,
                "size" => &mut query.size,
                "isNew" => &mut query.is_new,
                "sort" => &mut query.sort,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }
}

/// Rejected query parameter values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid {param}: expected an integer, got `{value}`")]
    InvalidPrice { param: &'static str, value: String },

    #[error("Invalid isNew: expected `true` or `false`, got `{0}`")]
    InvalidFlag(String),

    #[error("Invalid sort: expected `newest`, `price-low` or `price-high`, got `{0}`")]
    InvalidSort(String),
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Aggregator order: local catalog first, then remote feed order.
    #[default]
    Newest,
    /// Ascending effective price.
    PriceLow,
    /// Descending effective price.
    PriceHigh,
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            other => Err(QueryError::InvalidSort(other.to_string())),
        }
    }
}

/// A validated set of product constraints.
///
/// Text values are stored already lower-cased, except `size` which matches
/// case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub search: Option<String>,
    pub price: PriceRange,
    pub color: Option<String>,
    pub size: Option<String>,
    pub is_new: Option<bool>,
    pub sort: SortOrder,
}

impl TryFrom<ProductQuery> for ProductFilter {
    type Error = QueryError;

    fn try_from(query: ProductQuery) -> Result<Self, Self::Error> {
        let is_new = present(query.is_new)
            .map(|flag| match flag.to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(QueryError::InvalidFlag(flag)),
            })
            .transpose()?;

        Ok(Self {
            category: present(query.category)
                .map(|c| c.to_lowercase())
                .filter(|c| c != "all"),
            sub_category: present(query.sub_category).map(|s| s.to_lowercase()),
            search: present(query.search).map(|s| s.to_lowercase()),
            price: PriceRange::new(
                parse_price("minPrice", query.min_price)?,
                parse_price("maxPrice", query.max_price)?,
            ),
            color: present(query.color).map(|c| c.to_lowercase()),
            size: present(query.size),
            is_new,
            sort: present(query.sort)
                .map(|s| s.parse::<SortOrder>())
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

impl ProductFilter {
    /// Returns `true` if `product` satisfies every constraint.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && !product.in_category(category)
        {
            return false;
        }

        if let Some(sub) = &self.sub_category
            && product.sub_category != *sub
            && !product.in_category(sub)
        {
            return false;
        }

        if let Some(search) = &self.search
            && !product.name.to_lowercase().contains(search)
            && !product.description.to_lowercase().contains(search)
        {
            return false;
        }

        if !self.price.contains(product.effective_price()) {
            return false;
        }

        if let Some(color) = &self.color
            && !product.colors.iter().any(|c| c == color)
        {
            return false;
        }

        if let Some(size) = &self.size
            && !product.sizes.iter().any(|s| s == size)
        {
            return false;
        }

        self.is_new.is_none_or(|is_new| product.is_new == is_new)
    }

    /// Keep the matching products and order them.
    ///
    /// Sorting is stable, so products with equal effective prices keep their
    /// input order.
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<Product> {
        let mut matched: Vec<Product> = products
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Newest => {}
            SortOrder::PriceLow => matched.sort_by_key(Product::effective_price),
            SortOrder::PriceHigh => matched.sort_by_key(|p| Reverse(p.effective_price())),
        }

        matched
    }
}

/// Drop empty values so `?color=` behaves like no `color` at all.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_price(param: &'static str, value: Option<String>) -> Result<Option<i64>, QueryError> {
    present(value)
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| QueryError::InvalidPrice { param, value: raw })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use velour_core::ProductId;

    use super::*;

    fn product(value: serde_json::Value) -> Product {
        serde_json::from_value(value).unwrap()
    }

    fn jacket() -> Product {
        product(json!({"id": 1, "name": "Jacket", "price": 3000, "categories": ["men"]}))
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(json!({
                "id": 1, "name": "Silk Scarf", "description": "Hand-rolled edges",
                "price": 4000, "salePrice": 2000, "categories": ["women", "accessories"],
                "subCategory": "scarves", "colors": ["red"], "sizes": ["M"], "isNew": true
            })),
            product(json!({
                "id": 2, "name": "Oxford Shirt", "description": "Crisp COTTON weave",
                "price": 3000, "categories": ["men"], "subCategory": "shirts",
                "colors": ["white", "blue"], "sizes": ["S", "M", "L"]
            })),
            product(json!({
                "id": 3, "name": "Leather Belt", "price": 2500,
                "categories": ["accessories"], "subCategory": "belts",
                "colors": ["black"], "sizes": ["M"], "isNew": true
            })),
            product(json!({
                "id": "external-9", "name": "Phone", "description": "Smart",
                "price": 2000, "categories": ["accessories"], "subCategory": "smartphones",
                "colors": ["black"], "sizes": ["M", "L", "XL"]
            })),
        ]
    }

    fn filter(raw: &str) -> Result<ProductFilter, QueryError> {
        ProductFilter::try_from(ProductQuery::from_query_string(raw))
    }

    fn ids(filter: &ProductFilter) -> Vec<ProductId> {
        filter.apply(&catalog()).iter().map(|p| p.id).collect()
    }

    fn local(ids: &[i64]) -> Vec<ProductId> {
        ids.iter().copied().map(ProductId::Local).collect()
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let f = filter("").unwrap();
        assert_eq!(f, ProductFilter::default());
        assert_eq!(ids(&f).len(), 4);
        assert_eq!(ids(&f)[..3], local(&[1, 2, 3])[..]);
    }

    #[test]
    fn test_empty_values_are_absent() {
        let f = filter("category=&minPrice=&color=&isNew=&sort=")
        .unwrap();
        assert_eq!(f, ProductFilter::default());
    }

    #[test]
    fn test_category_all_is_noop() {
        let f = filter("category=all").unwrap();
        assert_eq!(f.category, None);
        assert_eq!(ids(&f).len(), 4);

        let f = filter("category=ALL").unwrap();
        assert_eq!(ids(&f).len(), 4);
    }

    #[test]
    fn test_category_is_lowercased() {
        let f = filter("category=Men").unwrap();
        assert_eq!(ids(&f), local(&[2]));
    }

    #[test]
    fn test_sub_category_matches_sub_or_main_category() {
        let f = filter("subCategory=shirts").unwrap();
        assert_eq!(ids(&f), local(&[2]));

        // No product has sub-category "women", but product 1 is in that category
        let f = filter("subCategory=Women").unwrap();
        assert_eq!(ids(&f), local(&[1]));
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let f = filter("search=OXFORD").unwrap();
        assert_eq!(ids(&f), local(&[2]));

        let f = filter("search=cotton").unwrap();
        assert_eq!(ids(&f), local(&[2]));

        let f = filter("search=hand-ROLLED").unwrap();
        assert_eq!(ids(&f), local(&[1]));
    }

    #[test]
    fn test_price_bounds_use_effective_price_inclusively() {
        // Scarf lists at 4000 but sells at 2000
        let f = filter("maxPrice=2000").unwrap();
        assert_eq!(
            ids(&f),
            vec![ProductId::Local(1), ProductId::External(9)]
        );

        let f = filter("minPrice=2500&maxPrice=3000").unwrap();
        assert_eq!(ids(&f), local(&[2, 3]));
    }

    #[test]
    fn test_color_is_case_insensitive() {
        let f = filter("color=BLUE").unwrap();
        assert_eq!(ids(&f), local(&[2]));
    }

    #[test]
    fn test_size_is_case_sensitive() {
        let f = filter("size=XL").unwrap();
        assert_eq!(ids(&f), vec![ProductId::External(9)]);

        let f = filter("size=xl").unwrap();
        assert!(ids(&f).is_empty());
    }

    #[test]
    fn test_is_new_flag() {
        let f = filter("isNew=true").unwrap();
        assert_eq!(ids(&f), local(&[1, 3]));

        let f = filter("isNew=false").unwrap();
        assert_eq!(ids(&f), vec![ProductId::Local(2), ProductId::External(9)]);
    }

    #[test]
    fn test_constraints_combine() {
        let f = filter("category=accessories&color=black&maxPrice=2400")
            .unwrap();
        assert_eq!(ids(&f), vec![ProductId::External(9)]);
    }

    #[test]
    fn test_sort_by_price() {
        let f = filter("sort=price-low").unwrap();
        // Scarf (2000) and phone (2000) tie and keep input order
        assert_eq!(
            ids(&f),
            vec![
                ProductId::Local(1),
                ProductId::External(9),
                ProductId::Local(3),
                ProductId::Local(2)
            ]
        );

        let f = filter("sort=price-high").unwrap();
        assert_eq!(
            ids(&f),
            vec![
                ProductId::Local(2),
                ProductId::Local(3),
                ProductId::Local(1),
                ProductId::External(9)
            ]
        );
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        assert_eq!(
            filter("minPrice=cheap"),
            Err(QueryError::InvalidPrice {
                param: "minPrice",
                value: "cheap".to_string()
            })
        );
        assert!(matches!(
            filter("maxPrice=12.5"),
            Err(QueryError::InvalidPrice { param: "maxPrice", .. })
        ));
        assert_eq!(
            filter("isNew=yes"),
            Err(QueryError::InvalidFlag("yes".to_string()))
        );
        assert_eq!(
            filter("sort=popular"),
            Err(QueryError::InvalidSort("popular".to_string()))
        );
    }

    #[test]
    fn test_jacket_price_cap() {
        let products = [jacket()];

        let f = filter("category=men&maxPrice=2500").unwrap();
        assert!(f.apply(&products).is_empty());

        let f = filter("category=men&maxPrice=3000").unwrap();
        assert_eq!(f.apply(&products), vec![jacket()]);
    }

    #[test]
    fn test_query_string_first_value_wins() {
        let query = ProductQuery::from_query_string("size=M&size=L&search=linen+shirt&utm=x");
        assert_eq!(query.size.as_deref(), Some("M"));
        assert_eq!(query.search.as_deref(), Some("linen shirt"));

        // An empty first value still shadows later ones
        let f = filter("maxPrice=&maxPrice=cheap").unwrap();
        assert_eq!(f.price, PriceRange::default());
    }

    #[test]
    fn test_query_string_decodes_percent_escapes() {
        let query = ProductQuery::from_query_string("category=Men%27s&sort=price%2Dlow");
        assert_eq!(query.category.as_deref(), Some("Men's"));
        assert_eq!(query.sort.as_deref(), Some("price-low"));
    }
}
