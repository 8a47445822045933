use models::advertisement::AdvertisementFilter;
use models::ValidationError;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::pagination::Pagination;

/// Search parameters as received in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default, alias = "headline")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub min_price: Option<Decimal>,
    #[serde(default)]
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Checked search: filter plus page window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub filter: AdvertisementFilter,
    pub page: Pagination,
}

// An empty text filter means "no constraint".
fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

impl SearchQuery {
    pub fn validate(self) -> Result<SearchRequest, ValidationError> {
        let page = Pagination::from_query(self.skip, self.limit)?;
        let filter = AdvertisementFilter {
            title: non_blank(self.title),
            description: non_blank(self.description),
            author: non_blank(self.author),
            min_price: self.min_price,
            max_price: self.max_price,
        };
        Ok(SearchRequest { filter, page })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_dropped() {
        let q = SearchQuery {
            title: Some("".into()),
            author: Some("  ".into()),
            description: Some("bike".into()),
            ..Default::default()
        };
        let req = q.validate().unwrap();
        assert_eq!(req.filter.title, None);
        assert_eq!(req.filter.author, None);
        assert_eq!(req.filter.description.as_deref(), Some("bike"));
        assert_eq!(req.page, Pagination::default());
    }

    #[test]
    fn limit_over_max_is_rejected() {
        let q = SearchQuery { limit: Some(500), ..Default::default() };
        assert!(q.validate().unwrap_err().has_field("limit"));
    }
}
