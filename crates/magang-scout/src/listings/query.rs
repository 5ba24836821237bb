use std::num::NonZeroU32;

use crate::filters::{FilterCriteria, OrderBy, OrderDirection, DEFAULT_LIMIT};

/// The provider is only ever asked for its first page.
pub const FIRST_PAGE: u32 = 1;

/// Outbound listing request. Empty optional filters are left out of the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub order_by: OrderBy,
    pub order_direction: OrderDirection,
    pub limit: NonZeroU32,
    pub keyword: Option<String>,
    pub province_code: Option<String>,
    /// Already stripped of separators.
    pub regency_code: Option<String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            order_by: OrderBy::default(),
            order_direction: OrderDirection::default(),
            limit: DEFAULT_LIMIT,
            keyword: None,
            province_code: None,
            regency_code: None,
        }
    }
}

impl ListingQuery {
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            order_by: criteria.order_by(),
            order_direction: criteria.order_direction(),
            limit: criteria.limit(),
            keyword: criteria.keyword().map(str::to_string),
            province_code: criteria
                .province_code()
                .map(|code| code.as_str().to_string()),
            regency_code: criteria
                .regency_code()
                .map(|code| code.query_value())
                .filter(|code| !code.is_empty()),
        }
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("order_by", self.order_by.as_param().to_string()),
            ("order_direction", self.order_direction.as_param().to_string()),
            ("page", FIRST_PAGE.to_string()),
            ("limit", self.limit.to_string()),
        ];

        let optional = [
            ("keyword", &self.keyword),
            ("kode_provinsi", &self.province_code),
            ("kode_kabupaten", &self.regency_code),
        ];
        for (name, value) in optional {
            if let Some(value) = value.as_deref().map(str::trim) {
                if !value.is_empty() {
                    pairs.push((name, value.to_string()));
                }
            }
        }

        pairs
    }
}
