use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::regions::{Region, RegionCode};

pub const DEFAULT_LIMIT: NonZeroU32 = match NonZeroU32::new(10) {
    Some(limit) => limit,
    None => panic!("default limit must be positive"),
};

/// Field the listing provider sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    #[default]
    #[serde(rename = "jumlah_terdaftar")]
    RegisteredCount,
    #[serde(rename = "jumlah_kuota")]
    QuotaCount,
}

impl OrderBy {
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::RegisteredCount => "jumlah_terdaftar",
            Self::QuotaCount => "jumlah_kuota",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RegisteredCount => "Registered count",
            Self::QuotaCount => "Quota",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "jumlah_terdaftar" | "registered" | "registered_count" => Some(Self::RegisteredCount),
            "jumlah_kuota" | "quota" | "quota_count" => Some(Self::QuotaCount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    #[default]
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

impl OrderDirection {
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending (small to large)",
            Self::Descending => "Descending (large to small)",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// Coerce free-form limit input into a positive page size.
///
/// Fractions are truncated, anything below one becomes one, and input that is not a
/// number at all falls back to the default.
pub fn coerce_limit(raw: &str) -> NonZeroU32 {
    let Ok(value) = raw.trim().parse::<f64>() else {
        return DEFAULT_LIMIT;
    };
    if !value.is_finite() {
        return DEFAULT_LIMIT;
    }

    let clamped = value.trunc().clamp(1.0, f64::from(u32::MAX)) as u32;
    NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN)
}

/// Current search criteria.
///
/// Fields are only reachable through [`FilterCriteria::apply`], which keeps the regency tied
/// to the province it was resolved for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    keyword: String,
    order_by: OrderBy,
    order_direction: OrderDirection,
    limit: NonZeroU32,
    province_code: Option<RegionCode>,
    regency_code: Option<RegionCode>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            order_by: OrderBy::default(),
            order_direction: OrderDirection::default(),
            limit: DEFAULT_LIMIT,
            province_code: None,
            regency_code: None,
        }
    }
}

/// One user edit to the criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    SetKeyword(String),
    SetOrderBy(OrderBy),
    SetOrderDirection(OrderDirection),
    SetLimit(NonZeroU32),
    SetProvince(Option<RegionCode>),
    SetRegency(Option<RegionCode>),
}

impl FilterEvent {
    /// Translate a named form field into an event. Both the provider's parameter names
    /// (`kode_provinsi`) and descriptive names (`province_code`) are accepted.
    pub fn from_field(name: &str, value: &str) -> Result<Self, FilterError> {
        let event = match name.trim() {
            "keyword" => Self::SetKeyword(value.to_string()),
            "order_by" => Self::SetOrderBy(
                OrderBy::parse(value).ok_or_else(|| FilterError::InvalidOrderBy(value.into()))?,
            ),
            "order_direction" => Self::SetOrderDirection(
                OrderDirection::parse(value)
                    .ok_or_else(|| FilterError::InvalidOrderDirection(value.into()))?,
            ),
            "limit" => Self::SetLimit(coerce_limit(value)),
            "kode_provinsi" | "province_code" => Self::SetProvince(non_empty_code(value)),
            "kode_kabupaten" | "regency_code" => Self::SetRegency(non_empty_code(value)),
            other => return Err(FilterError::UnknownField(other.to_string())),
        };
        Ok(event)
    }
}

fn non_empty_code(raw: &str) -> Option<RegionCode> {
    Some(RegionCode::new(raw)).filter(|code| !code.is_empty())
}

/// Rejected filter transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown filter field '{0}'")]
    UnknownField(String),
    #[error("unsupported sort field '{0}'")]
    InvalidOrderBy(String),
    #[error("unsupported sort direction '{0}'")]
    InvalidOrderDirection(String),
    #[error("select a province before choosing a regency")]
    NoProvinceSelected,
    #[error("regency '{regency}' does not belong to province '{province}'")]
    UnknownRegency {
        regency: RegionCode,
        province: RegionCode,
    },
}

impl FilterCriteria {
    pub fn keyword(&self) -> Option<&str> {
        let keyword = self.keyword.trim();
        (!keyword.is_empty()).then_some(keyword)
    }

    pub fn order_by(&self) -> OrderBy {
        self.order_by
    }

    pub fn order_direction(&self) -> OrderDirection {
        self.order_direction
    }

    pub fn limit(&self) -> NonZeroU32 {
        self.limit
    }

    pub fn province_code(&self) -> Option<&RegionCode> {
        self.province_code.as_ref()
    }

    pub fn regency_code(&self) -> Option<&RegionCode> {
        self.regency_code.as_ref()
    }

    /// Pure transition from the current criteria to the next.
    ///
    /// `regencies` is the set last resolved for the current province. A province change
    /// always clears the regency in the same step.
    pub fn apply(self, event: FilterEvent, regencies: &[Region]) -> Result<Self, FilterError> {
        let next = match event {
            FilterEvent::SetKeyword(keyword) => Self { keyword, ..self },
            FilterEvent::SetOrderBy(order_by) => Self { order_by, ..self },
            FilterEvent::SetOrderDirection(order_direction) => Self {
                order_direction,
                ..self
            },
            FilterEvent::SetLimit(limit) => Self { limit, ..self },
            FilterEvent::SetProvince(code) => Self {
                province_code: code.filter(|code| !code.is_empty()),
                regency_code: None,
                ..self
            },
            FilterEvent::SetRegency(code) => match code.filter(|code| !code.is_empty()) {
                None => Self {
                    regency_code: None,
                    ..self
                },
                Some(regency) => {
                    let province = self
                        .province_code
                        .clone()
                        .ok_or(FilterError::NoProvinceSelected)?;
                    if !regencies.iter().any(|region| region.code == regency) {
                        return Err(FilterError::UnknownRegency { regency, province });
                    }
                    Self {
                        regency_code: Some(regency),
                        ..self
                    }
                }
            },
        };
        Ok(next)
    }
}
