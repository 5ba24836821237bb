use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::{Region, RegionCode};
use super::provider::RegionProvider;

/// Resolves provinces and regencies, degrading every failure to an empty list.
pub struct RegionResolver<P> {
    provider: Arc<P>,
}

impl<P> Clone for RegionResolver<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P> RegionResolver<P>
where
    P: RegionProvider + 'static,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Provinces in provider order; empty when the provider cannot be reached.
    pub async fn resolve_provinces(&self) -> Vec<Region> {
        match self.provider.provinces().await {
            Ok(provinces) => {
                debug!(count = provinces.len(), "resolved provinces");
                provinces
            }
            Err(err) => {
                warn!(error = %err, "failed to resolve provinces");
                Vec::new()
            }
        }
    }

    /// Regencies of one province in provider order.
    ///
    /// Callers must not pass an empty code; clearing the selection never needs a lookup.
    pub async fn resolve_regencies(&self, province: &RegionCode) -> Vec<Region> {
        debug_assert!(!province.is_empty(), "regency lookup without a province");

        match self.provider.regencies(province).await {
            Ok(regencies) => {
                debug!(%province, count = regencies.len(), "resolved regencies");
                regencies
            }
            Err(err) => {
                warn!(%province, error = %err, "failed to resolve regencies");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::provider::RegionError;
    use axum::http::StatusCode;

    struct FixedProvider;

    impl RegionProvider for FixedProvider {
        async fn provinces(&self) -> Result<Vec<Region>, RegionError> {
            Ok(vec![
                Region::new("36", "BANTEN"),
                Region::new("11", "ACEH"),
            ])
        }

        async fn regencies(&self, province: &RegionCode) -> Result<Vec<Region>, RegionError> {
            match province.as_str() {
                "36" => Ok(vec![
                    Region::new("36.03", "KABUPATEN TANGERANG"),
                    Region::new("36.01", "KABUPATEN PANDEGLANG"),
                ]),
                _ => Err(RegionError::Status(StatusCode::NOT_FOUND)),
            }
        }
    }

    #[tokio::test]
    async fn preserves_provider_order() {
        let resolver = RegionResolver::new(Arc::new(FixedProvider));

        let provinces = resolver.resolve_provinces().await;
        assert_eq!(provinces[0].name, "BANTEN");
        assert_eq!(provinces[1].name, "ACEH");

        let regencies = resolver.resolve_regencies(&RegionCode::new("36")).await;
        let codes: Vec<_> = regencies.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["36.03", "36.01"]);
    }

    #[tokio::test]
    async fn provider_failures_become_empty_lists() {
        let resolver = RegionResolver::new(Arc::new(FixedProvider));
        let regencies = resolver.resolve_regencies(&RegionCode::new("99")).await;
        assert!(regencies.is_empty());
    }
}
