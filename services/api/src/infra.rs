use magang_scout::config::UpstreamConfig;
use magang_scout::error::AppError;
use magang_scout::filters::{OrderBy, OrderDirection};
use magang_scout::listings::MagangHubClient;
use magang_scout::regions::WilayahClient;
use magang_scout::upstream::http_client;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Production clients for both upstream services, sharing one connection pool.
pub(crate) struct Upstreams {
    pub(crate) regions: Arc<WilayahClient>,
    pub(crate) listings: Arc<MagangHubClient>,
}

impl Upstreams {
    pub(crate) fn from_config(config: &UpstreamConfig) -> Result<Self, AppError> {
        let client = http_client(config)?;
        Ok(Self {
            regions: Arc::new(WilayahClient::new(
                client.clone(),
                config.region_base_url.clone(),
            )),
            listings: Arc::new(MagangHubClient::new(client, config.vacancy_url.clone())),
        })
    }
}

pub(crate) fn parse_order_by(raw: &str) -> Result<OrderBy, String> {
    OrderBy::parse(raw).ok_or_else(|| {
        format!("unsupported sort field '{raw}' (use jumlah_terdaftar/registered or jumlah_kuota/quota)")
    })
}

pub(crate) fn parse_order_direction(raw: &str) -> Result<OrderDirection, String> {
    OrderDirection::parse(raw)
        .ok_or_else(|| format!("unsupported sort direction '{raw}' (use ASC or DESC)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_parsers_accept_wire_and_friendly_names() {
        assert_eq!(parse_order_by("jumlah_kuota"), Ok(OrderBy::QuotaCount));
        assert_eq!(parse_order_by("registered"), Ok(OrderBy::RegisteredCount));
        assert!(parse_order_by("salary").is_err());
        assert_eq!(parse_order_direction("desc"), Ok(OrderDirection::Descending));
        assert!(parse_order_direction("sideways").is_err());
    }

    #[test]
    fn upstreams_build_from_default_config() {
        assert!(Upstreams::from_config(&UpstreamConfig::default()).is_ok());
    }
}
