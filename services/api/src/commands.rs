use crate::infra::{parse_order_by, parse_order_direction, Upstreams};
use clap::Args;
use magang_scout::config::AppConfig;
use magang_scout::error::AppError;
use magang_scout::filters::{
    coerce_limit, FilterError, FilterEvent, OrderBy, OrderDirection, SharedFilterSession,
};
use magang_scout::listings::{DisplayListing, ListingSearch};
use magang_scout::regions::{Region, RegionCode, RegionResolver};
use magang_scout::telemetry;
use std::fmt::Write as _;

const BAR_WIDTH: usize = 20;

#[derive(Args, Debug)]
pub(crate) struct RegenciesArgs {
    /// Province code, e.g. 36
    #[arg(long)]
    pub(crate) province: String,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Free-text keyword, e.g. "IT" or "Designer"
    #[arg(long)]
    pub(crate) keyword: Option<String>,
    /// Sort by registered count (jumlah_terdaftar) or quota (jumlah_kuota)
    #[arg(long, value_parser = parse_order_by, default_value = "jumlah_terdaftar")]
    pub(crate) order_by: OrderBy,
    /// Sort direction: ASC or DESC
    #[arg(long, value_parser = parse_order_direction, default_value = "ASC")]
    pub(crate) direction: OrderDirection,
    /// Number of vacancies to request (coerced to a positive integer)
    #[arg(long)]
    pub(crate) limit: Option<String>,
    /// Province code to filter by
    #[arg(long)]
    pub(crate) province: Option<String>,
    /// Regency code within the province, e.g. 36.71
    #[arg(long, requires = "province")]
    pub(crate) regency: Option<String>,
}

struct CommandContext {
    upstreams: Upstreams,
}

impl CommandContext {
    fn load() -> Result<Self, AppError> {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;
        let upstreams = Upstreams::from_config(&config.upstream)?;
        Ok(Self { upstreams })
    }
}

pub(crate) async fn run_provinces() -> Result<(), AppError> {
    let context = CommandContext::load()?;
    let resolver = RegionResolver::new(context.upstreams.regions);

    let provinces = resolver.resolve_provinces().await;
    print!("{}", render_regions("Provinces", &provinces));
    Ok(())
}

pub(crate) async fn run_regencies(args: RegenciesArgs) -> Result<(), AppError> {
    let province = RegionCode::new(args.province);
    if province.is_empty() {
        return Err(FilterError::NoProvinceSelected.into());
    }

    let context = CommandContext::load()?;
    let resolver = RegionResolver::new(context.upstreams.regions);

    let regencies = resolver.resolve_regencies(&province).await;
    print!(
        "{}",
        render_regions(&format!("Regencies of province {province}"), &regencies)
    );
    Ok(())
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let context = CommandContext::load()?;
    let resolver = RegionResolver::new(context.upstreams.regions);
    let session = SharedFilterSession::default();

    let mut events = vec![
        FilterEvent::SetOrderBy(args.order_by),
        FilterEvent::SetOrderDirection(args.direction),
    ];
    if let Some(keyword) = args.keyword {
        events.push(FilterEvent::SetKeyword(keyword));
    }
    if let Some(limit) = args.limit {
        events.push(FilterEvent::SetLimit(coerce_limit(&limit)));
    }
    if let Some(province) = args.province {
        events.push(FilterEvent::SetProvince(Some(RegionCode::new(province))));
    }
    if let Some(regency) = args.regency {
        events.push(FilterEvent::SetRegency(Some(RegionCode::new(regency))));
    }

    for event in events {
        session.dispatch(&resolver, event).await?;
    }

    let search = ListingSearch::new(context.upstreams.listings);
    let listings = search.search(&session.criteria()).await;
    print!("{}", render_listings(&listings));
    Ok(())
}

fn render_regions(title: &str, regions: &[Region]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    if regions.is_empty() {
        let _ = writeln!(out, "- none available");
        return out;
    }
    for region in regions {
        let _ = writeln!(out, "- {} {}", region.code, region.name);
    }
    out
}

fn render_listings(listings: &[DisplayListing]) -> String {
    let mut out = String::new();
    if listings.is_empty() {
        let _ = writeln!(out, "No vacancies to display.");
        return out;
    }

    let _ = writeln!(out, "Showing {} vacancies", listings.len());
    for listing in listings {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", listing.position.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "  {}", listing.company_name.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "  {}", listing.locality.as_deref().unwrap_or("-"));
        let _ = writeln!(
            out,
            "  Quota: {} | Registered: {}",
            listing.quota, listing.registered_count
        );
        let _ = writeln!(
            out,
            "  Chance if you apply: {}% ({})",
            listing.admission.score,
            listing.admission.label.label()
        );
        let _ = writeln!(out, "  {}", listing.admission.bar(BAR_WIDTH));

        let programs = if listing.program_titles.is_empty() {
            "-".to_string()
        } else {
            listing.program_titles.join(", ")
        };
        let _ = writeln!(out, "  Programs: {programs}");
    }
    out
}
