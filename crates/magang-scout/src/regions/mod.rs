//! Province/regency hierarchy: provider seam, HTTP client, resolver, and proxy routes.

pub mod domain;
pub mod provider;
pub mod resolver;
pub mod router;


pub use domain::{Region, RegionCode, RegionListing};
pub use provider::{RegionError, RegionProvider, WilayahClient};
pub use resolver::RegionResolver;
pub use router::region_router;
