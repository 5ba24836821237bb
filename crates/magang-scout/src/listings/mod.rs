//! Vacancy retrieval, normalization, and admission-chance scoring.

pub mod domain;
pub mod provider;
pub mod query;
pub mod router;
pub mod scoring;
pub mod search;


pub use domain::{normalize, CompanyRecord, DisplayListing, ListingPage, ListingRecord};
pub use provider::{ListingError, ListingProvider, MagangHubClient};
pub use query::{ListingQuery, FIRST_PAGE};
pub use router::{listing_router, VacancySearchResponse};
pub use scoring::{admission_percent, AdmissionChance, AdmissionLabel};
pub use search::{ListingSearch, SearchSnapshot};
