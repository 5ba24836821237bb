use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::criteria::{FilterCriteria, FilterError, FilterEvent};
use crate::regions::{Region, RegionCode, RegionProvider, RegionResolver};

/// Claim on the regency set for one province selection.
///
/// Only the ticket carrying the session's current generation may install regencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegencyTicket {
    generation: u64,
    province: RegionCode,
}

impl RegencyTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn province(&self) -> &RegionCode {
        &self.province
    }
}

/// Filter criteria together with the region lists that back the cascading selection.
#[derive(Debug, Clone, Default)]
pub struct FilterSession {
    criteria: FilterCriteria,
    provinces: Vec<Region>,
    regencies: Vec<Region>,
    generation: u64,
}

impl FilterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn provinces(&self) -> &[Region] {
        &self.provinces
    }

    pub fn regencies(&self) -> &[Region] {
        &self.regencies
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_provinces(&mut self, provinces: Vec<Region>) {
        self.provinces = provinces;
    }

    /// Apply one event. A province transition bumps the generation and empties the regency
    /// set; when a province remains selected the returned ticket must be resolved and handed
    /// back through [`FilterSession::apply_regencies`].
    pub fn dispatch(&mut self, event: FilterEvent) -> Result<Option<RegencyTicket>, FilterError> {
        let province_event = matches!(event, FilterEvent::SetProvince(_));
        self.criteria = self.criteria.clone().apply(event, &self.regencies)?;

        if !province_event {
            return Ok(None);
        }

        self.generation += 1;
        self.regencies.clear();

        Ok(self
            .criteria
            .province_code()
            .cloned()
            .map(|province| RegencyTicket {
                generation: self.generation,
                province,
            }))
    }

    pub fn set_field(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<Option<RegencyTicket>, FilterError> {
        let event = FilterEvent::from_field(name, value)?;
        self.dispatch(event)
    }

    /// Install a resolved regency set. Returns `false` when the ticket was superseded by a
    /// later province selection, in which case the set is discarded.
    pub fn apply_regencies(&mut self, ticket: RegencyTicket, regencies: Vec<Region>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                province = %ticket.province,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale regency response"
            );
            return false;
        }

        self.regencies = regencies;
        true
    }
}

/// What happened to the regency set after a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegencyResolution {
    /// The event did not select a province, so no lookup ran.
    NotRequired,
    Applied,
    /// A newer province selection won while this lookup was in flight.
    Discarded,
}

/// Session handle that can be shared between concurrently running tasks.
///
/// The lock is never held across a lookup, so overlapping province changes race freely and
/// the generation check decides which result lands.
#[derive(Debug, Clone, Default)]
pub struct SharedFilterSession {
    inner: Arc<Mutex<FilterSession>>,
}

impl SharedFilterSession {
    pub fn new(session: FilterSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FilterSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> FilterSession {
        self.lock().clone()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.lock().criteria().clone()
    }

    pub fn regencies(&self) -> Vec<Region> {
        self.lock().regencies().to_vec()
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    pub async fn load_provinces<P>(&self, resolver: &RegionResolver<P>) -> usize
    where
        P: RegionProvider + 'static,
    {
        let provinces = resolver.resolve_provinces().await;
        let count = provinces.len();
        self.lock().set_provinces(provinces);
        count
    }

    pub async fn dispatch<P>(
        &self,
        resolver: &RegionResolver<P>,
        event: FilterEvent,
    ) -> Result<RegencyResolution, FilterError>
    where
        P: RegionProvider + 'static,
    {
        let ticket = self.lock().dispatch(event)?;
        let Some(ticket) = ticket else {
            return Ok(RegencyResolution::NotRequired);
        };

        let regencies = resolver.resolve_regencies(ticket.province()).await;

        if self.lock().apply_regencies(ticket, regencies) {
            Ok(RegencyResolution::Applied)
        } else {
            Ok(RegencyResolution::Discarded)
        }
    }

    pub async fn set_field<P>(
        &self,
        resolver: &RegionResolver<P>,
        name: &str,
        value: &str,
    ) -> Result<RegencyResolution, FilterError>
    where
        P: RegionProvider + 'static,
    {
        let event = FilterEvent::from_field(name, value)?;
        self.dispatch(resolver, event).await
    }
}
