//! Search criteria and the province → regency cascade that constrains them.

pub mod criteria;
pub mod session;


pub use criteria::{
    coerce_limit, FilterCriteria, FilterError, FilterEvent, OrderBy, OrderDirection,
    DEFAULT_LIMIT,
};
pub use session::{FilterSession, RegencyResolution, RegencyTicket, SharedFilterSession};
