//! Calendar domain module.
//!
//! Everything between a validated tool call and the Cal.com API:
//!
//! - `rate_limit.rs` - Two-tier fixed-window limiter (burst + daily cap)
//! - `provider.rs` - The `BookingProvider` trait
//! - `calcom.rs` - `reqwest` implementation against Cal.com v2
//! - `service.rs` - `CalendarService`, which checks the limiter and then calls the provider
//! - `model.rs` - Request records and the normalized `Appointment`

pub mod calcom;
mod error;
pub mod model;
pub mod provider;
pub mod rate_limit;
mod service;

#[cfg(test)]
pub(crate) mod fake;

pub use calcom::CalComClient;
pub use error::{CalendarError, Operation, ProviderError, ProviderResult};
pub use model::Appointment;
pub use provider::BookingProvider;
pub use rate_limit::{RateBudget, RateLimiter, RateWindow};
pub use service::{CalendarResult, CalendarService};
