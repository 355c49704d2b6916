//! The booking provider seam.
//!
//! The calendar service talks to the scheduling backend only through
//! [`BookingProvider`], so the HTTP client can be swapped for a fake in tests.

use async_trait::async_trait;

use super::error::ProviderResult;
use super::model::{
    Appointment, CreateAppointment, DeleteAppointment, ListAppointments, UpdateAppointment,
};

/// One outbound call per method; no retries.
#[async_trait]
pub trait BookingProvider: Send + Sync {
    /// Create a booking and return it.
    async fn create_booking(&self, request: &CreateAppointment) -> ProviderResult<Appointment>;

    /// Apply a partial update and return the updated booking.
    async fn update_booking(&self, request: &UpdateAppointment) -> ProviderResult<Appointment>;

    /// Cancel a booking. Returns the provider's confirmation message, if any.
    async fn cancel_booking(&self, request: &DeleteAppointment) -> ProviderResult<Option<String>>;

    /// List bookings in a date range. An empty range is `Ok(vec![])`.
    async fn list_bookings(&self, request: &ListAppointments) -> ProviderResult<Vec<Appointment>>;
}
