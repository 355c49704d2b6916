//! Calendar service: rate limiting in front of the booking provider.

use std::sync::Arc;
use tracing::{info, instrument};

use super::error::{CalendarError, Operation};
use super::model::{
    Appointment, CreateAppointment, DeleteAppointment, ListAppointments, UpdateAppointment,
};
use super::provider::BookingProvider;
use super::rate_limit::RateLimiter;

/// Result type for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Entry point for the four appointment operations.
///
/// Each call consumes one unit of rate budget before reaching the provider.
/// Rejected calls never reach the network.
#[derive(Clone)]
pub struct CalendarService {
    limiter: Arc<RateLimiter>,
    provider: Arc<dyn BookingProvider>,
}

impl CalendarService {
    /// Create a new calendar service.
    pub fn new(limiter: Arc<RateLimiter>, provider: Arc<dyn BookingProvider>) -> Self {
        Self { limiter, provider }
    }

    /// The shared rate limiter.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    fn consume(&self) -> CalendarResult<()> {
        self.limiter
            .check_and_consume()
            .map_err(CalendarError::RateLimitExceeded)
    }

    /// Create a booking.
    #[instrument(skip_all)]
    pub async fn add_appointment(&self, request: &CreateAppointment) -> CalendarResult<Appointment> {
        self.consume()?;
        let booking = self
            .provider
            .create_booking(request)
            .await
            .map_err(|e| CalendarError::provider(Operation::Create, e))?;
        info!(booking_id = booking.id, "Appointment created");
        Ok(booking)
    }

    /// Apply a partial update to a booking.
    #[instrument(skip_all)]
    pub async fn update_appointment(
        &self,
        request: &UpdateAppointment,
    ) -> CalendarResult<Appointment> {
        self.consume()?;
        let booking = self
            .provider
            .update_booking(request)
            .await
            .map_err(|e| CalendarError::provider(Operation::Update, e))?;
        info!(booking_id = booking.id, "Appointment updated");
        Ok(booking)
    }

    /// Cancel a booking, returning the provider's message if it sent one.
    #[instrument(skip_all)]
    pub async fn delete_appointment(
        &self,
        request: &DeleteAppointment,
    ) -> CalendarResult<Option<String>> {
        self.consume()?;
        let message = self
            .provider
            .cancel_booking(request)
            .await
            .map_err(|e| CalendarError::provider(Operation::Delete, e))?;
        info!(booking_id = request.booking_id, "Appointment deleted");
        Ok(message)
    }

    /// List bookings within a date range.
    #[instrument(skip_all)]
    pub async fn list_appointments(
        &self,
        request: &ListAppointments,
    ) -> CalendarResult<Vec<Appointment>> {
        self.consume()?;
        let bookings = self
            .provider
            .list_bookings(request)
            .await
            .map_err(|e| CalendarError::provider(Operation::List, e))?;
        info!(count = bookings.len(), "Appointments listed");
        Ok(bookings)
    }
}
