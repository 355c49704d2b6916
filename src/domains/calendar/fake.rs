//! In-memory [`BookingProvider`] that records every request.

use async_trait::async_trait;
use std::sync::Mutex;

use super::error::{ProviderError, ProviderResult};
use super::model::{
    Appointment, Attendee, CreateAppointment, DeleteAppointment, ListAppointments,
    UpdateAppointment,
};
use super::provider::BookingProvider;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Create(CreateAppointment),
    Update(UpdateAppointment),
    Delete(DeleteAppointment),
    List(ListAppointments),
}

#[derive(Debug, Default)]
pub struct FakeProvider {
    calls: Mutex<Vec<RecordedCall>>,
    bookings: Vec<Appointment>,
    cancel_message: Option<String>,
    failure: Option<ProviderError>,
}

impl FakeProvider {
    pub fn with_bookings(bookings: Vec<Appointment>) -> Self {
        Self {
            bookings,
            ..Self::default()
        }
    }

    pub fn with_cancel_message(message: &str) -> Self {
        Self {
            cancel_message: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> ProviderResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

/// A booking shaped like a Cal.com response.
pub fn sample_booking(id: i64) -> Appointment {
    Appointment {
        id,
        event_type_id: Some(7),
        start_time: Some("2025-03-10T10:00:00.000Z".to_string()),
        end_time: Some("2025-03-10T10:30:00.000Z".to_string()),
        status: Some("ACCEPTED".to_string()),
        attendees: vec![Attendee {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }],
        notes: None,
    }
}

#[async_trait]
impl BookingProvider for FakeProvider {
    async fn create_booking(&self, request: &CreateAppointment) -> ProviderResult<Appointment> {
        self.record(RecordedCall::Create(request.clone()))?;
        Ok(Appointment {
            event_type_id: Some(request.event_type_id),
            ..sample_booking(101)
        })
    }

    async fn update_booking(&self, request: &UpdateAppointment) -> ProviderResult<Appointment> {
        self.record(RecordedCall::Update(request.clone()))?;
        Ok(sample_booking(request.booking_id))
    }

    async fn cancel_booking(&self, request: &DeleteAppointment) -> ProviderResult<Option<String>> {
        self.record(RecordedCall::Delete(request.clone()))?;
        Ok(self.cancel_message.clone())
    }

    async fn list_bookings(&self, request: &ListAppointments) -> ProviderResult<Vec<Appointment>> {
        self.record(RecordedCall::List(request.clone()))?;
        Ok(self.bookings.clone())
    }
}
