//! Cal.com tools module.
//!
//! This module provides the appointment tools backed by the Cal.com API:
//! - `add`: Create a booking for one attendee
//! - `update`: Reschedule or edit a booking (partial update)
//! - `delete`: Cancel a booking
//! - `list`: List bookings in a date range
//!
//! Each tool parses its own typed parameters and renders plain-text output.

pub mod add;
pub mod common;
pub mod delete;
pub mod list;
pub mod update;

pub use add::{AddAppointmentParams, AddAppointmentTool};
pub use delete::{DeleteAppointmentParams, DeleteAppointmentTool};
pub use list::{ListAppointmentsParams, ListAppointmentsTool};
pub use update::{UpdateAppointmentParams, UpdateAppointmentTool};
