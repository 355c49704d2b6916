//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod calcom;

pub use calcom::{
    AddAppointmentParams, AddAppointmentTool, DeleteAppointmentParams, DeleteAppointmentTool,
    ListAppointmentsParams, ListAppointmentsTool, UpdateAppointmentParams, UpdateAppointmentTool,
};
