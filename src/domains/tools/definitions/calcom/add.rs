//! Cal.com appointment creation tool.

use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::common::tool_model;
use crate::domains::calendar::model::{CreateAppointment, format_instant, parse_instant};
use crate::domains::calendar::{Appointment, CalendarService};
use crate::domains::tools::ToolError;

/// Parameters for creating an appointment.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddAppointmentParams {
    #[schemars(description = "The Cal.com event type ID")]
    pub event_type_id: i64,

    #[schemars(description = "Start time in ISO format (YYYY-MM-DDTHH:mm:ss.sssZ)")]
    pub start_time: String,

    #[schemars(description = "End time in ISO format (YYYY-MM-DDTHH:mm:ss.sssZ)")]
    pub end_time: String,

    #[schemars(description = "Attendee's name")]
    pub name: String,

    #[schemars(description = "Attendee's email")]
    pub email: String,

    #[schemars(description = "Optional notes for the appointment")]
    #[serde(default)]
    pub notes: Option<String>,
}

impl AddAppointmentParams {
    /// Validate times and build the provider request.
    pub fn into_request(self) -> Result<CreateAppointment, ToolError> {
        let start = parse_instant(&self.start_time)
            .map_err(|reason| ToolError::invalid_value("startTime", reason))?;
        let end = parse_instant(&self.end_time)
            .map_err(|reason| ToolError::invalid_value("endTime", reason))?;

        Ok(CreateAppointment {
            event_type_id: self.event_type_id,
            start,
            end,
            name: self.name,
            email: self.email,
            notes: self.notes,
        })
    }
}

/// Creates a new Cal.com booking.
#[derive(Debug, Clone)]
pub struct AddAppointmentTool;

impl AddAppointmentTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calcom_add_appointment";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Creates a new appointment in Cal.com calendar. \
        Use this for scheduling new meetings or appointments. \
        Requires event type ID, start time, end time, name, email, and optional notes. ";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<AddAppointmentParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(event_type_id = params.event_type_id))]
    pub async fn execute(
        params: AddAppointmentParams,
        service: &CalendarService,
    ) -> Result<String, ToolError> {
        let request = params.into_request()?;
        let booking = service.add_appointment(&request).await?;
        Ok(Self::format_confirmation(&booking, &request))
    }

    fn format_confirmation(booking: &Appointment, request: &CreateAppointment) -> String {
        let notes = request
            .notes
            .as_deref()
            .filter(|notes| !notes.is_empty())
            .map(|notes| format!("Notes: {notes}"))
            .unwrap_or_default();

        format!(
            "Appointment created successfully! Booking ID: {}\n\
             Event Type: {}\n\
             Start Time: {}\n\
             End Time: {}\n\
             Attendee: {} ({})\n\
             {}",
            booking.id,
            booking.event_type_id.unwrap_or(request.event_type_id),
            booking
                .start_time
                .clone()
                .unwrap_or_else(|| format_instant(&request.start)),
            booking
                .end_time
                .clone()
                .unwrap_or_else(|| format_instant(&request.end)),
            request.name,
            request.email,
            notes,
        )
    }
}
