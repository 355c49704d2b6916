//! Cal.com appointment update tool.
//!
//! Only the fields supplied by the caller are forwarded. An empty
//! `startTime`/`endTime` counts as absent; `notes` is forwarded even when
//! empty so callers can clear them.

use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::common::{non_empty, or_missing, tool_model};
use crate::domains::calendar::model::{UpdateAppointment, parse_instant};
use crate::domains::calendar::{Appointment, CalendarService};
use crate::domains::tools::ToolError;

/// Parameters for updating an appointment.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentParams {
    #[schemars(description = "The Cal.com booking ID to update")]
    pub booking_id: i64,

    #[schemars(description = "New start time in ISO format (YYYY-MM-DDTHH:mm:ss.sssZ)")]
    #[serde(default)]
    pub start_time: Option<String>,

    #[schemars(description = "New end time in ISO format (YYYY-MM-DDTHH:mm:ss.sssZ)")]
    #[serde(default)]
    pub end_time: Option<String>,

    #[schemars(description = "New notes for the appointment")]
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdateAppointmentParams {
    /// Validate supplied times and build the provider request.
    pub fn into_request(self) -> Result<UpdateAppointment, ToolError> {
        let start = non_empty(self.start_time)
            .map(|s| parse_instant(&s))
            .transpose()
            .map_err(|reason| ToolError::invalid_value("startTime", reason))?;
        let end = non_empty(self.end_time)
            .map(|s| parse_instant(&s))
            .transpose()
            .map_err(|reason| ToolError::invalid_value("endTime", reason))?;

        Ok(UpdateAppointment {
            booking_id: self.booking_id,
            start,
            end,
            notes: self.notes,
        })
    }
}

/// Reschedules or edits an existing Cal.com booking.
#[derive(Debug, Clone)]
pub struct UpdateAppointmentTool;

impl UpdateAppointmentTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calcom_update_appointment";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Updates an existing appointment in Cal.com calendar. \
        Use this for rescheduling or modifying existing appointments. \
        Requires booking ID and the fields to update. ";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<UpdateAppointmentParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(booking_id = params.booking_id))]
    pub async fn execute(
        params: UpdateAppointmentParams,
        service: &CalendarService,
    ) -> Result<String, ToolError> {
        let request = params.into_request()?;
        let booking = service.update_appointment(&request).await?;
        Ok(Self::format_confirmation(&booking, &request))
    }

    fn format_confirmation(booking: &Appointment, request: &UpdateAppointment) -> String {
        let start = match request.start {
            Some(_) => format!("New Start Time: {}", or_missing(booking.start_time.as_deref())),
            None => String::new(),
        };
        let end = match request.end {
            Some(_) => format!("New End Time: {}", or_missing(booking.end_time.as_deref())),
            None => String::new(),
        };
        let notes = request
            .notes
            .as_deref()
            .map(|notes| format!("New Notes: {notes}"))
            .unwrap_or_default();

        format!(
            "Appointment updated successfully! Booking ID: {}\n{}\n{}\n{}",
            booking.id, start, end, notes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::calendar::fake::sample_booking;
    use serde_json::json;

    fn request(value: serde_json::Value) -> UpdateAppointment {
        serde_json::from_value::<UpdateAppointmentParams>(value)
            .unwrap()
            .into_request()
            .unwrap()
    }

    #[test]
    fn test_notes_only_update() {
        let request = request(json!({ "bookingId": 101, "notes": "Moved online" }));
        assert_eq!(request.start, None);
        assert_eq!(request.end, None);

        let text = UpdateAppointmentTool::format_confirmation(&sample_booking(101), &request);
        assert_eq!(
            text,
            "Appointment updated successfully! Booking ID: 101\n\n\nNew Notes: Moved online"
        );
    }

    #[test]
    fn test_reschedule_update() {
        let request = request(json!({
            "bookingId": 101,
            "startTime": "2025-03-10T10:00:00Z",
            "endTime": "2025-03-10T10:30:00Z"
        }));
        let text = UpdateAppointmentTool::format_confirmation(&sample_booking(101), &request);
        assert_eq!(
            text,
            "Appointment updated successfully! Booking ID: 101\n\
             New Start Time: 2025-03-10T10:00:00.000Z\n\
             New End Time: 2025-03-10T10:30:00.000Z\n"
        );
    }

    #[test]
    fn test_empty_times_are_ignored() {
        let request = request(json!({ "bookingId": 1, "startTime": "", "endTime": "" }));
        assert_eq!(request.start, None);
        assert_eq!(request.end, None);
    }

    #[test]
    fn test_empty_notes_are_kept() {
        let request = request(json!({ "bookingId": 1, "notes": "" }));
        assert_eq!(request.notes.as_deref(), Some(""));
    }

    #[test]
    fn test_invalid_end_time_is_rejected() {
        let params: UpdateAppointmentParams =
            serde_json::from_value(json!({ "bookingId": 1, "endTime": "soon" })).unwrap();
        let err = params.into_request().unwrap_err();
        assert!(matches!(err, ToolError::InvalidValue { field: "endTime", .. }));
    }
}
