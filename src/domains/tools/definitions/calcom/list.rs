//! Cal.com appointment listing tool.

use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::common::{or_missing, tool_model};
use crate::domains::calendar::model::{ListAppointments, parse_date};
use crate::domains::calendar::{Appointment, CalendarService};
use crate::domains::tools::ToolError;

/// Text returned when the range holds no bookings.
pub const NO_APPOINTMENTS: &str = "No appointments found for the selected date range.";

const SEPARATOR: &str = "\n---\n";

/// Parameters for listing appointments.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListAppointmentsParams {
    #[schemars(description = "Start date in YYYY-MM-DD format")]
    pub start_date: String,

    #[schemars(description = "End date in YYYY-MM-DD format")]
    pub end_date: String,
}

impl ListAppointmentsParams {
    /// Validate the range and build the provider request.
    pub fn into_request(self) -> Result<ListAppointments, ToolError> {
        let start_date = parse_date(&self.start_date)
            .map_err(|reason| ToolError::invalid_value("startDate", reason))?;
        let end_date = parse_date(&self.end_date)
            .map_err(|reason| ToolError::invalid_value("endDate", reason))?;

        if end_date < start_date {
            return Err(ToolError::invalid_value(
                "endDate",
                format!("{end_date} is before startDate {start_date}"),
            ));
        }

        Ok(ListAppointments {
            start_date,
            end_date,
        })
    }
}

/// Lists Cal.com bookings within a date range.
#[derive(Debug, Clone)]
pub struct ListAppointmentsTool;

impl ListAppointmentsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calcom_list_appointments";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Lists appointments from Cal.com calendar. \
        Can be filtered by date range. \
        Returns a list of appointments with their details. ";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<ListAppointmentsParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(start_date = %params.start_date, end_date = %params.end_date))]
    pub async fn execute(
        params: ListAppointmentsParams,
        service: &CalendarService,
    ) -> Result<String, ToolError> {
        let request = params.into_request()?;
        let bookings = service.list_appointments(&request).await?;
        Ok(Self::format_listing(&bookings))
    }

    fn format_listing(bookings: &[Appointment]) -> String {
        if bookings.is_empty() {
            return NO_APPOINTMENTS.to_string();
        }

        bookings
            .iter()
            .map(Self::format_booking)
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    fn format_booking(booking: &Appointment) -> String {
        let attendees = booking
            .attendees
            .iter()
            .map(|a| format!("{} ({})", a.name, a.email))
            .collect::<Vec<_>>()
            .join(", ");
        let notes = booking
            .notes
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(|n| format!("Notes: {n}"))
            .unwrap_or_default();

        format!(
            "\nID: {}\n\
             Event Type: {}\n\
             Status: {}\n\
             Start Time: {}\n\
             End Time: {}\n\
             Attendees: {}\n\
             {} \n",
            booking.id,
            or_missing(booking.event_type_id),
            or_missing(booking.status.as_deref()),
            or_missing(booking.start_time.as_deref()),
            or_missing(booking.end_time.as_deref()),
            attendees,
            notes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::calendar::fake::sample_booking;
    use serde_json::json;

    #[test]
    fn test_empty_listing() {
        assert_eq!(ListAppointmentsTool::format_listing(&[]), NO_APPOINTMENTS);
    }

    #[test]
    fn test_single_booking_layout() {
        let mut booking = sample_booking(9);
        booking.notes = Some("Agenda attached".to_string());
        assert_eq!(
            ListAppointmentsTool::format_listing(&[booking]),
            "\nID: 9\nEvent Type: 7\nStatus: ACCEPTED\n\
             Start Time: 2025-03-10T10:00:00.000Z\nEnd Time: 2025-03-10T10:30:00.000Z\n\
             Attendees: Ada Lovelace (ada@example.com)\nNotes: Agenda attached \n"
        );
    }

    #[test]
    fn test_bookings_are_separated() {
        let text = ListAppointmentsTool::format_listing(&[sample_booking(1), sample_booking(2)]);
        assert_eq!(text.matches(SEPARATOR).count(), 1);
        assert!(text.contains("ID: 1\n"));
        assert!(text.contains("ID: 2\n"));
        // No notes: the notes line is just the trailing space.
        assert!(text.contains("(ada@example.com)\n \n"));
    }

    #[test]
    fn test_multiple_attendees_are_comma_joined() {
        let mut booking = sample_booking(3);
        booking.attendees.push(crate::domains::calendar::model::Attendee {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
        });
        let text = ListAppointmentsTool::format_listing(&[booking]);
        assert!(text.contains("Attendees: Ada Lovelace (ada@example.com), Grace (grace@example.com)"));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let params: ListAppointmentsParams = serde_json::from_value(json!({
            "startDate": "2025-03-31",
            "endDate": "2025-03-01"
        }))
        .unwrap();
        assert!(matches!(
            params.into_request(),
            Err(ToolError::InvalidValue { field: "endDate", .. })
        ));
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let params: ListAppointmentsParams = serde_json::from_value(json!({
            "startDate": "March 1st",
            "endDate": "2025-03-01"
        }))
        .unwrap();
        let err = params.into_request().unwrap_err();
        assert!(err.to_string().starts_with("Invalid value for startDate:"));
    }
}
