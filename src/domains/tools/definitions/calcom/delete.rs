//! Cal.com appointment cancellation tool.

use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::common::{non_empty, tool_model};
use crate::domains::calendar::CalendarService;
use crate::domains::calendar::model::DeleteAppointment;
use crate::domains::tools::ToolError;

const DEFAULT_MESSAGE: &str = "Appointment deleted successfully!";

/// Parameters for deleting an appointment.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAppointmentParams {
    #[schemars(description = "The Cal.com booking ID to delete")]
    pub booking_id: i64,

    #[schemars(description = "Optional reason for cancellation")]
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<DeleteAppointmentParams> for DeleteAppointment {
    fn from(params: DeleteAppointmentParams) -> Self {
        Self {
            booking_id: params.booking_id,
            reason: non_empty(params.reason),
        }
    }
}

/// Cancels a Cal.com booking.
#[derive(Debug, Clone)]
pub struct DeleteAppointmentTool;

impl DeleteAppointmentTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calcom_delete_appointment";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Deletes an existing appointment from Cal.com calendar. \
        Use this for canceling appointments. \
        Requires booking ID. ";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<DeleteAppointmentParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(booking_id = params.booking_id))]
    pub async fn execute(
        params: DeleteAppointmentParams,
        service: &CalendarService,
    ) -> Result<String, ToolError> {
        let request = DeleteAppointment::from(params);
        let message = service.delete_appointment(&request).await?;
        Ok(Self::format_confirmation(message.as_deref(), &request))
    }

    fn format_confirmation(message: Option<&str>, request: &DeleteAppointment) -> String {
        let reason = request
            .reason
            .as_deref()
            .map(|reason| format!("\nReason: {reason}"))
            .unwrap_or_default();

        format!(
            "{} Booking ID: {}{}",
            message.unwrap_or(DEFAULT_MESSAGE),
            request.booking_id,
            reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(reason: Option<&str>) -> DeleteAppointment {
        DeleteAppointmentParams {
            booking_id: 55,
            reason: reason.map(str::to_string),
        }
        .into()
    }

    #[test]
    fn test_default_confirmation() {
        assert_eq!(
            DeleteAppointmentTool::format_confirmation(None, &request(None)),
            "Appointment deleted successfully! Booking ID: 55"
        );
    }

    #[test]
    fn test_provider_message_and_reason() {
        assert_eq!(
            DeleteAppointmentTool::format_confirmation(
                Some("Booking cancelled."),
                &request(Some("Double booked"))
            ),
            "Booking cancelled. Booking ID: 55\nReason: Double booked"
        );
    }

    #[test]
    fn test_empty_reason_is_dropped() {
        assert_eq!(request(Some("")).reason, None);
    }
}
