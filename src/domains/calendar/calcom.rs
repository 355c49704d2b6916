//! Cal.com v2 bookings client.
//!
//! Every request carries the API key as the `apiKey` query parameter.
//! Non-success responses are mapped to the provider's own `message` when
//! the body has one.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use super::error::{ProviderError, ProviderResult};
use super::model::{
    Appointment, CreateAppointment, DeleteAppointment, ListAppointments, UpdateAppointment,
    format_instant,
};
use super::provider::BookingProvider;
use crate::core::config::ProviderConfig;

const API_KEY_PARAM: &str = "apiKey";

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBookingBody<'a> {
    start: String,
    end: String,
    event_type_id: i64,
    time_zone: &'a str,
    language: &'a str,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    responses: BookingResponses<'a>,
}

#[derive(Debug, Serialize)]
struct BookingResponses<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateBookingBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CancelBookingBody<'a> {
    reason: &'a str,
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for the Cal.com bookings API.
pub struct CalComClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    time_zone: String,
    language: String,
    timeout_secs: u64,
}

impl std::fmt::Debug for CalComClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalComClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("time_zone", &self.time_zone)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CalComClient {
    /// Build a client with the configured timeout.
    pub fn new(api_key: impl Into<String>, config: &ProviderConfig) -> ProviderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            time_zone: config.time_zone.clone(),
            language: config.language.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Start a request against `path`, with the API key attached.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .query(&[(API_KEY_PARAM, self.api_key.as_str())])
    }

    /// Send a request and return the decoded JSON body (`Null` if empty).
    async fn send(&self, builder: RequestBuilder) -> ProviderResult<Value> {
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = error_message(status.as_u16(), &body);
            error!(status = status.as_u16(), "Cal.com request failed: {}", message);
            return Err(ProviderError::http(status.as_u16(), message));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::invalid_response(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else {
            // The URL carries the API key.
            ProviderError::Transport(error_chain(&e.without_url()))
        }
    }
}

/// Render an error followed by its `source()` chain, `: `-separated.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[async_trait]
impl BookingProvider for CalComClient {
    #[instrument(skip_all, fields(event_type_id = request.event_type_id))]
    async fn create_booking(&self, request: &CreateAppointment) -> ProviderResult<Appointment> {
        info!("Creating Cal.com booking");

        let body = CreateBookingBody {
            start: format_instant(&request.start),
            end: format_instant(&request.end),
            event_type_id: request.event_type_id,
            time_zone: &self.time_zone,
            language: &self.language,
            title: format!("Meeting with {}", request.name),
            description: request.notes.as_deref(),
            responses: BookingResponses {
                name: &request.name,
                email: &request.email,
            },
        };

        let response = self
            .send(self.request(Method::POST, "/bookings").json(&body))
            .await?;
        booking_from(&response)
    }

    #[instrument(skip_all, fields(booking_id = request.booking_id))]
    async fn update_booking(&self, request: &UpdateAppointment) -> ProviderResult<Appointment> {
        info!("Updating Cal.com booking");

        let body = UpdateBookingBody {
            start: request.start.as_ref().map(format_instant),
            end: request.end.as_ref().map(format_instant),
            description: request.notes.as_deref(),
        };
        debug!(?body, "PATCH payload");

        let path = format!("/bookings/{}", request.booking_id);
        let response = self
            .send(self.request(Method::PATCH, &path).json(&body))
            .await?;
        booking_from(&response)
    }

    #[instrument(skip_all, fields(booking_id = request.booking_id))]
    async fn cancel_booking(&self, request: &DeleteAppointment) -> ProviderResult<Option<String>> {
        info!("Deleting Cal.com booking");

        let path = format!("/bookings/{}", request.booking_id);
        let mut builder = self.request(Method::DELETE, &path);
        if let Some(reason) = request.reason.as_deref() {
            builder = builder.json(&CancelBookingBody { reason });
        }

        let response = self.send(builder).await?;
        Ok(response
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string))
    }

    #[instrument(skip_all, fields(from = %request.start_date, to = %request.end_date))]
    async fn list_bookings(&self, request: &ListAppointments) -> ProviderResult<Vec<Appointment>> {
        info!("Listing Cal.com bookings");

        let date_from = request.start_date.format("%Y-%m-%d").to_string();
        let date_to = request.end_date.format("%Y-%m-%d").to_string();

        let response = self
            .send(
                self.request(Method::GET, "/bookings")
                    .query(&[("dateFrom", date_from), ("dateTo", date_to)]),
            )
            .await?;

        match lookup(&response, "bookings") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(bookings) => serde_json::from_value(bookings.clone())
                .map_err(|e| ProviderError::invalid_response(format!("bookings: {e}"))),
        }
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Find `key` at the top level, or nested under the v2 `data` envelope.
fn lookup<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key)
        .or_else(|| body.get("data").and_then(|data| data.get(key)))
}

fn booking_from(body: &Value) -> ProviderResult<Appointment> {
    let booking = lookup(body, "booking")
        .ok_or_else(|| ProviderError::invalid_response("missing 'booking' in response"))?;
    serde_json::from_value(booking.clone())
        .map_err(|e| ProviderError::invalid_response(format!("booking: {e}")))
}

/// The provider's error message, or a generic status line.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(Value::as_str)
                .or_else(|| {
                    json.get("error")
                        .and_then(|e| e.get("message").and_then(Value::as_str).or(e.as_str()))
                })
                .map(str::to_string)
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {status}"))
}
