use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::agenda::AgendaWindow;
use crate::error::GraphError;
use crate::models::Event;

pub const GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Request header asking Graph to report event times in UTC.
pub const PREFER_UTC: &str = "outlook.timezone=\"UTC\"";

// ============================================================================
// Calendar View
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarViewResponse {
    pub value: Vec<Event>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// First page URL of `/me/calendarview` for `window`.
pub fn calendar_view_url(window: &AgendaWindow) -> String {
    let start = window.start.to_rfc3339_opts(SecondsFormat::Secs, true);
    let end = window.end().to_rfc3339_opts(SecondsFormat::Secs, true);

    format!(
        "{}/me/calendarview?startdatetime={}&enddatetime={}&$orderby={}",
        GRAPH_BASE_URL,
        urlencoding::encode(&start),
        urlencoding::encode(&end),
        urlencoding::encode("start/dateTime"),
    )
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphErrorResponse {
    pub error: GraphErrorBody,
}

/// Map a non-success Graph response to an error.
pub fn error_from_response(status: u16, body: &str) -> GraphError {
    if status == 401 {
        return GraphError::Unauthorized;
    }

    let message = match serde_json::from_str::<GraphErrorResponse>(body) {
        Ok(response) => format!("{}: {}", response.error.code, response.error.message),
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    };

    GraphError::Status { status, message }
}
