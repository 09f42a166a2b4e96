use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Graph `dateTimeTimeZone`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeTimeZone {
    pub date_time: String,
    pub time_zone: String,
}

impl DateTimeTimeZone {
    pub fn utc(value: DateTime<Utc>) -> Self {
        Self {
            // Graph writes seven fractional digits (100ns ticks)
            date_time: format!(
                "{}.{:07}",
                value.format("%Y-%m-%dT%H:%M:%S"),
                value.timestamp_subsec_nanos() / 100
            ),
            time_zone: "UTC".to_string(),
        }
    }

    /// Interpret the value as a UTC instant.
    ///
    /// Calendar views are requested with `Prefer: outlook.timezone="UTC"`, so
    /// any other zone indicates a response this client did not ask for.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, GraphError> {
        if !self.time_zone.eq_ignore_ascii_case("UTC") {
            return Err(GraphError::UnsupportedTimeZone(self.time_zone.clone()));
        }

        NaiveDateTime::parse_from_str(&self.date_time, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| GraphError::Parse(format!("invalid dateTime {:?}: {}", self.date_time, e)))
    }

    /// Calendar date as written, ignoring the zone. Used for all-day events.
    pub fn date(&self) -> Result<NaiveDate, GraphError> {
        let date = self.date_time.get(..10).unwrap_or(&self.date_time);
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| GraphError::Parse(format!("invalid date {:?}: {}", self.date_time, e)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddress {
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email_address: EmailAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub display_name: Option<String>,
}

/// Free/busy status shown for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShowAs {
    Free,
    Tentative,
    Busy,
    Oof,
    WorkingElsewhere,
    #[serde(other)]
    Unknown,
}

impl ShowAs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Tentative => "tentative",
            Self::Busy => "busy",
            Self::Oof => "oof",
            Self::WorkingElsewhere => "working-elsewhere",
            Self::Unknown => "unknown",
        }
    }
}

/// Graph calendar `event`, trimmed to what the agenda renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub subject: Option<String>,
    pub body_preview: Option<String>,
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub is_cancelled: bool,
    pub location: Option<Location>,
    pub organizer: Option<Recipient>,
    pub web_link: Option<String>,
    pub show_as: Option<ShowAs>,
}

impl Event {
    pub fn title(&self) -> &str {
        match self.subject.as_deref() {
            Some(subject) if !subject.trim().is_empty() => subject,
            _ => "(No title)",
        }
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|location| location.display_name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }

    pub fn organizer_name(&self) -> Option<&str> {
        let address = &self.organizer.as_ref()?.email_address;
        address.name.as_deref().or(address.address.as_deref())
    }
}
