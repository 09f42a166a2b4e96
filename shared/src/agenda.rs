//! Agenda window and day grouping.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::error::GraphError;
use crate::models::{DateTimeTimeZone, EmailAddress, Event, Location, Recipient, ShowAs};

/// Span of whole local days shown by the agenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgendaWindow {
    /// Local midnight of the first day, as a UTC instant.
    pub start: DateTime<Utc>,
    pub days: u32,
    /// Viewer's UTC offset.
    pub offset: FixedOffset,
}

impl AgendaWindow {
    pub fn from_day(date: NaiveDate, offset: FixedOffset, days: u32) -> Self {
        let midnight = date.and_time(NaiveTime::MIN);
        let start = (midnight - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc();
        Self {
            start,
            days,
            offset,
        }
    }

    /// Window starting today in the viewer's offset.
    pub fn starting_today(now: DateTime<Utc>, offset: FixedOffset, days: u32) -> Self {
        Self::from_day(now.with_timezone(&offset).date_naive(), offset, days)
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::days(i64::from(self.days))
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.with_timezone(&self.offset).date_naive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaEntry {
    pub event: Event,
    pub day: NaiveDate,
    /// `None` for all-day events.
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

impl AgendaEntry {
    pub fn is_all_day(&self) -> bool {
        self.start.is_none()
    }

    pub fn time_label(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
            }
            _ => "All day".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub entries: Vec<AgendaEntry>,
}

impl AgendaDay {
    pub fn heading(&self) -> String {
        self.date.format("%A, %B %-d").to_string()
    }
}

fn to_entry(event: Event, offset: FixedOffset) -> Result<AgendaEntry, GraphError> {
    if event.is_all_day {
        let day = event.start.date()?;
        return Ok(AgendaEntry {
            event,
            day,
            start: None,
            end: None,
        });
    }

    let start = event.start.to_utc()?.with_timezone(&offset);
    let end = event.end.to_utc()?.with_timezone(&offset);
    Ok(AgendaEntry {
        day: start.date_naive(),
        event,
        start: Some(start),
        end: Some(end),
    })
}

/// Group events by the viewer's local date.
///
/// Days come out in ascending order; within a day all-day events come first,
/// then timed events by start. Cancelled events and events whose times
/// cannot be read are dropped.
pub fn group_by_day(events: Vec<Event>, offset: FixedOffset) -> Vec<AgendaDay> {
    let mut days: BTreeMap<NaiveDate, Vec<AgendaEntry>> = BTreeMap::new();

    for event in events {
        if event.is_cancelled {
            continue;
        }

        let id = event.id.clone();
        match to_entry(event, offset) {
            Ok(entry) => days.entry(entry.day).or_default().push(entry),
            Err(e) => tracing::warn!(event = %id, error = %e, "skipping agenda event"),
        }
    }

    days.into_iter()
        .map(|(date, mut entries)| {
            entries.sort_by_key(|entry| (!entry.is_all_day(), entry.start));
            AgendaDay { date, entries }
        })
        .collect()
}

/// Canned events for the mock provider, a few per day of `window`.
pub fn sample_events(window: &AgendaWindow) -> Vec<Event> {
    let mut events = Vec::new();

    for day in 0..window.days {
        let midnight = window.start + Duration::days(i64::from(day));

        events.push(sample_event(
            format!("mock-{day}-standup"),
            "Team stand-up",
            midnight + Duration::hours(9),
            Duration::minutes(15),
            None,
        ));
        events.push(sample_event(
            format!("mock-{day}-review"),
            "Design review",
            midnight + Duration::hours(14),
            Duration::hours(1),
            Some("Conference Room 2"),
        ));
    }

    if window.days > 0 {
        let date = window.first_day();
        let mut offsite = sample_event(
            "mock-offsite".to_string(),
            "Team offsite",
            window.start,
            Duration::days(1),
            Some("Main campus"),
        );
        offsite.is_all_day = true;
        offsite.start.date_time = format!("{}T00:00:00.0000000", date.format("%Y-%m-%d"));
        offsite.end.date_time = format!(
            "{}T00:00:00.0000000",
            (date + Duration::days(1)).format("%Y-%m-%d")
        );
        events.push(offsite);
    }

    events
}

fn sample_event(
    id: String,
    subject: &str,
    start: DateTime<Utc>,
    length: Duration,
    location: Option<&str>,
) -> Event {
    Event {
        id,
        subject: Some(subject.to_string()),
        body_preview: None,
        start: DateTimeTimeZone::utc(start),
        end: DateTimeTimeZone::utc(start + length),
        is_all_day: false,
        is_cancelled: false,
        location: location.map(|name| Location {
            display_name: Some(name.to_string()),
        }),
        organizer: Some(Recipient {
            email_address: EmailAddress {
                name: Some("Megan Bowen".to_string()),
                address: Some("meganb@contoso.com".to_string()),
            },
        }),
        web_link: None,
        show_as: Some(ShowAs::Busy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timed(id: &str, start: DateTime<Utc>, minutes: i64) -> Event {
        sample_event(id.to_string(), id, start, Duration::minutes(minutes), None)
    }

    #[test]
    fn test_window_from_day() {
        let window = AgendaWindow::from_day(date(2026, 10, 14), offset(-7), 3);

        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 10, 14, 7, 0, 0).unwrap());
        assert_eq!(window.end(), Utc.with_ymd_and_hms(2026, 10, 17, 7, 0, 0).unwrap());
        assert_eq!(window.first_day(), date(2026, 10, 14));
    }

    #[test]
    fn test_window_starting_today_uses_local_date() {
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 23, 30, 0).unwrap();

        let window = AgendaWindow::starting_today(now, offset(2), 1);

        assert_eq!(window.first_day(), date(2026, 10, 15));
    }

    #[test]
    fn test_group_by_local_day() {
        let events = vec![
            timed("late", Utc.with_ymd_and_hms(2026, 10, 14, 23, 0, 0).unwrap(), 30),
            timed("early", Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap(), 30),
        ];

        let days = group_by_day(events, offset(2));

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(2026, 10, 14));
        assert_eq!(days[0].entries[0].event.id, "early");
        assert_eq!(days[0].entries[0].time_label(), "10:00 - 10:30");
        assert_eq!(days[1].date, date(2026, 10, 15));
        assert_eq!(days[1].entries[0].time_label(), "01:00 - 01:30");
    }

    #[test]
    fn test_all_day_first_and_unshifted() {
        let mut all_day = timed("holiday", Utc.with_ymd_and_hms(2026, 10, 14, 0, 0, 0).unwrap(), 0);
        all_day.is_all_day = true;
        let events = vec![
            timed("meeting", Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap(), 60),
            all_day,
        ];

        let days = group_by_day(events, offset(-8));

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, date(2026, 10, 14));
        assert_eq!(days[0].entries[0].event.id, "holiday");
        assert_eq!(days[0].entries[0].time_label(), "All day");
        assert_eq!(days[0].entries[1].event.id, "meeting");
    }

    #[test]
    fn test_unreadable_and_cancelled_events_skipped() {
        let mut broken = timed("broken", Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap(), 30);
        broken.start.date_time = "yesterday".to_string();
        let mut cancelled =
            timed("cancelled", Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap(), 30);
        cancelled.is_cancelled = true;
        let ok = timed("ok", Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap(), 30);

        let days = group_by_day(vec![broken, cancelled, ok], offset(0));

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].entries.len(), 1);
        assert_eq!(days[0].entries[0].event.id, "ok");
    }

    #[test]
    fn test_sample_events_fill_window() {
        let window = AgendaWindow::from_day(date(2026, 10, 14), offset(3), 3);

        let days = group_by_day(sample_events(&window), window.offset);

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, date(2026, 10, 14));
        assert_eq!(days[0].entries.len(), 3);
        assert!(days[0].entries[0].is_all_day());
        assert_eq!(days[0].entries[1].time_label(), "09:00 - 09:15");
        assert_eq!(days[2].entries.len(), 2);
    }

    #[test]
    fn test_day_heading() {
        let day = AgendaDay {
            date: date(2026, 10, 14),
            entries: Vec::new(),
        };
        assert_eq!(day.heading(), "Wednesday, October 14");
    }
}
