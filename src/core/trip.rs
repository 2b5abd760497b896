//! # Trip Requests
//!
//! The data a visitor enters in the trip planner, validated into a
//! `TripRequest` the planner backend can act on.
//!
//! ```text
//! TripDraft (raw form text)  →  validate()  →  TripRequest
//! ```
//!
//! Derived values (`visit_date`, `transportation_label`, `time_window`)
//! follow the backend's own mapping so the summary shown in the UI matches
//! what the planner will see. That only holds because the visit time goes
//! over the wire as [`VisitTime::wire_value`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Group size used when the field is left blank.
pub const DEFAULT_GROUP_SIZE: &str = "1 person";

/// Date format accepted by the planner form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Part of the day the visitor wants to travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitTime {
    Morning,
    Afternoon,
    Evening,
}

impl VisitTime {
    pub const ALL: [VisitTime; 3] = [VisitTime::Morning, VisitTime::Afternoon, VisitTime::Evening];

    pub fn label(self) -> &'static str {
        match self {
            VisitTime::Morning => "Morning",
            VisitTime::Afternoon => "Afternoon",
            VisitTime::Evening => "Evening",
        }
    }

    /// The word the planning server matches on. Its scheduler starts the day
    /// at 14:00 when the value contains "오후" and at 10:00 otherwise.
    pub fn wire_value(self) -> &'static str {
        match self {
            VisitTime::Morning => "오전",
            VisitTime::Afternoon => "오후",
            VisitTime::Evening => "저녁",
        }
    }

    /// Cycle forward through `None → Morning → Afternoon → Evening → None`.
    pub fn cycle_next(current: Option<VisitTime>) -> Option<VisitTime> {
        match current {
            None => Some(VisitTime::Morning),
            Some(VisitTime::Morning) => Some(VisitTime::Afternoon),
            Some(VisitTime::Afternoon) => Some(VisitTime::Evening),
            Some(VisitTime::Evening) => None,
        }
    }

    /// Cycle backward; inverse of [`cycle_next`](Self::cycle_next).
    pub fn cycle_prev(current: Option<VisitTime>) -> Option<VisitTime> {
        match current {
            None => Some(VisitTime::Evening),
            Some(VisitTime::Evening) => Some(VisitTime::Afternoon),
            Some(VisitTime::Afternoon) => Some(VisitTime::Morning),
            Some(VisitTime::Morning) => None,
        }
    }
}

/// A way of getting around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Walk,
    Transit,
    Car,
    Bike,
}

impl Transport {
    pub const ALL: [Transport; 4] = [Transport::Walk, Transport::Transit, Transport::Car, Transport::Bike];

    pub fn label(self) -> &'static str {
        match self {
            Transport::Walk => "Walking",
            Transport::Transit => "Public transit",
            Transport::Car => "Car",
            Transport::Bike => "Bicycle",
        }
    }

    /// Add or remove `self` from `modes`, keeping canonical order.
    pub fn toggle_in(self, modes: &mut Vec<Transport>) {
        if let Some(pos) = modes.iter().position(|m| *m == self) {
            modes.remove(pos);
        } else {
            modes.push(self);
            modes.sort();
        }
    }
}

/// Start/end of the day's itinerary, in minutes of total duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_time: &'static str,
    pub end_time: &'static str,
    pub total_minutes: u32,
}

/// Raw, unvalidated form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripDraft {
    pub theme: String,
    pub location: String,
    pub group_size: String,
    pub start_date: String,
    pub end_date: String,
    pub visit_time: Option<VisitTime>,
    /// Kept in `Transport::ALL` order.
    pub transportation: Vec<Transport>,
    pub custom_transport: String,
}

impl TripDraft {
    pub fn toggle_transport(&mut self, mode: Transport) {
        mode.toggle_in(&mut self.transportation);
    }

    pub fn validate(&self) -> Result<TripRequest, TripError> {
        let theme = self.theme.trim();
        if theme.is_empty() {
            return Err(TripError::MissingTheme);
        }
        let location = self.location.trim();
        if location.is_empty() {
            return Err(TripError::MissingLocation);
        }

        let start_raw = self.start_date.trim();
        if start_raw.is_empty() {
            return Err(TripError::MissingStartDate);
        }
        let start_date = parse_date(start_raw)?;

        let end_raw = self.end_date.trim();
        let end_date = if end_raw.is_empty() {
            None
        } else {
            let end = parse_date(end_raw)?;
            if end < start_date {
                return Err(TripError::EndBeforeStart { start: start_date, end });
            }
            Some(end)
        };

        let group_size = match self.group_size.trim() {
            "" => DEFAULT_GROUP_SIZE.to_string(),
            size => size.to_string(),
        };

        let custom_transport = Some(self.custom_transport.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(TripRequest {
            theme: theme.to_string(),
            location: location.to_string(),
            group_size,
            start_date,
            end_date,
            visit_time: self.visit_time,
            transportation: self.transportation.clone(),
            custom_transport,
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, TripError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| TripError::InvalidDate(raw.to_string()))
}

/// A validated trip request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub theme: String,
    pub location: String,
    pub group_size: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub visit_time: Option<VisitTime>,
    pub transportation: Vec<Transport>,
    pub custom_transport: Option<String>,
}

impl TripRequest {
    /// `"2025-09-16"` for a single day, `"2025-09-16 ~ 2025-09-18"` for a range.
    pub fn visit_date(&self) -> String {
        let start = self.start_date.format(DATE_FORMAT).to_string();
        match self.end_date {
            Some(end) if end != self.start_date => {
                format!("{} ~ {}", start, end.format(DATE_FORMAT))
            }
            _ => start,
        }
    }

    /// Selected modes followed by the custom entry, comma separated.
    pub fn transportation_label(&self) -> String {
        self.transportation
            .iter()
            .map(|m| m.label().to_string())
            .chain(self.custom_transport.iter().cloned())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Only defined when a visit time was chosen.
    pub fn time_window(&self) -> Option<TimeWindow> {
        self.visit_time.map(|time| TimeWindow {
            start_time: if time == VisitTime::Afternoon { "14:00" } else { "10:00" },
            end_time: "20:00",
            total_minutes: 360,
        })
    }

    /// One-line summary for the status bar.
    pub fn summary(&self) -> String {
        format!("{} in {} ({})", self.theme, self.location, self.visit_date())
    }
}

/// Validation failures for the planner form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripError {
    MissingTheme,
    MissingLocation,
    MissingStartDate,
    InvalidDate(String),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for TripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripError::MissingTheme => write!(f, "Please enter a travel theme"),
            TripError::MissingLocation => write!(f, "Please enter a location"),
            TripError::MissingStartDate => write!(f, "Please enter a start date"),
            TripError::InvalidDate(raw) => write!(f, "'{raw}' is not a date (use YYYY-MM-DD)"),
            TripError::EndBeforeStart { start, end } => {
                write!(f, "End date {end} is before start date {start}")
            }
        }
    }
}

impl std::error::Error for TripError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TripDraft {
        TripDraft {
            theme: "Rainy day indoor date".to_string(),
            location: "Seoul".to_string(),
            start_date: "2025-09-16".to_string(),
            ..Default::default()
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_minimal_draft_validates_with_defaults() {
        let req = draft().validate().unwrap();
        assert_eq!(req.theme, "Rainy day indoor date");
        assert_eq!(req.group_size, DEFAULT_GROUP_SIZE);
        assert_eq!(req.end_date, None);
        assert!(req.transportation.is_empty());
        assert_eq!(req.custom_transport, None);
    }

    #[test]
    fn test_blank_theme_rejected() {
        let mut d = draft();
        d.theme = "   ".to_string();
        assert_eq!(d.validate(), Err(TripError::MissingTheme));
    }

    #[test]
    fn test_blank_location_rejected() {
        let mut d = draft();
        d.location.clear();
        assert_eq!(d.validate(), Err(TripError::MissingLocation));
    }

    #[test]
    fn test_missing_and_malformed_dates() {
        let mut d = draft();
        d.start_date.clear();
        assert_eq!(d.validate(), Err(TripError::MissingStartDate));

        d.start_date = "16/09/2025".to_string();
        assert_eq!(d.validate(), Err(TripError::InvalidDate("16/09/2025".to_string())));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut d = draft();
        d.end_date = "2025-09-10".to_string();
        assert_eq!(
            d.validate(),
            Err(TripError::EndBeforeStart {
                start: date("2025-09-16"),
                end: date("2025-09-10"),
            })
        );
    }

    #[test]
    fn test_visit_date_single_day_and_range() {
        let mut d = draft();
        assert_eq!(d.validate().unwrap().visit_date(), "2025-09-16");

        d.end_date = "2025-09-16".to_string();
        assert_eq!(d.validate().unwrap().visit_date(), "2025-09-16");

        d.end_date = "2025-09-18".to_string();
        assert_eq!(d.validate().unwrap().visit_date(), "2025-09-16 ~ 2025-09-18");
    }

    #[test]
    fn test_transportation_label_appends_custom() {
        let mut d = draft();
        d.toggle_transport(Transport::Car);
        d.toggle_transport(Transport::Walk);
        d.custom_transport = " Ferry ".to_string();
        let req = d.validate().unwrap();
        assert_eq!(req.transportation, vec![Transport::Walk, Transport::Car]);
        assert_eq!(req.transportation_label(), "Walking, Car, Ferry");
    }

    #[test]
    fn test_toggle_transport_removes_existing() {
        let mut d = draft();
        d.toggle_transport(Transport::Bike);
        d.toggle_transport(Transport::Bike);
        assert!(d.transportation.is_empty());
    }

    #[test]
    fn test_time_window_follows_visit_time() {
        let mut d = draft();
        assert_eq!(d.validate().unwrap().time_window(), None);

        d.visit_time = Some(VisitTime::Afternoon);
        let window = d.validate().unwrap().time_window().unwrap();
        assert_eq!(window.start_time, "14:00");
        assert_eq!(window.end_time, "20:00");
        assert_eq!(window.total_minutes, 360);

        d.visit_time = Some(VisitTime::Evening);
        assert_eq!(d.validate().unwrap().time_window().unwrap().start_time, "10:00");
    }

    #[test]
    fn test_visit_time_cycles_through_unset() {
        let mut current = None;
        for _ in 0..4 {
            current = VisitTime::cycle_next(current);
        }
        assert_eq!(current, None);
        assert_eq!(VisitTime::cycle_prev(None), Some(VisitTime::Evening));
        assert_eq!(VisitTime::cycle_prev(Some(VisitTime::Morning)), None);
    }
}
