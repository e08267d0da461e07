//! In-memory project graph produced by a [`ProjectReader`](crate::reader::ProjectReader).

use chrono::{NaiveDateTime, Timelike};

use crate::duration::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectProperties {
    pub name: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub finish_date: Option<NaiveDateTime>,
    pub minutes_per_day: u32,
    pub minutes_per_week: u32,
    pub days_per_month: u32,
}

impl Default for ProjectProperties {
    fn default() -> Self {
        Self {
            name: None,
            start_date: None,
            finish_date: None,
            minutes_per_day: 480,
            minutes_per_week: 2400,
            days_per_month: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Task {
    pub unique_id: Option<i32>,
    pub id: Option<i32>,
    pub wbs: Option<String>,
    pub name: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub finish: Option<NaiveDateTime>,
    pub duration: Option<Duration>,
    pub percent_complete: Option<f64>,
    pub outline_level: Option<i32>,
    pub summary: bool,
    pub milestone: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    pub unique_id: Option<i32>,
    pub id: Option<i32>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFile {
    pub properties: ProjectProperties,
    pub tasks: Vec<Task>,
    pub resources: Vec<Resource>,
}

/// Render a date-time the way `java.time.LocalDateTime` prints it: seconds
/// are only shown when non-zero.
pub fn format_date_time(value: &NaiveDateTime) -> String {
    if value.second() == 0 && value.nanosecond() == 0 {
        value.format("%Y-%m-%dT%H:%M").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
