use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::project::ProjectProperties;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
    ElapsedMinutes,
    ElapsedHours,
    ElapsedDays,
    ElapsedWeeks,
    ElapsedMonths,
    ElapsedYears,
    Percent,
    ElapsedPercent,
}

impl TimeUnit {
    /// Map an MSPDI `DurationFormat` code. Estimated codes sit 32 above the
    /// plain ones; null and unknown codes fall back to days.
    pub fn from_duration_format(code: i32) -> Self {
        let code = if (35..=52).contains(&code) { code - 32 } else { code };
        match code {
            3 => TimeUnit::Minutes,
            4 => TimeUnit::ElapsedMinutes,
            5 => TimeUnit::Hours,
            6 => TimeUnit::ElapsedHours,
            8 => TimeUnit::ElapsedDays,
            9 => TimeUnit::Weeks,
            10 => TimeUnit::ElapsedWeeks,
            11 => TimeUnit::Months,
            12 => TimeUnit::ElapsedMonths,
            19 => TimeUnit::Percent,
            20 => TimeUnit::ElapsedPercent,
            _ => TimeUnit::Days,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Weeks => "w",
            TimeUnit::Months => "mo",
            TimeUnit::Years => "y",
            TimeUnit::ElapsedMinutes => "em",
            TimeUnit::ElapsedHours => "eh",
            TimeUnit::ElapsedDays => "ed",
            TimeUnit::ElapsedWeeks => "ew",
            TimeUnit::ElapsedMonths => "emo",
            TimeUnit::ElapsedYears => "ey",
            TimeUnit::Percent => "%",
            TimeUnit::ElapsedPercent => "e%",
        }
    }

    /// Number of minutes in one of this unit under the project's calendar.
    fn minutes(&self, properties: &ProjectProperties) -> f64 {
        let per_day = f64::from(properties.minutes_per_day);
        let per_week = f64::from(properties.minutes_per_week);
        match self {
            TimeUnit::Minutes | TimeUnit::ElapsedMinutes => 1.0,
            TimeUnit::Hours | TimeUnit::Percent => 60.0,
            TimeUnit::ElapsedHours | TimeUnit::ElapsedPercent => 60.0,
            TimeUnit::Days => per_day,
            TimeUnit::Weeks => per_week,
            TimeUnit::Months => per_day * f64::from(properties.days_per_month),
            TimeUnit::Years => per_week * 52.0,
            TimeUnit::ElapsedDays => 1440.0,
            TimeUnit::ElapsedWeeks => 1440.0 * 7.0,
            TimeUnit::ElapsedMonths => 1440.0 * 30.0,
            TimeUnit::ElapsedYears => 1440.0 * 365.0,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration {
    pub value: f64,
    pub units: TimeUnit,
}

impl Duration {
    pub fn new(value: f64, units: TimeUnit) -> Self {
        Self { value, units }
    }

    /// Build a duration from an ISO-8601 time span such as `PT40H0M0S`,
    /// expressed in `units`. Returns `None` when the text is not a duration.
    pub fn from_iso8601(
        text: &str,
        units: TimeUnit,
        properties: &ProjectProperties,
    ) -> Option<Self> {
        let minutes = iso8601_minutes(text)?;
        Some(Self::new(minutes / units.minutes(properties), units))
    }
}

impl fmt::Display for Duration {
    // Debug formatting of f64 always keeps a fractional part ("5.0").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{}", self.value, self.units)
    }
}

fn iso8601_regex() -> &'static Regex {
    static ISO8601: OnceLock<Regex> = OnceLock::new();
    ISO8601.get_or_init(|| {
        Regex::new(
            r"^(-)?P(?:([0-9.]+)D)?(?:T(?:([0-9.]+)H)?(?:([0-9.]+)M)?(?:([0-9.]+)S)?)?$",
        )
        .unwrap()
    })
}

fn iso8601_minutes(text: &str) -> Option<f64> {
    let captures = iso8601_regex().captures(text.trim())?;
    let part = |index: usize| -> Option<f64> {
        captures
            .get(index)
            .map_or(Some(0.0), |m| m.as_str().parse::<f64>().ok())
    };

    let minutes = part(2)? * 1440.0 + part(3)? * 60.0 + part(4)? + part(5)? / 60.0;
    Some(if captures.get(1).is_some() {
        -minutes
    } else {
        minutes
    })
}
