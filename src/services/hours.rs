use chrono::{Datelike, NaiveDateTime};
use upick_entity::working_hours::{self, DayOfWeek};

/// Where a working-hour entry stands relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    /// Entry matches the reference day and its time range covers the
    /// reference time (inclusive at both ends).
    Open,
    /// Entry matches the reference day but the reference time falls
    /// outside its range.
    Closed,
    /// Entry is for a different day than the reference instant.
    OtherDay,
    /// Entry matches the reference day but is missing an opening or
    /// closing time, so open/closed cannot be decided.
    Unknown,
}

impl OpenStatus {
    /// The per-entry `is_open` flag: `null` for other-day and undecidable
    /// entries.
    pub fn flag(self) -> Option<bool> {
        match self {
            Self::Open => Some(true),
            Self::Closed => Some(false),
            Self::OtherDay | Self::Unknown => None,
        }
    }

    pub fn is_same_day(self) -> bool {
        !matches!(self, Self::OtherDay)
    }
}

/// Classify one working-hour entry against an explicit reference instant.
///
/// The instant is always threaded in by the caller so filter and shaping
/// paths agree on "now" and tests can pin it.
pub fn evaluate(entry: &working_hours::Model, at: NaiveDateTime) -> OpenStatus {
    if entry.day != DayOfWeek::from_weekday(at.weekday()) {
        return OpenStatus::OtherDay;
    }
    match (entry.opening_time, entry.closing_time) {
        (Some(opening), Some(closing)) => {
            let now = at.time();
            if opening <= now && now <= closing {
                OpenStatus::Open
            } else {
                OpenStatus::Closed
            }
        }
        _ => {
            tracing::warn!(
                working_hour_id = %entry.id,
                farm_id = %entry.farm_id,
                "working hour entry has a null opening or closing time"
            );
            OpenStatus::Unknown
        }
    }
}
