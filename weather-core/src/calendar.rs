//! Day-boundary policies used to bucket forecast samples.
//!
//! The aggregator never asks the host for its time zone directly; callers
//! hand it a [`CalendarPolicy`] so tests can pin a zone.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::CalendarError;

/// Maps an absolute instant to the instant its civil day starts.
pub trait CalendarPolicy: Send + Sync {
    fn start_of_day(&self, at: DateTime<Utc>) -> DateTime<Utc>;

    /// Civil date of `at` in this calendar.
    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate;
}

impl<T: CalendarPolicy + ?Sized> CalendarPolicy for &T {
    fn start_of_day(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        (**self).start_of_day(at)
    }

    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        (**self).local_date(at)
    }
}

impl<T: CalendarPolicy + ?Sized> CalendarPolicy for Box<T> {
    fn start_of_day(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        (**self).start_of_day(at)
    }

    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        (**self).local_date(at)
    }
}

/// The executing host's local calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCalendar;

impl CalendarPolicy for LocalCalendar {
    fn start_of_day(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        local_midnight(&Local, at)
    }

    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }
}

/// A calendar pinned to a specific time zone.
#[derive(Debug, Clone)]
pub struct ZonedCalendar<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> ZonedCalendar<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl ZonedCalendar<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl ZonedCalendar<FixedOffset> {
    /// Calendar at a constant offset east of UTC.
    pub fn fixed(offset_secs: i32) -> Result<Self, CalendarError> {
        FixedOffset::east_opt(offset_secs)
            .map(Self::new)
            .ok_or(CalendarError::OffsetOutOfRange(offset_secs))
    }
}

impl ZonedCalendar<chrono_tz::Tz> {
    /// Calendar for an IANA zone name, e.g. `"Europe/Rome"`.
    pub fn named(name: &str) -> Result<Self, CalendarError> {
        name.parse::<chrono_tz::Tz>()
            .map(Self::new)
            .map_err(|_| CalendarError::UnknownZone(name.to_string()))
    }
}

impl<Tz> CalendarPolicy for ZonedCalendar<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    fn start_of_day(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        local_midnight(&self.tz, at)
    }

    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }
}

/// Build a calendar from an optional zone name; `None` means host local time.
pub fn calendar_for(zone: Option<&str>) -> Result<Box<dyn CalendarPolicy>, CalendarError> {
    match zone {
        None => Ok(Box::new(LocalCalendar)),
        Some(name) => Ok(Box::new(ZonedCalendar::named(name.trim())?)),
    }
}

// First existing local instant on the civil date containing `at`.
// Midnight can be skipped by a DST transition; in that case step forward
// until the zone accepts the local time. Ambiguous times resolve to the
// earlier instant.
fn local_midnight<Tz: TimeZone>(tz: &Tz, at: DateTime<Utc>) -> DateTime<Utc> {
    let date = at.with_timezone(tz).date_naive();
    let mut probe = date.and_time(NaiveTime::MIN);

    while probe.date() == date {
        if let Some(start) = tz.from_local_datetime(&probe).earliest() {
            return start.with_timezone(&Utc);
        }
        probe += Duration::minutes(15);
    }

    at
}
