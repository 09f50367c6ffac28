use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

/// Anything that carries the instant it was recorded at.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Inclusive time window. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Window covering the last `days` days, measured from the clock at call time.
    pub fn last_n_days(days: u32) -> Self {
        Self::last_n_days_from(Utc::now(), days)
    }

    /// A window reaching past the earliest representable instant has no start.
    pub fn last_n_days_from(now: DateTime<Utc>, days: u32) -> Self {
        let start = Duration::try_days(i64::from(days)).and_then(|span| now.checked_sub_signed(span));
        Self { start, end: None }
    }

    /// Whole calendar days in `tz`, from the first instant of `start` to the
    /// last instant of `end`.
    pub fn between_days<Tz: TimeZone>(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        tz: &Tz,
    ) -> Self {
        Self {
            start: start.map(|date| start_of_day(date, tz)),
            end: end.map(|date| end_of_day(date, tz)),
        }
    }

    pub fn for_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        Self::between_days(Some(date), Some(date), tz)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| instant >= start) && self.end.is_none_or(|end| instant <= end)
    }
}

/// Keeps the entries inside `range`, in their original order.
pub fn filter_entries<E>(entries: &[E], range: &DateRange) -> Vec<E>
where
    E: Timestamped + Clone,
{
    entries
        .iter()
        .filter(|entry| range.contains(entry.timestamp()))
        .cloned()
        .collect()
}

fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    local_to_utc(date.and_time(chrono::NaiveTime::MIN), tz, true)
}

fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let last = date
        .and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
    local_to_utc(last, tz, false)
}

// DST gaps have no local mapping; fall back to reading the wall time as UTC.
fn local_to_utc<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz, earliest: bool) -> DateTime<Utc> {
    let mapped = tz.from_local_datetime(&local);
    let resolved = if earliest {
        mapped.earliest()
    } else {
        mapped.latest()
    };
    resolved
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}
