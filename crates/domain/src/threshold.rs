use crate::errors::DomainError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SubsecRound, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

pub const THRESHOLD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Instant before which content counts as stale.
///
/// Records whose last modification is strictly earlier than this instant are
/// eligible for deletion even when they are still placed in a layout. Held at
/// millisecond precision, the finest the content store compares at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeletionThreshold(DateTime<Utc>);

impl DeletionThreshold {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant.round_subsecs(3))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn is_before(&self, moment: DateTime<Utc>) -> bool {
        moment < self.0
    }

    /// Calendar date one year before `now` in `tz`, as offered to the operator
    pub fn default_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
        let today = now.with_timezone(&tz).date_naive();
        today
            .with_year(today.year() - 1)
            .or_else(|| NaiveDate::from_ymd_opt(today.year() - 1, today.month(), 28))
            .unwrap_or(today)
    }

    /// Start of `date` in `tz`
    pub fn from_date(date: NaiveDate, tz: Tz) -> Result<Self, DomainError> {
        let local = date.and_time(NaiveTime::MIN);
        let instant = tz
            .from_local_datetime(&local)
            .earliest()
            .ok_or_else(|| {
                DomainError::InvalidThreshold(format!(
                    "{} has no start of day in {}",
                    date.format(THRESHOLD_DATE_FORMAT),
                    tz
                ))
            })?;
        Ok(Self::new(instant.with_timezone(&Utc)))
    }

    /// Parse operator input: a `YYYY-MM-DD` date (start of day in `tz`) or an
    /// RFC 3339 instant.
    pub fn parse(input: &str, tz: Tz) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidThreshold(
                "threshold date cannot be empty".to_string(),
            ));
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, THRESHOLD_DATE_FORMAT) {
            return Self::from_date(date, tz);
        }

        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self::new(dt.with_timezone(&Utc)))
            .map_err(|_| {
                DomainError::InvalidThreshold(format!(
                    "'{}' is not a YYYY-MM-DD date or RFC 3339 timestamp",
                    trimmed
                ))
            })
    }
}

impl fmt::Display for DeletionThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.0.format("%Y-%m-%d %H:%M:%S UTC"),
            self.0.timestamp()
        )
    }
}
