use crate::time::{DateTime, SECONDS_PER_DAY};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::convert::TryFrom;

// more than 100 years, and less than u16::MAX days
const MAX_DAYS_IN_CALENDAR: u16 = 100 * 366;

/// The span of days covered by the timetable.
///
/// The engine works with day offsets from `first_date`; dates only
/// appear at the boundary, when queries and responses are converted.
pub struct Calendar {
    first_date: NaiveDate, // first date which may be allowed
    last_date: NaiveDate,  // last date (included) which may be allowed
    nb_of_days: u16,       // == (last_date - first_date).num_days() + 1
}

impl Calendar {
    pub fn new(first_date: NaiveDate, last_date: NaiveDate) -> Self {
        assert!(first_date <= last_date);
        let nb_of_days_i64 = (last_date - first_date).num_days() + 1;
        let nb_of_days = u16::try_from(nb_of_days_i64)
            .expect("trying to construct a calendar with more days than u16::MAX");
        assert!(nb_of_days <= MAX_DAYS_IN_CALENDAR);
        Self {
            first_date,
            last_date,
            nb_of_days,
        }
    }

    pub fn first_date(&self) -> NaiveDate {
        self.first_date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    pub fn nb_of_days(&self) -> u16 {
        self.nb_of_days
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.first_date <= *date && *date <= self.last_date
    }

    /// Day offset of `date` inside the calendar.
    pub fn day_of(&self, date: &NaiveDate) -> Option<i32> {
        if !self.contains(date) {
            return None;
        }
        Some((*date - self.first_date).num_days() as i32)
    }

    pub fn make_datetime(&self, datetime: &NaiveDateTime) -> Option<DateTime> {
        let day = self.day_of(&datetime.date())?;
        let seconds = datetime.time().signed_duration_since(
            chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        );
        Some(DateTime::new(day, seconds.num_seconds() as u32))
    }

    pub fn to_naive_datetime(&self, datetime: &DateTime) -> NaiveDateTime {
        let date = self.first_date + Duration::days(i64::from(datetime.date()));
        date.and_hms_opt(0, 0, 0).unwrap() + Duration::seconds(i64::from(datetime.seconds_of_day()))
    }

    pub fn to_pretty_string(&self, datetime: &DateTime) -> String {
        if datetime.is_sentinel() {
            return format!("{}", datetime);
        }
        self.to_naive_datetime(datetime)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// The days on which one vehicle journey runs, as a bitmap over the
/// calendar days. Patterns are deduplicated at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityPattern {
    allowed_days: Vec<bool>,
}

impl ValidityPattern {
    pub(crate) fn new(allowed_days: Vec<bool>) -> Self {
        Self { allowed_days }
    }

    /// Is the journey allowed to run on this calendar day ?
    pub fn is_allowed(&self, day: i32) -> bool {
        if day < 0 {
            return false;
        }
        self.allowed_days.get(day as usize).copied().unwrap_or(false)
    }

    /// Is the journey allowed on this day or one of its neighbors ?
    /// Used for route-level validity, where a journey starting the
    /// previous day may still be boardable after midnight.
    pub fn is_allowed_nearby(&self, day: i32) -> bool {
        self.is_allowed(day - 1) || self.is_allowed(day) || self.is_allowed(day + 1)
    }
}

/// Seconds needed to walk `distance` meters at the regulatory
/// pedestrian speed.
pub fn walking_duration(distance_meters: f64) -> u32 {
    (distance_meters / crate::WALKING_SPEED) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_offsets() {
        let calendar = Calendar::new(
            NaiveDate::from_ymd(2020, 1, 1),
            NaiveDate::from_ymd(2020, 1, 31),
        );
        assert_eq!(calendar.nb_of_days(), 31);
        assert_eq!(calendar.day_of(&NaiveDate::from_ymd(2020, 1, 1)), Some(0));
        assert_eq!(calendar.day_of(&NaiveDate::from_ymd(2020, 1, 10)), Some(9));
        assert_eq!(calendar.day_of(&NaiveDate::from_ymd(2020, 2, 1)), None);
    }

    #[test]
    fn datetime_round_trip() {
        let calendar = Calendar::new(
            NaiveDate::from_ymd(2020, 1, 1),
            NaiveDate::from_ymd(2020, 1, 31),
        );
        let naive = NaiveDate::from_ymd(2020, 1, 3).and_hms(8, 30, 0);
        let dt = calendar.make_datetime(&naive).unwrap();
        assert_eq!(dt, DateTime::new(2, 8 * 3600 + 30 * 60));
        assert_eq!(calendar.to_naive_datetime(&dt), naive);
    }

    #[test]
    fn nearby_validity_spills_one_day() {
        let mut days = vec![false; 10];
        days[4] = true;
        let pattern = ValidityPattern::new(days);
        assert!(pattern.is_allowed(4));
        assert!(!pattern.is_allowed(3));
        assert!(pattern.is_allowed_nearby(3));
        assert!(pattern.is_allowed_nearby(5));
        assert!(!pattern.is_allowed_nearby(7));
        assert!(!pattern.is_allowed(-1));
    }

    #[test]
    fn walking_duration_truncates() {
        // 180 m at 1.38 m/s is a bit more than 130 s
        assert_eq!(walking_duration(180.0), 130);
        assert_eq!(walking_duration(0.0), 0);
    }
}
