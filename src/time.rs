use std::fmt::{Display, Formatter};

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A point in time of the dataset: a day offset from the calendar start
/// and a number of seconds elapsed since midnight of that day.
///
/// The day offset may become negative during a reverse search that walks
/// past the calendar start; such instants compare smaller than any instant
/// inside the calendar and can never be boarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    date: i32,
    seconds: u32, // always < SECONDS_PER_DAY
}

impl DateTime {
    /// Sentinel meaning "never reached" in a reverse search.
    pub const MIN: DateTime = DateTime {
        date: i32::MIN,
        seconds: 0,
    };

    /// Sentinel meaning "never reached" in a forward search.
    pub const INF: DateTime = DateTime {
        date: i32::MAX,
        seconds: SECONDS_PER_DAY - 1,
    };

    /// Builds an instant from a day offset and a time of day.
    /// Times of day of 24h and more spill over into the next day(s).
    pub fn new(date: i32, seconds_of_day: u32) -> Self {
        Self {
            date: date + (seconds_of_day / SECONDS_PER_DAY) as i32,
            seconds: seconds_of_day % SECONDS_PER_DAY,
        }
    }

    pub fn date(&self) -> i32 {
        self.date
    }

    pub fn seconds_of_day(&self) -> u32 {
        self.seconds
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::MIN || *self == Self::INF
    }

    /// Advances to the next occurrence of `time_of_day` that is
    /// greater than or equal to the current instant.
    pub fn update(&mut self, time_of_day: u32) {
        if self.is_sentinel() {
            return;
        }
        let seconds = time_of_day % SECONDS_PER_DAY;
        if seconds < self.seconds {
            self.date += 1;
        }
        self.seconds = seconds;
    }

    /// Retreats to the previous occurrence of `time_of_day` that is
    /// smaller than or equal to the current instant.
    pub fn update_reverse(&mut self, time_of_day: u32) {
        if self.is_sentinel() {
            return;
        }
        let seconds = time_of_day % SECONDS_PER_DAY;
        if seconds > self.seconds {
            self.date -= 1;
        }
        self.seconds = seconds;
    }

    /// The instant `seconds` later. Sentinels are absorbing.
    pub fn add_seconds(self, seconds: u32) -> Self {
        if self.is_sentinel() {
            return self;
        }
        let total = i64::from(self.date) * i64::from(SECONDS_PER_DAY)
            + i64::from(self.seconds)
            + i64::from(seconds);
        Self::from_total_seconds(total)
    }

    /// The instant `seconds` earlier. Sentinels are absorbing.
    pub fn sub_seconds(self, seconds: u32) -> Self {
        if self.is_sentinel() {
            return self;
        }
        let total = i64::from(self.date) * i64::from(SECONDS_PER_DAY)
            + i64::from(self.seconds)
            - i64::from(seconds);
        Self::from_total_seconds(total)
    }

    /// Signed number of seconds from `earlier` to `self`.
    pub fn seconds_since(&self, earlier: &DateTime) -> i64 {
        self.total_seconds() - earlier.total_seconds()
    }

    fn total_seconds(&self) -> i64 {
        i64::from(self.date) * i64::from(SECONDS_PER_DAY) + i64::from(self.seconds)
    }

    fn from_total_seconds(total: i64) -> Self {
        let span = i64::from(SECONDS_PER_DAY);
        Self {
            date: total.div_euclid(span) as i32,
            seconds: total.rem_euclid(span) as u32,
        }
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if *self == Self::MIN {
            return write!(f, "-inf");
        }
        if *self == Self::INF {
            return write!(f, "+inf");
        }
        write!(
            f,
            "day {} {:02}:{:02}:{:02}",
            self.date,
            self.seconds / 60 / 60,
            self.seconds / 60 % 60,
            self.seconds % 60
        )
    }
}

/// Parses a `hh:mm:ss` literal, where `hh` may exceed 24 for times
/// spilling into the next day.
pub fn parse_time_of_day(text: &str) -> Option<u32> {
    let mut parts = text.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}
