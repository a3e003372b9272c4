//! The ISO week calendar: years, weeks, and days of the week.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};

use cal::Calendar;
use error::Error;
use format::{self, Directives};
use util::{split_cycles, RangeExt};


/// Number of days in four hundred Gregorian years, which is also a whole
/// number of weeks.
const DAYS_IN_400Y: i128 = 146_097;

/// Number of ISO weeks in four hundred years.
const WEEKS_IN_400Y: i64 = (DAYS_IN_400Y / 7) as i64;

/// The years of a 400-year cycle that have 53 weeks. These are the years
/// that start on a Thursday, plus the leap years that start on a
/// Wednesday.
const LONG_YEARS: [i64; 71] = [
      4,   9,  15,  20,  26,  32,  37,  43,  48,  54,  60,  65,  71,  76,  82,  88,  93,  99,
    105, 111, 116, 122, 128, 133, 139, 144, 150, 156, 161, 167, 172, 178, 184, 189, 195,
    201, 207, 212, 218, 224, 229, 235, 240, 246, 252, 257, 263, 268, 274, 280, 285, 291, 296,
    303, 308, 314, 320, 325, 331, 336, 342, 348, 353, 359, 364, 370, 376, 381, 387, 392, 398,
];

lazy_static! {

    /// The number of weeks in the years of a cycle before each year,
    /// counting the cycle from its year 1. Entry 0 is the start of year 1,
    /// and entry 400 is the end of the cycle.
    static ref WEEKS_BEFORE_YEAR: Vec<i64> = {
        let mut table = Vec::with_capacity(401);
        let mut weeks = 0;
        table.push(weeks);

        for year in 1 ..= 400 {
            weeks += IsoCalendar::weeks_in_year(year);
            table.push(weeks);
        }

        table
    };
}


/// A date in the **ISO week calendar**, given as a year, a week of that
/// year, and a day of that week.
///
/// Weeks start on Monday, and week 1 is the week containing the year’s
/// first Thursday. This means the ISO year can differ from the Gregorian
/// year for a few days around New Year.
///
/// ### Examples
///
/// ```
/// use ratadie::cal::Calendar;
/// use ratadie::cal::iso::IsoCalendar;
///
/// let date = IsoCalendar::new(2009, 53, 7).unwrap();
/// assert_eq!(date.to_rata_die(), 733_775);  // the 3rd of January, 2010
///
/// assert!(IsoCalendar::new(2021, 53, 1).is_err());
/// ```
#[derive(Clone)]
pub struct IsoCalendar {
    year: i64,
    week: u8,
    day:  u8,
    rata_die: i64,
}

impl IsoCalendar {

    /// Creates a new date from the given year, week, and day-of-week
    /// fields, where Monday is day 1 and Sunday is day 7. Years so far
    /// away that their day count doesn’t fit in an `i64` are out of range.
    pub fn new(year: i64, week: i64, day: i64) -> Result<Self, Error> {
        let weeks_in_year = Self::weeks_in_year(year);

        if !week.is_within(1 .. weeks_in_year + 1) {
            return Err(Error::Range(format!("week {} must be between 1 and {} in {}", week, weeks_in_year, year)));
        }

        if !day.is_within(1 .. 8) {
            return Err(Error::Range(format!("day {} must be between 1 and 7", day)));
        }

        let rata_die = i64::try_from(Self::wide_rata_die(year, week, day))
            .map_err(|_| Error::Range(format!("{}-W{:02}-{} is too far from the epoch to have a day count", format::signed_year(year), week, day)))?;

        Ok(Self { year, week: week as u8, day: day as u8, rata_die })
    }

    /// The day count of the given fields, in 128 bits, as years near the
    /// ends of the `i64` range have day counts far outside it.
    fn wide_rata_die(year: i64, week: i64, day: i64) -> i128 {
        let (cycles, year_in_cycle) = split_cycles(i128::from(year) - 1, 400);
        let weeks = WEEKS_BEFORE_YEAR[year_in_cycle as usize] + week - 1;
        cycles * DAYS_IN_400Y + 7 * i128::from(weeks) + i128::from(day)
    }

    /// Returns whether the given year has 53 weeks.
    ///
    /// ```
    /// use ratadie::cal::iso::IsoCalendar;
    ///
    /// assert_eq!(IsoCalendar::is_long_year(4), true);
    /// assert_eq!(IsoCalendar::is_long_year(1), false);
    /// ```
    pub fn is_long_year(year: i64) -> bool {
        let (_, year_in_cycle) = split_cycles(year, 400);
        LONG_YEARS.binary_search(&year_in_cycle).is_ok()
    }

    /// Returns the number of weeks in the given year: 52, or 53 in a
    /// long year.
    pub fn weeks_in_year(year: i64) -> i64 {
        if Self::is_long_year(year) { 53 } else { 52 }
    }

    /// The ISO year, which is not always the Gregorian year.
    pub fn year(&self) -> i64 { self.year }

    /// The week of the year, from 1 to 53.
    pub fn week(&self) -> u8 { self.week }

    /// The day of the week, where Monday is 1 and Sunday is 7.
    pub fn day(&self) -> u8 { self.day }

    /// The day of the week; the same as `day`.
    pub fn weekday(&self) -> u8 { self.day }

    /// The day of the ISO year, from 1 to 371.
    pub fn day_of_year(&self) -> i64 {
        7 * (self.week as i64 - 1) + self.day as i64
    }

    /// Returns a new date with the given fields changed. The result is
    /// checked just like a freshly-built date.
    pub fn replace(&self, year: Option<i64>, week: Option<i64>, day: Option<i64>) -> Result<Self, Error> {
        Self::new(year.unwrap_or(self.year),
                  week.unwrap_or(self.week as i64),
                  day.unwrap_or(self.day as i64))
    }

    /// Formats this date according to the given template. See the
    /// `format` module for the rules; the directives are:
    ///
    /// | Directive | Meaning |
    /// |-----------|---------|
    /// | `%a`, `%A` | abbreviated and full weekday name |
    /// | `%j` | day of the ISO year, `001` to `371` |
    /// | `%w` | weekday number, Monday being `1` and Sunday `7` |
    /// | `%W` | week of the year, `01` to `53` |
    /// | `%y` | year without the century, `00` to `99` |
    /// | `%Y` | year, at least four digits, with a `-` if negative |
    pub fn cformat(&self, template: &str) -> String {
        format::cformat(template, self)
    }
}

impl Calendar for IsoCalendar {
    fn to_rata_die(&self) -> i64 {
        self.rata_die
    }

    fn from_rata_die(day_count: i64) -> Self {
        let (weeks, day_of_week) = split_cycles(i128::from(day_count) - 1, 7);
        let (cycles, week_in_cycle) = split_cycles(weeks, i128::from(WEEKS_IN_400Y));
        let week_in_cycle = week_in_cycle as i64;

        // The last year whose first week starts on or before this one.
        let year_in_cycle = WEEKS_BEFORE_YEAR.partition_point(|&before| before <= week_in_cycle) - 1;
        let week = week_in_cycle - WEEKS_BEFORE_YEAR[year_in_cycle] + 1;

        Self {
            year: (cycles * 400) as i64 + year_in_cycle as i64 + 1,
            week: week as u8,
            day:  day_of_week as u8 + 1,
            rata_die: day_count,
        }
    }
}

impl Directives for IsoCalendar {
    fn directive(&self, code: char) -> Option<String> {
        let text = match code {
            'a' => format::weekday_name(self.day, false),
            'A' => format::weekday_name(self.day, true),
            'j' => format::zero_padded(self.day_of_year(), 3),
            'w' => self.day.to_string(),
            'W' => format::zero_padded(self.week, 2),
            'y' => format::short_year(self.year),
            'Y' => format::signed_year(self.year),
            _   => return None,
        };

        Some(text)
    }
}

impl fmt::Display for IsoCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-W{:02}-{}", format::signed_year(self.year), self.week, self.day)
    }
}

impl fmt::Debug for IsoCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IsoCalendar({})", self)
    }
}

impl PartialEq for IsoCalendar {
    fn eq(&self, other: &Self) -> bool {
        (self.year, self.week, self.day) == (other.year, other.week, other.day)
    }
}

impl Eq for IsoCalendar {}

impl PartialOrd for IsoCalendar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IsoCalendar {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.week, self.day).cmp(&(other.year, other.week, other.day))
    }
}

impl Hash for IsoCalendar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.year, self.week, self.day).hash(state);
    }
}
