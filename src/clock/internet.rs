//! Internet time: the day split into a thousand beats.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use clock::TimeRepresentation;
use error::Error;
use format::{self, Directives};
use fraction::{verify_fractional, Limits, Numeric};
use util::{ratio, scaled_digits, whole, wrap_day};


/// A time of day in **beats**, each a thousandth of a day.
///
/// Beats are counted from midnight at UTC+01:00, so a beat time is never
/// naive: it always stands for the same instant wherever it is read.
/// The beat value is an exact fraction in [0, 1000).
///
/// ### Examples
///
/// ```
/// use ratadie::clock::internet::InternetTime;
///
/// let time = InternetTime::new("500.25").unwrap();
/// assert_eq!(time.to_string(), "@500");
/// assert_eq!(time.cformat("@%b.%f"), "@500.250");
///
/// assert!(InternetTime::new(1000).is_err());
/// ```
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct InternetTime {
    beat: BigRational,
}

impl InternetTime {

    /// Creates a new time from the given beat, in [0, 1000).
    pub fn new<N: Into<Numeric>>(beat: N) -> Result<Self, Error> {
        let beat = verify_fractional(beat, &Limits::new().min(0).max_excl(1000))?;
        Ok(Self { beat })
    }

    /// Creates a new time from the fraction of the day that has elapsed
    /// since midnight at UTC+01:00.
    pub fn from_day_frac<N: Into<Numeric>>(day_frac: N) -> Result<Self, Error> {
        let day_frac = verify_fractional(day_frac, &Limits::new().min(0).max_excl(1))?;
        Ok(Self { beat: day_frac * whole(1000) })
    }

    /// The fraction of the day that has elapsed since midnight at
    /// UTC+01:00.
    pub fn to_day_frac(&self) -> BigRational {
        &self.beat / whole(1000)
    }

    /// The beat, in [0, 1000).
    pub fn beat(&self) -> &BigRational { &self.beat }

    /// Returns a new time with the beat changed, or an equal time when
    /// nothing is given.
    pub fn replace(&self, beat: Option<Numeric>) -> Result<Self, Error> {
        Self::new(beat.unwrap_or_else(|| Numeric::Fraction(self.beat.clone())))
    }

    /// Formats this time according to the given template. The directives
    /// are `%b` for the whole beats, `000` to `999`, and `%f` for the
    /// thousandths of a beat, `000` to `999`.
    pub fn cformat(&self, template: &str) -> String {
        format::cformat(template, self)
    }

    fn whole_beats(&self) -> BigInt {
        self.beat.floor().to_integer()
    }
}

/// The offset from UTC that beats are counted at, as a fraction of a day.
fn biel_offset() -> BigRational {
    ratio(1, 24)
}

impl TimeRepresentation for InternetTime {
    fn to_time_pair(&self) -> (BigRational, Option<BigRational>) {
        (self.to_day_frac(), Some(biel_offset()))
    }

    fn from_time_pair(day_frac: BigRational, utcoffset: Option<BigRational>) -> Self {
        debug_assert!(!day_frac.is_negative() && day_frac < whole(1), "day fraction {} is outside [0, 1)", day_frac);

        let day_frac = match utcoffset {
            Some(offset) => wrap_day(day_frac - offset + biel_offset()),
            None         => day_frac,
        };

        Self { beat: day_frac * whole(1000) }
    }
}

impl Directives for InternetTime {
    fn directive(&self, code: char) -> Option<String> {
        match code {
            'b' => Some(format::zero_padded(self.whole_beats(), 3)),
            'f' => Some(format::zero_padded(scaled_digits(&self.beat.fract(), 1000), 3)),
            _   => None,
        }
    }
}

impl fmt::Display for InternetTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "@{}", format::zero_padded(self.whole_beats(), 3))
    }
}

impl fmt::Debug for InternetTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InternetTime({})", self.beat)
    }
}
