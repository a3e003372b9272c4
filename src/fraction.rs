//! Validating arbitrary numeric input into exact fractions.
//!
//! Every constructor in this library stores its values as exact
//! rationals, so every constructor funnels its input through
//! `verify_fractional`. The function accepts anything that can be turned
//! into a `Numeric` (integers, big integers, fractions, numerator and
//! denominator pairs, and decimal text such as `"0.875"` or `"7/8"`) and
//! checks it against a set of `Limits`.
//!
//! Binary floating-point numbers are *refused*. They can’t represent a
//! third of a day, and accepting them would silently round.
//!
//! ```
//! use ratadie::fraction::{verify_fractional, Limits};
//! use ratadie::ErrorKind;
//!
//! let limits = Limits::new().min(0).max_excl(1);
//! assert!(verify_fractional("0.25", &limits).is_ok());
//! assert_eq!(verify_fractional(1, &limits).unwrap_err().kind(), ErrorKind::Range);
//! assert_eq!(verify_fractional(0.25, &limits).unwrap_err().kind(), ErrorKind::Type);
//! ```

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{pow, Zero};

use error::Error;


/// A number as given by the caller, before it has been checked.
#[derive(PartialEq, Debug, Clone)]
pub enum Numeric {
    Integer(BigInt),
    Fraction(BigRational),

    /// A numerator and a denominator, with the denominator not yet
    /// checked for zero.
    Pair(BigInt, BigInt),

    /// Decimal or `n/d` notation.
    Text(String),

    /// A binary floating-point number.
    Float(f64),
}

macro_rules! integer_numeric {
    ($($t:ty)*) => {
        $(
            impl From<$t> for Numeric {
                fn from(value: $t) -> Numeric {
                    Numeric::Integer(BigInt::from(value))
                }
            }
        )*
    };
}

integer_numeric!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl From<BigInt> for Numeric {
    fn from(value: BigInt) -> Numeric {
        Numeric::Integer(value)
    }
}

impl From<BigRational> for Numeric {
    fn from(value: BigRational) -> Numeric {
        Numeric::Fraction(value)
    }
}

impl<'a> From<&'a BigRational> for Numeric {
    fn from(value: &'a BigRational) -> Numeric {
        Numeric::Fraction(value.clone())
    }
}

impl From<(i64, i64)> for Numeric {
    fn from((numer, denom): (i64, i64)) -> Numeric {
        Numeric::Pair(BigInt::from(numer), BigInt::from(denom))
    }
}

impl From<(i32, i32)> for Numeric {
    fn from((numer, denom): (i32, i32)) -> Numeric {
        Numeric::Pair(BigInt::from(numer), BigInt::from(denom))
    }
}

impl From<(BigInt, BigInt)> for Numeric {
    fn from((numer, denom): (BigInt, BigInt)) -> Numeric {
        Numeric::Pair(numer, denom)
    }
}

impl<'a> From<&'a str> for Numeric {
    fn from(value: &'a str) -> Numeric {
        Numeric::Text(value.to_owned())
    }
}

impl From<String> for Numeric {
    fn from(value: String) -> Numeric {
        Numeric::Text(value)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Numeric {
        Numeric::Float(value)
    }
}

impl From<f32> for Numeric {
    fn from(value: f32) -> Numeric {
        Numeric::Float(value as f64)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Numeric::Integer(ref n)      => write!(f, "{}", n),
            Numeric::Fraction(ref r)     => write!(f, "{}", r),
            Numeric::Pair(ref n, ref d)  => write!(f, "{}/{}", n, d),
            Numeric::Text(ref s)         => write!(f, "{:?}", s),
            Numeric::Float(x)            => write!(f, "{}", x),
        }
    }
}

impl Numeric {

    /// Converts this number into an exact fraction, refusing floats.
    pub fn to_exact(self) -> Result<BigRational, Error> {
        match self {
            Numeric::Integer(n)       => Ok(BigRational::from_integer(n)),
            Numeric::Fraction(r)      => Ok(r),
            Numeric::Pair(n, d)       => make_ratio(n, d),
            Numeric::Text(s)          => parse_exact(&s),
            Numeric::Float(x)         => Err(Error::Type(format!("{} is a floating-point number, which can’t be represented exactly; use a fraction or decimal text instead", x))),
        }
    }

    /// Converts this number into an exact fraction, taking a float at
    /// the exact value of its binary representation.
    ///
    /// This is only used for scalars that *multiply* an existing value,
    /// where the caller has already accepted whatever the float holds.
    pub fn to_scalar(self) -> Result<BigRational, Error> {
        match self {
            Numeric::Float(x) => BigRational::from_float(x)
                .ok_or_else(|| Error::Type(format!("{} is not a finite number", x))),
            exact => exact.to_exact(),
        }
    }
}

fn make_ratio(numer: BigInt, denom: BigInt) -> Result<BigRational, Error> {
    if denom.is_zero() {
        Err(Error::Division(format!("{}/{} has a zero denominator", numer, denom)))
    }
    else {
        Ok(BigRational::new(numer, denom))
    }
}

/// The largest power of ten that decimal text may scale its digits by.
const MAX_DECIMAL_SCALE: i64 = 10_000;

/// Parses decimal text (`-12.5`, `3e-2`) or a fraction (`7/8`) into an
/// exact value.
fn parse_exact(input: &str) -> Result<BigRational, Error> {
    let text = input.trim();
    let invalid = || Error::Type(format!("{:?} is not an exact number", input));

    if let Some(slash) = text.find('/') {
        let numer = parse_integer(text[.. slash].trim()).ok_or_else(invalid)?;
        let denom = parse_integer(text[slash + 1 ..].trim()).ok_or_else(invalid)?;
        return make_ratio(numer, denom);
    }

    let (mantissa, exponent) = match text.find(|c| c == 'e' || c == 'E') {
        Some(pos) => {
            let exponent = i32::from_str(&text[pos + 1 ..]).map_err(|_| invalid())?;
            (&text[.. pos], exponent)
        },
        None => (text, 0),
    };

    let (negative, digits) = match mantissa.chars().next() {
        Some('-') => (true, &mantissa[1..]),
        Some('+') => (false, &mantissa[1..]),
        _         => (false, mantissa),
    };

    let (whole_digits, frac_digits) = match digits.find('.') {
        Some(dot) => (&digits[.. dot], &digits[dot + 1 ..]),
        None      => (digits, ""),
    };

    if whole_digits.is_empty() && frac_digits.is_empty() {
        return Err(invalid());
    }

    if !whole_digits.chars().chain(frac_digits.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let all_digits = format!("{}{}", whole_digits, frac_digits);
    let mut numer = BigInt::from_str(&all_digits).map_err(|_| invalid())?;
    if negative {
        numer = -numer;
    }

    let scale = i64::from(exponent) - frac_digits.len() as i64;
    if scale.abs() > MAX_DECIMAL_SCALE {
        return Err(Error::Range(format!("{:?} has a power of ten beyond 10^±{}", input, MAX_DECIMAL_SCALE)));
    }

    let ten = BigInt::from(10);
    let value = if scale >= 0 {
        BigRational::from_integer(numer * pow(ten, scale as usize))
    }
    else {
        BigRational::new(numer, pow(ten, (-scale) as usize))
    };

    Ok(value)
}

fn parse_integer(text: &str) -> Option<BigInt> {
    let digits = text.trim_start_matches(|c| c == '-' || c == '+');
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) || text.len() - digits.len() > 1 {
        return None;
    }

    BigInt::from_str(text.trim_start_matches('+')).ok()
}


/// The bounds a value must fall within.
///
/// Each side can be bounded inclusively or exclusively, but not both at
/// once: asking for that is a mistake on the caller’s part, and gets
/// reported as a type error rather than a range error.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Limits {
    pub min:      Option<BigRational>,
    pub min_excl: Option<BigRational>,
    pub max:      Option<BigRational>,
    pub max_excl: Option<BigRational>,
}

impl Limits {

    /// Limits that let any value through.
    pub fn new() -> Limits {
        Limits::default()
    }

    /// The value must be at least `bound`.
    pub fn min<B: Into<Bound>>(mut self, bound: B) -> Limits {
        self.min = Some(bound.into().0);
        self
    }

    /// The value must be greater than `bound`.
    pub fn min_excl<B: Into<Bound>>(mut self, bound: B) -> Limits {
        self.min_excl = Some(bound.into().0);
        self
    }

    /// The value must be at most `bound`.
    pub fn max<B: Into<Bound>>(mut self, bound: B) -> Limits {
        self.max = Some(bound.into().0);
        self
    }

    /// The value must be less than `bound`.
    pub fn max_excl<B: Into<Bound>>(mut self, bound: B) -> Limits {
        self.max_excl = Some(bound.into().0);
        self
    }

    fn check_consistency(&self) -> Result<(), Error> {
        if self.min.is_some() && self.min_excl.is_some() {
            return Err(Error::Type("both an inclusive and an exclusive minimum were given".into()));
        }

        if self.max.is_some() && self.max_excl.is_some() {
            return Err(Error::Type("both an inclusive and an exclusive maximum were given".into()));
        }

        Ok(())
    }

    fn check(&self, value: &BigRational) -> Result<(), Error> {
        let out_of_range = |relation: &str, bound: &BigRational| {
            Error::Range(format!("{} must be {} {}", value, relation, bound))
        };

        if let Some(ref bound) = self.min {
            if value < bound { return Err(out_of_range("at least", bound)); }
        }

        if let Some(ref bound) = self.min_excl {
            if value <= bound { return Err(out_of_range("greater than", bound)); }
        }

        if let Some(ref bound) = self.max {
            if value > bound { return Err(out_of_range("at most", bound)); }
        }

        if let Some(ref bound) = self.max_excl {
            if value >= bound { return Err(out_of_range("less than", bound)); }
        }

        Ok(())
    }
}

/// An exact bound for `Limits`, from an integer or a fraction.
#[derive(PartialEq, Debug, Clone)]
pub struct Bound(BigRational);

impl From<i64> for Bound {
    fn from(value: i64) -> Bound {
        Bound(BigRational::from_integer(BigInt::from(value)))
    }
}

impl From<i32> for Bound {
    fn from(value: i32) -> Bound {
        Bound(BigRational::from_integer(BigInt::from(value)))
    }
}

impl From<BigRational> for Bound {
    fn from(value: BigRational) -> Bound {
        Bound(value)
    }
}


/// Converts the given value into an exact fraction, and checks it
/// against the given limits.
///
/// Failures are checked in this order: inconsistent limits (type error),
/// a value that isn’t exact (type error), an explicit zero denominator
/// (division error), and finally a value outside the limits (range
/// error).
pub fn verify_fractional<N: Into<Numeric>>(value: N, limits: &Limits) -> Result<BigRational, Error> {
    limits.check_consistency()?;
    let value = value.into().to_exact()?;
    limits.check(&value)?;
    Ok(value)
}
