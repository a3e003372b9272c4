//! The error type shared by every constructor and operation.

use std::error::Error as ErrorTrait;
use std::fmt;


/// Something went wrong while building or combining date and time values.
///
/// Each variant is one *kind* of failure, and carries a message meant for
/// a human. Nothing in this library recovers from these: they go straight
/// back to the caller.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Error {

    /// The input has the wrong shape: a float where an exact number is
    /// required, text that isn’t a number, conflicting bounds.
    Type(String),

    /// The input is a number, but outside the domain of the field, such
    /// as month 13 or hour 24.
    Range(String),

    /// A denominator of zero was given explicitly.
    Division(String),

    /// The values are fine on their own, but can’t be combined: a naive
    /// time minus an aware one, or a partial day added to a date.
    Value(String),

    /// A representation can’t be registered under this name.
    Name(String),

    /// A representation is missing one of its two conversions.
    Capability(String),

    /// There is no such attribute on this value.
    Attribute(String),
}

/// The kind of an `Error`, without its message.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum ErrorKind {
    Type,
    Range,
    Division,
    Value,
    Name,
    Capability,
    Attribute,
}

impl Error {

    /// Returns which kind of error this is.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::Type(_)        => ErrorKind::Type,
            Error::Range(_)       => ErrorKind::Range,
            Error::Division(_)    => ErrorKind::Division,
            Error::Value(_)       => ErrorKind::Value,
            Error::Name(_)        => ErrorKind::Name,
            Error::Capability(_)  => ErrorKind::Capability,
            Error::Attribute(_)   => ErrorKind::Attribute,
        }
    }

    /// Returns the message this error was raised with.
    pub fn message(&self) -> &str {
        match *self {
            Error::Type(ref m)        | Error::Range(ref m)
          | Error::Division(ref m)    | Error::Value(ref m)
          | Error::Name(ref m)        | Error::Capability(ref m)
          | Error::Attribute(ref m)   => m,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Type(ref m)        => write!(f, "type error: {}", m),
            Error::Range(ref m)       => write!(f, "value out of range: {}", m),
            Error::Division(ref m)    => write!(f, "division by zero: {}", m),
            Error::Value(ref m)       => write!(f, "invalid value: {}", m),
            Error::Name(ref m)        => write!(f, "invalid name: {}", m),
            Error::Capability(ref m)  => write!(f, "missing capability: {}", m),
            Error::Attribute(ref m)   => write!(f, "no such attribute: {}", m),
        }
    }
}

impl ErrorTrait for Error {
}
