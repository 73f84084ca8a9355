//! Definitions.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

/// A single positional digit.
pub type Digit = u32;

/// Radix of a position.
pub type Radix = u32;

/// Digit storage of a number. Most realistic numbers fit inline.
pub type Digits = SmallVec<[Digit; 8]>;

/// Threshold above which a fractional amount produced from a float is snapped to the next unit.
pub const DEFAULT_REMAINDER_THRESHOLD: f64 = 0.999999;

/// Number of fractional positions expanded when converting a fraction without explicit precision.
pub const FRACTION_DEFAULT_SIGNIFICANT: usize = 100;

/// Number of digits after the decimal point kept by remainders.
pub const DECIMAL_SCALE: u32 = 28;

/// Name given to the default arithmetic algorithms of the precision context.
pub const DEFAULT_ALGORITHM_NAME: &str = "DEFAULT";

/// Sign.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Sign {
    Neg = -1,
    Pos = 1,
}

impl Sign {
    /// Changes the sign to the opposite.
    pub fn invert(&self) -> Self {
        match *self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }

    /// Returns true if the sign is negative.
    pub fn is_negative(&self) -> bool {
        *self == Sign::Neg
    }

    /// Product of two signs.
    pub fn mul(&self, other: Sign) -> Self {
        if *self == other {
            Sign::Pos
        } else {
            Sign::Neg
        }
    }

    /// Sign as `-1` or `1`.
    pub fn to_int(&self) -> i64 {
        *self as i64
    }
}

impl TryFrom<i64> for Sign {
    type Error = Error;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Sign::Pos),
            -1 => Ok(Sign::Neg),
            _ => Err(Error::InvalidSign(v)),
        }
    }
}

/// Possible errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Literal is empty.
    #[error("string is empty")]
    EmptyString,

    /// Literal contains more than one `;`.
    #[error("too many separators in string ({0} fractional separators found)")]
    TooManySeparators(usize),

    /// A digit token can not be read as an integer.
    #[error("malformed digit '{0}'")]
    InvalidDigit(String),

    /// A fractional value was supplied where an integer digit is required.
    #[error("an illegal float value was found ('{0}')")]
    IllegalFloat(f64),

    /// Digit is out of the range of its position.
    #[error("an invalid value for ({base}) was found ('{digit}'); should be in the range [0,{radix}[")]
    IllegalBaseValue {
        base: String,
        radix: Radix,
        digit: i64,
    },

    /// Remainder is outside of `[0, 1[`.
    #[error("illegal remainder value ({0}), should be a decimal between [0.,1.[")]
    InvalidRemainder(Decimal),

    /// Sign is not -1 or 1.
    #[error("sign should be -1 or 1, got {0}")]
    InvalidSign(i64),

    /// NaN or infinite float.
    #[error("non finite value {0} can not be represented")]
    NonFinite(f64),

    /// A radix is zero.
    #[error("base {name} has an invalid radix {radix}")]
    InvalidRadix { name: String, radix: i64 },

    /// A radix list is empty.
    #[error("base {0} needs at least one integer and one fractional radix")]
    EmptyRadix(String),

    /// Number of integer separators differs from the number of integer radices.
    #[error("expected {expected} integer separators, got {found}")]
    SeparatorCount { expected: usize, found: usize },

    /// Base name is already registered.
    #[error("name {0} already exists in registry")]
    DuplicateBase(String),

    /// Base name is not registered.
    #[error("no base named {0} in registry")]
    UnknownBase(String),

    /// Digit position outside of the digits of a number.
    #[error("position {0} is out of range")]
    IndexOutOfRange(isize),

    /// Divisor is zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Square root of a negative number.
    #[error("square root domain error")]
    NegativeSqrt,

    /// Negative number raised to a non integer power.
    #[error("negative number cannot be raised to a non-integer power")]
    NegativePow,

    /// No closed form exists for the operation.
    #[error("operation is not implemented: {0}")]
    NotImplemented(&'static str),

    /// Whole context replaced while a scoped block is active.
    #[error("context can not be changed while inside a scoped precision block")]
    ContextInUse,

    /// Custom algorithm name or function registered twice.
    #[error("custom algorithm {0} is registered twice")]
    DuplicateAlgorithm(String),

    /// Custom algorithm uses the reserved default name.
    #[error("custom algorithm can not be named DEFAULT")]
    ReservedAlgorithmName,

    /// Value does not fit the target type.
    #[error("value does not fit the target type")]
    Overflow,
}
