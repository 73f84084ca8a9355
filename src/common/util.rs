//! Auxiliary functions.

use crate::defs::{Digit, Error, Radix, DECIMAL_SCALE};
use num_bigint::BigInt;
use num_rational::BigRational;
use core::fmt::Display;
use num_traits::{One, Signed, ToPrimitive};
use rust_decimal::Decimal;

/// Number of decimal characters needed to display a digit of radix `radix`.
pub fn ndigit_for_radix(radix: Radix) -> usize {
    let mut w = 0;
    let mut p = 1u64;
    while p < radix as u64 {
        p *= 10;
        w += 1;
    }
    w
}

/// Capitalizes every `_`-separated word of `name` and concatenates them.
pub fn camel_case(name: &str) -> String {
    name.split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Digit from an integral value below the radix of its position.
pub(crate) fn to_digit<T: ToPrimitive + Display>(v: &T) -> Digit {
    let d = v.to_u32();
    debug_assert!(d.is_some(), "{} is not a digit", v);
    d.unwrap_or(0)
}

/// Rounding applied when an exact rational is brought into a decimal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecimalRounding {
    /// Drop the digits that do not fit.
    Truncate,
    /// Round to the nearest representable value, ties away from zero.
    Nearest,
}

/// Converts an exact rational into a decimal with at most `DECIMAL_SCALE` digits after the point.
/// The scale is reduced for large values until the mantissa fits.
pub fn ratio_to_decimal(q: &BigRational, rounding: DecimalRounding) -> Result<Decimal, Error> {
    let limit = BigInt::one() << 96;
    let mut scale = DECIMAL_SCALE;
    let mut mul = BigInt::from(10u32).pow(scale);

    loop {
        let scaled = q * BigRational::from_integer(mul.clone());
        let m = match rounding {
            DecimalRounding::Truncate => scaled.trunc().to_integer(),
            DecimalRounding::Nearest => scaled.round().to_integer(),
        };

        if m.abs() < limit {
            let m = m.to_i128().ok_or(Error::Overflow)?;
            return Ok(Decimal::from_i128_with_scale(m, scale).normalize());
        }

        if scale == 0 {
            return Err(Error::Overflow);
        }

        scale -= 1;
        mul /= 10u32;
    }
}

/// Exact rational value of a decimal.
pub fn decimal_to_ratio(d: &Decimal) -> BigRational {
    let den = BigInt::from(10u32).pow(d.scale());
    BigRational::new(BigInt::from(d.mantissa()), den)
}
