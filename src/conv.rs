//! Conversions between BasedReal and other numeric types.

use crate::common::util::{decimal_to_ratio, ratio_to_decimal, to_digit, DecimalRounding};
use crate::defs::{
    Digit, Digits, Error, Sign, DEFAULT_REMAINDER_THRESHOLD, FRACTION_DEFAULT_SIGNIFICANT,
};
use crate::num::BasedReal;
use crate::radix::RadixBase;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;
use smallvec::smallvec;
use std::borrow::Cow;

/// Integer values above this bound are not exactly representable as `f64`.
const F64_EXACT_INT_BOUND: u64 = 1 << 53;

impl BasedReal {
    /// Zero with `significant` zero fractional digits.
    pub fn zero(base: &RadixBase, significant: usize) -> BasedReal {
        Self::from_int(base, 0, significant)
    }

    /// One with `significant` zero fractional digits.
    pub fn one(base: &RadixBase, significant: usize) -> BasedReal {
        Self::from_int(base, 1, significant)
    }

    /// Creates a number from an integer, with `significant` zero fractional digits.
    pub fn from_int<T: Into<BigInt>>(base: &RadixBase, value: T, significant: usize) -> BasedReal {
        let value: BigInt = value.into();
        let sign = if value.is_negative() { Sign::Neg } else { Sign::Pos };

        let mut v = value.abs();
        let mut left = Digits::new();
        let mut pos = 0;
        while !v.is_zero() {
            let (q, r) = v.div_rem(&BigInt::from(base.radix_at(pos)));
            left.push(to_digit(&r));
            v = q;
            pos -= 1;
        }
        if left.is_empty() {
            left.push(0);
        }
        left.reverse();

        Self::raw(base.clone(), left, smallvec![0; significant], sign, Decimal::ZERO)
    }

    /// Creates a number from `f`, with `significant` fractional digits.
    /// Fractional amounts within `1 - 0.999999` of a whole digit are snapped to it,
    /// which absorbs binary floating point error.
    ///
    /// ## Errors
    ///
    ///  - NonFinite: `f` is NaN or infinite.
    pub fn from_f64(base: &RadixBase, f: f64, significant: usize) -> Result<BasedReal, Error> {
        Self::from_f64_with_threshold(base, f, significant, DEFAULT_REMAINDER_THRESHOLD)
    }

    /// Same as `from_f64` with a custom snapping threshold; a threshold of 1 disables snapping.
    ///
    /// ## Errors
    ///
    ///  - NonFinite: `f` is NaN or infinite.
    pub fn from_f64_with_threshold(
        base: &RadixBase,
        f: f64,
        significant: usize,
        threshold: f64,
    ) -> Result<BasedReal, Error> {
        if !f.is_finite() {
            return Err(Error::NonFinite(f));
        }

        let ip = f.trunc();
        let int_part = BigInt::from_f64(ip).ok_or(Error::NonFinite(f))?;
        let integer = Self::from_int(base, int_part, 0);
        let mut value = (f - ip).abs();

        let mut right: Digits = smallvec![0; significant];
        if value != 0.0 {
            for i in 0..significant {
                let radix = base.radix_at(i as isize + 1) as f64;
                value *= radix;
                let frac = value - value.trunc();
                if frac > threshold && value + 1.0 < radix {
                    value = value.trunc() + 1.0;
                } else if frac < 1.0 - threshold && right[..i].iter().any(|d| *d != 0) {
                    value = value.trunc();
                }
                let d = value.trunc();
                value -= d;
                right[i] = d as Digit;
            }
        }

        let remainder = Decimal::from_f64_retain(value).ok_or(Error::NonFinite(f))?;
        let sign = if f < 0.0 { Sign::Neg } else { Sign::Pos };

        Self::from_parts(base.clone(), Digits::from_slice(integer.left()), right, sign, remainder)
    }

    /// Creates a number from a decimal, with `significant` fractional digits.
    pub fn from_decimal(base: &RadixBase, d: Decimal, significant: usize) -> BasedReal {
        let ip = d.trunc();
        let integer = Self::from_int(base, ip.mantissa() / 10i128.pow(ip.scale()), 0);
        let mut value = (d - ip).abs();

        let mut right: Digits = smallvec![0; significant];
        for (i, digit) in right.iter_mut().enumerate() {
            value *= Decimal::from(base.radix_at(i as isize + 1));
            let t = value.trunc();
            value -= t;
            *digit = to_digit(&t);
        }

        let sign = if d.is_sign_negative() && !d.is_zero() { Sign::Neg } else { Sign::Pos };

        Self::raw(base.clone(), Digits::from_slice(integer.left()), right, sign, value)
    }

    /// Creates a number from an exact fraction.
    /// With no `significant`, up to 100 fractional digits are produced and trailing zeros
    /// are removed.
    pub fn from_fraction(
        base: &RadixBase,
        q: &BigRational,
        significant: Option<usize>,
    ) -> Result<BasedReal, Error> {
        let n = significant.unwrap_or(FRACTION_DEFAULT_SIGNIFICANT);
        let sign = if q.is_negative() { Sign::Neg } else { Sign::Pos };
        let q = q.abs();

        let (int_part, mut num) = q.numer().div_rem(q.denom());
        let den = q.denom();

        let mut right: Digits = smallvec![0; n];
        for (i, digit) in right.iter_mut().enumerate() {
            num *= base.radix_at(i as isize + 1);
            let (d, r) = num.div_rem(den);
            *digit = to_digit(&d);
            num = r;
        }

        let remainder = ratio_to_decimal(
            &BigRational::new(num, den.clone()),
            DecimalRounding::Truncate,
        )?;
        let integer = Self::from_int(base, int_part, 0);
        let ret = Self::raw(base.clone(), Digits::from_slice(integer.left()), right, sign, remainder);

        Ok(if significant.is_none() {
            ret.minimize_precision()
        } else {
            ret
        })
    }

    /// Returns the number in `base` with `significant` fractional digits.
    /// A number of the same base is resized; other bases go through the exact fraction.
    ///
    /// ## Errors
    ///
    ///  - Overflow: the remainder of the converted value can not be represented.
    pub fn convert(&self, base: &RadixBase, significant: usize) -> Result<BasedReal, Error> {
        if self.base() == base {
            Ok(self.resize(significant))
        } else {
            Self::from_fraction(base, &self.to_fraction(), Some(significant))
        }
    }

    /// Integer value of the integer digits, with sign; fractional digits are ignored.
    pub fn to_bigint(&self) -> BigInt {
        let mut value = BigInt::zero();
        for (i, d) in self.left().iter().enumerate() {
            let pos = i as isize - self.left().len() as isize + 1;
            value = value * self.base().radix_at(pos) + *d;
        }
        if self.is_negative() {
            -value
        } else {
            value
        }
    }

    /// Approximate `f64` value.
    pub fn to_f64(&self) -> f64 {
        let int_part = self.to_bigint().abs();
        if int_part > BigInt::from(F64_EXACT_INT_BOUND) {
            tracing::warn!(
                value = %self,
                "integer part exceeds floating point precision, float value may be inexact"
            );
        }

        self.to_fraction().to_f64().unwrap_or(if self.is_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        })
    }

    /// Exact value as a fraction.
    pub fn to_fraction(&self) -> BigRational {
        let mut num = self.to_bigint().abs();
        let mut den = BigInt::one();
        for (i, d) in self.right().iter().enumerate() {
            let radix = self.base().radix_at(i as isize + 1);
            num = num * radix + *d;
            den *= radix;
        }

        let q = BigRational::new(num, den.clone())
            + decimal_to_ratio(&self.remainder()) / BigRational::from_integer(den);
        if self.is_negative() {
            -q
        } else {
            q
        }
    }

    /// Value as a decimal, rounded to the nearest value with at most 28 digits after the point.
    ///
    /// ## Errors
    ///
    ///  - Overflow: the value does not fit a decimal.
    pub fn to_decimal(&self) -> Result<Decimal, Error> {
        ratio_to_decimal(&self.to_fraction(), DecimalRounding::Nearest)
    }

    /// Iterator over the integers `start`, `start + step`, .. up to `stop` excluded.
    /// A zero `step` yields nothing.
    pub fn range(base: &RadixBase, start: i64, stop: i64, step: i64) -> BasedRange {
        BasedRange {
            base: base.clone(),
            next: start,
            stop,
            step,
        }
    }

    /// Builds a number from digits computed below their radices and a remainder below one.
    pub(crate) fn raw(
        base: RadixBase,
        left: Digits,
        right: Digits,
        sign: Sign,
        remainder: Decimal,
    ) -> BasedReal {
        debug_assert!(
            Self::check_parts(&base, &left, &right, remainder).is_ok() && remainder < Decimal::ONE,
            "invalid parts {:?} {:?} {}",
            left,
            right,
            remainder
        );
        Self::trimmed(base, left, right, sign, remainder)
    }

    /// `other` in the base of `self`. A number of another base goes through its `f64` value
    /// and gets the precision of `self`.
    pub(crate) fn coerce<'a>(&self, other: &'a BasedReal) -> Result<Cow<'a, BasedReal>, Error> {
        if self.base() == other.base() {
            Ok(Cow::Borrowed(other))
        } else {
            Ok(Cow::Owned(self.coerce_f64(other.to_f64())?))
        }
    }

    pub(crate) fn coerce_f64(&self, f: f64) -> Result<BasedReal, Error> {
        Self::from_f64(self.base(), f, self.significant())
    }

    pub(crate) fn coerce_int(&self, i: i64) -> BasedReal {
        Self::from_int(self.base(), i, self.significant())
    }
}

/// Iterator over integer numbers, see `BasedReal::range`.
#[derive(Debug, Clone)]
pub struct BasedRange {
    base: RadixBase,
    next: i64,
    stop: i64,
    step: i64,
}

impl Iterator for BasedRange {
    type Item = BasedReal;

    fn next(&mut self) -> Option<Self::Item> {
        let more = (self.step > 0 && self.next < self.stop) || (self.step < 0 && self.next > self.stop);
        if more {
            let ret = BasedReal::from_int(&self.base, self.next, 0);
            self.next = self.next.saturating_add(self.step);
            Some(ret)
        } else {
            None
        }
    }
}

impl ToPrimitive for BasedReal {
    fn to_i64(&self) -> Option<i64> {
        self.to_bigint().to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_bigint().to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(BasedReal::to_f64(self))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::common::consts::{HISTORICAL, INTEGER_AND_SEXAGESIMAL, SEXAGESIMAL, TEMPORAL};
    use core::str::FromStr;
    use rand::random;

    fn sexa(s: &str) -> BasedReal {
        BasedReal::parse(&SEXAGESIMAL, s).unwrap()
    }

    #[test]
    fn test_from_int() {
        let n = BasedReal::from_int(&SEXAGESIMAL, 12, 4);
        assert_eq!(n.left(), &[12]);
        assert_eq!(n.right(), &[0, 0, 0, 0]);
        assert_eq!(n.to_string(), "12 ; 00,00,00,00");
        assert!(BasedReal::from_int(&SEXAGESIMAL, 5, 2) == 5i64);
        assert!(BasedReal::from_int(&SEXAGESIMAL, 0, 0).equals(&sexa("0")));
        assert!(BasedReal::from_int(&SEXAGESIMAL, -3601, 0).equals(&sexa("-1,0,1")));
        assert!(BasedReal::from_int(&HISTORICAL, 60, 0).equals(&BasedReal::parse(&HISTORICAL, "2s0").unwrap()));
        assert!(BasedReal::from_int(&HISTORICAL, 959, 0)
            .equals(&BasedReal::parse(&HISTORICAL, "2r 7s 29").unwrap()));
        assert!(BasedReal::zero(&SEXAGESIMAL, 7).equals(&sexa("0;0,0,0,0,0,0,0")));
        assert!(BasedReal::one(&SEXAGESIMAL, 5).equals(&sexa("1;0,0,0,0,0")));

        for _ in 0..1000 {
            let i = random::<i64>();
            assert_eq!(BasedReal::from_int(&HISTORICAL, i, 0).to_bigint(), BigInt::from(i));
            assert_eq!(BasedReal::from_int(&SEXAGESIMAL, i, 0).to_i64(), Some(i));
        }
    }

    #[test]
    fn test_from_f64() {
        assert!(BasedReal::from_f64(&SEXAGESIMAL, -0.016666666666666666, 2)
            .unwrap()
            .equals(&sexa("-0;1,0")));
        assert!(BasedReal::from_f64(&SEXAGESIMAL, 0.5, 4).unwrap().equals(&sexa("0; 30, 0, 0, 0")));
        assert!(BasedReal::from_f64(&SEXAGESIMAL, 1.0 / 3.0, 4).unwrap().equals(&sexa("0;20,0,0,0")));
        assert!(BasedReal::from_f64(&SEXAGESIMAL, -3.25, 1).unwrap().equals(&sexa("-3;15")));
        assert!(BasedReal::from_f64(&TEMPORAL, 1.5, 2)
            .unwrap()
            .equals(&BasedReal::parse(&TEMPORAL, "1;12,0").unwrap()));
        assert!(matches!(
            BasedReal::from_f64(&SEXAGESIMAL, f64::NAN, 2),
            Err(Error::NonFinite(_))
        ));
        assert!(BasedReal::from_f64(&SEXAGESIMAL, f64::INFINITY, 2).is_err());

        for _ in 0..1000 {
            let f = (random::<f64>() - 0.5) * 1e6;
            let n = BasedReal::from_f64(&SEXAGESIMAL, f, 5).unwrap();
            assert!(n.remainder() < Decimal::ONE);
            assert!((n.to_f64() - f).abs() <= 1e-7);

            let n = BasedReal::from_f64_with_threshold(&HISTORICAL, f, 3, 1.0).unwrap();
            assert!((n.to_f64() - f).abs() <= f.abs() * 1e-12);
        }
    }

    #[test]
    fn test_from_decimal() {
        assert!(BasedReal::from_decimal(&SEXAGESIMAL, Decimal::from_str("0.1").unwrap(), 4)
            .equals(&sexa("0;6,0,0,0")));
        assert!(BasedReal::from_decimal(&SEXAGESIMAL, Decimal::from(5), 2) == 5i64);
        let n = BasedReal::from_decimal(&SEXAGESIMAL, Decimal::from_str("-3723.26").unwrap(), 2);
        assert!(n.equals(&sexa("-1,2,3;15,36")));
        assert_eq!(n.to_decimal().unwrap(), Decimal::from_str("-3723.26").unwrap());
    }

    #[test]
    fn test_built_digits_valid() {
        let valid = |n: &BasedReal| {
            BasedReal::check_parts(n.base(), n.left(), n.right(), n.remainder()).is_ok()
                && n.remainder() < Decimal::ONE
        };

        for base in [&*HISTORICAL, &*TEMPORAL, &*INTEGER_AND_SEXAGESIMAL] {
            for _ in 0..300 {
                let i = random::<i64>();
                let n = BasedReal::from_int(base, i, 2);
                assert!(valid(&n), "{:?}", n);
                assert_eq!(n.to_bigint(), BigInt::from(i));

                let d = Decimal::new(random::<i64>() % 1_000_000_000, 4);
                let n = BasedReal::from_decimal(base, d, 4);
                assert!(valid(&n), "{:?}", n);
                assert!((n.to_decimal().unwrap() - d).abs() < Decimal::new(1, 20));

                let q = BigRational::new((random::<i64>() % 100_000).into(), (random::<i64>() % 997 + 998).into());
                let n = BasedReal::from_fraction(base, &q, Some(5)).unwrap();
                assert!(valid(&n), "{:?}", n);

                let n = n.resize(2).resize(6);
                assert!(valid(&n), "{:?}", n);
            }
        }
    }

    #[test]
    fn test_from_fraction() {
        let q = |n: i64, d: i64| BigRational::new(n.into(), d.into());
        assert!(BasedReal::from_fraction(&SEXAGESIMAL, &q(5, 1), None)
            .unwrap()
            .equals(&BasedReal::from_digits(&SEXAGESIMAL, &[5]).unwrap()));
        assert!(BasedReal::from_fraction(&SEXAGESIMAL, &q(5, 2), None).unwrap().equals(&sexa("2;30")));
        assert!(BasedReal::from_fraction(&SEXAGESIMAL, &q(-1, 7200), None).unwrap().equals(&sexa("-0;0,0,30")));

        let third = BasedReal::from_fraction(&INTEGER_AND_SEXAGESIMAL, &q(1, 3), Some(1)).unwrap();
        assert_eq!(third.right(), &[20]);
        assert!(third.remainder().is_zero());

        let seventh = BasedReal::from_fraction(&SEXAGESIMAL, &q(1, 7), Some(2)).unwrap();
        assert_eq!(seventh.right(), &[8, 34]);
        assert!(seventh.remainder() > Decimal::ZERO);
        let full = BasedReal::from_fraction(&SEXAGESIMAL, &q(1, 7), None).unwrap();
        assert_eq!(full.significant(), 100);
    }

    #[test]
    fn test_convert() {
        let h = BasedReal::parse(&HISTORICAL, "3;15").unwrap();
        assert!(h.convert(&SEXAGESIMAL, 1).unwrap().equals(&sexa("3;15")));
        let s = sexa("-2,31;12,30");
        let c = s.convert(&SEXAGESIMAL, 1).unwrap();
        assert_eq!(c.to_string(), "-02,31 ; 12 |r0.5");
        let t = s.convert(&TEMPORAL, 3).unwrap();
        assert!((t.to_f64() - s.to_f64()).abs() < 1e-9);
    }

    #[test]
    fn test_to_numbers() {
        assert_eq!(sexa("01;20,00").to_f64(), 1.3333333333333333);
        assert_eq!(sexa("14;30,00").to_f64(), 14.5);
        assert_eq!(sexa("1,2,3;15,36").to_decimal().unwrap(), Decimal::from_str("3723.26").unwrap());
        assert_eq!(BasedReal::from_int(&SEXAGESIMAL, 5, 0).to_fraction(), BigRational::from_integer(5.into()));
        assert_eq!(
            sexa("2;30").with_remainder(Decimal::new(5, 1)).to_fraction(),
            BigRational::new(301.into(), 120.into())
        );
        assert_eq!(sexa("-1,2,3;59").to_bigint(), BigInt::from(-3723));

        let n = BasedReal::parse(&HISTORICAL, "2r 7s 29; 45").unwrap();
        assert_eq!(n.to_f64(), 959.75);

        // float, decimal, and fraction conversions agree
        for _ in 0..1000 {
            let n = BasedReal::random(&SEXAGESIMAL, 3, 4);
            let f = n.to_f64();
            let d = n.to_decimal().unwrap().to_f64().unwrap();
            assert!((f - d).abs() <= f.abs() * 1e-12 + 1e-12);
        }
    }

    #[test]
    fn test_range() {
        for _ in 0..100 {
            let start = random::<i64>() % 20;
            let stop = random::<i64>() % 20;
            let step = random::<i64>() % 3;

            let based: Vec<i64> = BasedReal::range(&SEXAGESIMAL, start, stop, step)
                .map(|n| n.to_i64().unwrap())
                .collect();

            let mut expected = vec![];
            let mut i = start;
            while (step > 0 && i < stop) || (step < 0 && i > stop) {
                expected.push(i);
                i += step;
            }
            assert_eq!(based, expected);
        }
        assert_eq!(BasedReal::range(&SEXAGESIMAL, 0, 5, 1).count(), 5);
    }
}
