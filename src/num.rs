//! BasedReal definition, construction, digit access, and precision operations.

use crate::common::util::{decimal_to_ratio, ratio_to_decimal, to_digit, DecimalRounding};
use crate::defs::{Digit, Digits, Error, Sign};
use crate::radix::RadixBase;
use core::ops::{Bound, RangeBounds};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use rust_decimal::Decimal;
use smallvec::smallvec;

/// A real number written in a `RadixBase`: integer digits, fractional digits, a sign,
/// and a remainder in `[0, 1[` holding the value below the last fractional digit
/// in units of that digit.
///
/// Values are immutable; every operation returns a new number.
#[derive(Clone)]
pub struct BasedReal {
    base: RadixBase,
    left: Digits,
    right: Digits,
    sign: Sign,
    remainder: Decimal,
}

impl BasedReal {
    /// Creates a number from integer digits `left` (most significant first), fractional digits
    /// `right`, `sign`, and `remainder`.
    /// A remainder of exactly 1 is carried into the last fractional digit.
    /// Leading zero integer digits are removed.
    ///
    /// ## Errors
    ///
    ///  - IllegalBaseValue: a digit is negative or not less than the radix of its position.
    ///  - InvalidRemainder: the remainder is outside of `[0, 1]`.
    pub fn new(
        base: &RadixBase,
        left: &[i64],
        right: &[i64],
        sign: Sign,
        remainder: Decimal,
    ) -> Result<Self, Error> {
        let nleft = left.len() as isize;
        let check = |pos: isize, d: i64| -> Result<Digit, Error> {
            let radix = base.radix_at(pos);
            if d < 0 || d >= radix as i64 {
                Err(Error::IllegalBaseValue {
                    base: base.name().to_owned(),
                    radix,
                    digit: d,
                })
            } else {
                Ok(d as Digit)
            }
        };

        let l = left
            .iter()
            .enumerate()
            .map(|(i, d)| check(i as isize - nleft + 1, *d))
            .collect::<Result<Digits, Error>>()?;
        let r = right
            .iter()
            .enumerate()
            .map(|(i, d)| check(i as isize + 1, *d))
            .collect::<Result<Digits, Error>>()?;

        Self::from_parts(base.clone(), l, r, sign, remainder)
    }

    /// Creates an integer number from its digits, most significant first.
    ///
    /// ## Errors
    ///
    ///  - IllegalBaseValue: a digit is negative or not less than the radix of its position.
    pub fn from_digits(base: &RadixBase, left: &[i64]) -> Result<Self, Error> {
        Self::new(base, left, &[], Sign::Pos, Decimal::ZERO)
    }

    /// Validates and normalizes the parts of a number.
    pub(crate) fn from_parts(
        base: RadixBase,
        left: Digits,
        right: Digits,
        sign: Sign,
        remainder: Decimal,
    ) -> Result<Self, Error> {
        Self::check_parts(&base, &left, &right, remainder)?;

        if remainder == Decimal::ONE {
            let ret = Self::trimmed(base, left, right, sign, Decimal::ZERO);
            let unit = ret.unit(ret.significant());
            ret.raw_add(&unit)
        } else {
            Ok(Self::trimmed(base, left, right, sign, remainder))
        }
    }

    /// Checks every digit against the radix of its position, and the remainder.
    pub(crate) fn check_parts(
        base: &RadixBase,
        left: &[Digit],
        right: &[Digit],
        remainder: Decimal,
    ) -> Result<(), Error> {
        let nleft = left.len() as isize;
        for (i, d) in left.iter().chain(right.iter()).enumerate() {
            let pos = i as isize - nleft + 1;
            let radix = base.radix_at(pos);
            if *d >= radix {
                return Err(Error::IllegalBaseValue {
                    base: base.name().to_owned(),
                    radix,
                    digit: *d as i64,
                });
            }
        }

        if remainder.is_sign_negative() && !remainder.is_zero() || remainder > Decimal::ONE {
            return Err(Error::InvalidRemainder(remainder));
        }

        Ok(())
    }

    /// Number from checked parts, without leading zeros.
    pub(crate) fn trimmed(
        base: RadixBase,
        mut left: Digits,
        right: Digits,
        sign: Sign,
        remainder: Decimal,
    ) -> Self {
        let zeros = left.iter().take_while(|d| **d == 0).count();
        if zeros == left.len() {
            left = smallvec![0];
        } else if zeros > 0 {
            left.drain(..zeros);
        }

        BasedReal {
            base,
            left,
            right,
            sign,
            remainder,
        }
    }

    /// One unit at the last of `significant` fractional positions, with the sign of `self`.
    pub(crate) fn unit(&self, significant: usize) -> BasedReal {
        let mut digits: Digits = smallvec![0; significant + 1];
        digits[significant] = 1;
        let right = Digits::from_slice(&digits[1..]);
        digits.truncate(1);
        BasedReal {
            base: self.base.clone(),
            left: digits,
            right,
            sign: self.sign,
            remainder: Decimal::ZERO,
        }
    }

    /// Same digits and sign with another remainder.
    pub(crate) fn with_remainder(&self, remainder: Decimal) -> BasedReal {
        BasedReal {
            remainder,
            ..self.clone()
        }
    }

    /// Base of the number.
    pub fn base(&self) -> &RadixBase {
        &self.base
    }

    /// Integer digits, most significant first.
    pub fn left(&self) -> &[Digit] {
        &self.left
    }

    /// Fractional digits, most significant first.
    pub fn right(&self) -> &[Digit] {
        &self.right
    }

    /// Sign of the number.
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Value below the last fractional digit, in units of that digit.
    pub fn remainder(&self) -> Decimal {
        self.remainder
    }

    /// Number of fractional digits.
    pub fn significant(&self) -> usize {
        self.right.len()
    }

    /// Returns true if every digit and the remainder are zero, regardless of the sign.
    pub fn is_zero(&self) -> bool {
        self.remainder.is_zero() && self.left.iter().chain(self.right.iter()).all(|d| *d == 0)
    }

    /// Returns true if the sign is negative.
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Neg
    }

    /// Digit at position `pos`: `pos <= 0` for integer digits (0 is the rightmost one),
    /// `pos > 0` for fractional digits.
    ///
    /// ## Errors
    ///
    ///  - IndexOutOfRange: there is no digit at `pos`.
    pub fn get(&self, pos: isize) -> Result<Digit, Error> {
        let nleft = self.left.len() as isize;
        if -nleft < pos && pos <= 0 {
            Ok(self.left[(nleft - 1 + pos) as usize])
        } else if pos > 0 && pos as usize <= self.significant() {
            Ok(self.right[pos as usize - 1])
        } else {
            Err(Error::IndexOutOfRange(pos))
        }
    }

    /// Digits of all positions in `range`, from left to right.
    /// Unbounded ends span to the leftmost integer and to the last fractional digit.
    pub fn digits<R: RangeBounds<isize>>(&self, range: R) -> Vec<Digit> {
        let offset = self.left.len() as isize - 1;
        let total = (self.left.len() + self.right.len()) as isize;

        let start = match range.start_bound() {
            Bound::Included(s) => s + offset,
            Bound::Excluded(s) => s + offset + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(e) => e + offset + 1,
            Bound::Excluded(e) => e + offset,
            Bound::Unbounded => total,
        };

        let start = start.clamp(0, total) as usize;
        let end = end.clamp(0, total) as usize;

        self.left
            .iter()
            .chain(self.right.iter())
            .skip(start)
            .take(end.saturating_sub(start))
            .copied()
            .collect()
    }

    /// Returns the number with `significant` fractional digits.
    /// Extra digits are produced from the remainder; dropped digits are folded into it.
    pub fn resize(&self, significant: usize) -> BasedReal {
        let cur = self.significant();

        if significant == cur {
            return self.clone();
        }

        if significant > cur {
            let mut right = self.right.clone();
            let mut value = self.remainder;
            for pos in cur + 1..=significant {
                value *= Decimal::from(self.base.radix_at(pos as isize));
                let d = value.trunc();
                value -= d;
                right.push(to_digit(&d));
            }

            BasedReal {
                base: self.base.clone(),
                left: self.left.clone(),
                right,
                sign: self.sign,
                remainder: value,
            }
        } else {
            let mut rem = decimal_to_ratio(&self.remainder);
            for pos in (significant + 1..=cur).rev() {
                rem = (rem + BigRational::from_integer(self.right[pos - 1].into()))
                    / BigRational::from_integer(self.base.radix_at(pos as isize).into());
            }

            // below one, so it always fits a decimal
            let remainder = ratio_to_decimal(&rem, DecimalRounding::Truncate);
            debug_assert!(remainder.is_ok(), "remainder {} out of range", rem);
            let remainder = remainder.unwrap_or(Decimal::ZERO);

            BasedReal {
                base: self.base.clone(),
                left: self.left.clone(),
                right: Digits::from_slice(&self.right[..significant]),
                sign: self.sign,
                remainder,
            }
        }
    }

    /// Drops fractional digits past `significant` and the remainder, without rounding.
    /// `None` keeps every fractional digit. A negative value also zeroes the `-significant`
    /// lowest integer digits. Asking for more digits than present returns the number unchanged.
    pub fn truncate(&self, significant: Option<isize>) -> BasedReal {
        let n = significant.unwrap_or(self.significant() as isize);

        if n > self.significant() as isize {
            return self.clone();
        }

        let mut left = self.left.clone();
        let right = if n >= 0 {
            Digits::from_slice(&self.right[..n as usize])
        } else {
            let len = left.len();
            for d in left.iter_mut().skip(len.saturating_sub(n.unsigned_abs())) {
                *d = 0;
            }
            Digits::new()
        };

        let zeros = left.iter().take_while(|d| **d == 0).count();
        if zeros == left.len() {
            left = smallvec![0];
        } else {
            left.drain(..zeros);
        }

        BasedReal {
            base: self.base.clone(),
            left,
            right,
            sign: self.sign,
            remainder: Decimal::ZERO,
        }
    }

    /// Rounds to `significant` fractional digits, half away from zero.
    /// `None` rounds with respect to the remainder alone.
    pub fn round(&self, significant: Option<usize>) -> Result<BasedReal, Error> {
        let n = significant.unwrap_or(self.significant());
        let mut ret = self.resize(n);

        if ret.remainder >= Decimal::new(5, 1) {
            let unit = ret.unit(n);
            ret = ret.raw_add(&unit)?;
        }

        Ok(ret.truncate(Some(n as isize)))
    }

    /// Greatest number with `significant` fractional digits not greater than `self`.
    pub fn floor(&self, significant: Option<usize>) -> Result<BasedReal, Error> {
        self.round_toward(significant, Sign::Pos)
    }

    /// Least number with `significant` fractional digits not less than `self`.
    pub fn ceil(&self, significant: Option<usize>) -> Result<BasedReal, Error> {
        self.round_toward(significant, Sign::Neg)
    }

    // numbers of sign `truncated` are truncated; others are moved one unit away from zero
    // through rounding a remainder of exactly one half.
    fn round_toward(&self, significant: Option<usize>, truncated: Sign) -> Result<BasedReal, Error> {
        let resized = match significant {
            Some(n) => self.resize(n),
            None => self.clone(),
        };

        if resized.remainder.is_zero() || resized.sign == truncated {
            Ok(resized.truncate(None))
        } else {
            resized.with_remainder(Decimal::new(5, 1)).round(None)
        }
    }

    /// Removes trailing zero fractional digits when the remainder is zero.
    pub fn minimize_precision(&self) -> BasedReal {
        if !self.remainder.is_zero() {
            return self.clone();
        }

        let zeros = self.right.iter().rev().take_while(|d| **d == 0).count();
        if zeros == 0 {
            self.clone()
        } else {
            self.truncate(Some((self.significant() - zeros) as isize))
        }
    }

    /// Moves the digits `i` positions to the right (`i > 0`, division by the base)
    /// or to the left (`i < 0`, multiplication by the base).
    ///
    /// ## Errors
    ///
    ///  - NotImplemented: the base is mixed.
    pub fn shift(&self, i: isize) -> Result<BasedReal, Error> {
        if i == 0 {
            return Ok(self.clone());
        }

        if self.base.is_mixed() {
            return Err(Error::NotImplemented("shift of a number in a mixed base"));
        }

        let k = i.unsigned_abs();
        let (left, right, remainder) = if i > 0 {
            let nleft = self.left.len();
            let mut all: Digits = smallvec![0; k];
            all.extend_from_slice(&self.left);
            all.extend_from_slice(&self.right);
            let right = Digits::from_slice(&all[nleft..]);
            all.truncate(nleft);
            (all, right, self.remainder)
        } else {
            let r = self.resize(self.significant().max(k));
            let mut left = r.left.clone();
            left.extend_from_slice(&r.right[..k]);
            (left, Digits::from_slice(&r.right[k..]), r.remainder)
        };

        Self::from_parts(self.base.clone(), left, right, self.sign, remainder)
    }

    /// Integer amount of units of position `i` in the number, truncated:
    /// `1,0 ; 2,30` holds 3602 units of position 1 and 1 unit of position -1.
    pub fn subunit_quantity(&self, i: isize) -> BigInt {
        let r = self.resize(i.max(0) as usize + 1);
        let mut res = BigInt::zero();
        let mut factor = BigInt::from(1u32);
        let mut pos = i;
        while let Ok(d) = r.get(pos) {
            res += &factor * d;
            factor *= self.base.radix_at(pos);
            pos -= 1;
        }
        if self.sign == Sign::Neg {
            -res
        } else {
            res
        }
    }

    /// Strict equality: same base, digits, sign, and remainder.
    /// `1 ; 30` and `1 ; 30,00` are numerically equal but not strictly equal.
    pub fn equals(&self, other: &BasedReal) -> bool {
        self.base == other.base
            && self.left == other.left
            && self.right == other.right
            && self.sign == other.sign
            && self.remainder == other.remainder
    }

    /// Absolute value.
    pub fn abs(&self) -> BasedReal {
        BasedReal {
            sign: Sign::Pos,
            ..self.clone()
        }
    }

    /// The number with sign `s`.
    pub(crate) fn with_sign(mut self, s: Sign) -> BasedReal {
        self.sign = s;
        self
    }

    /// Returns a random number with `int_digits` integer digits and `significant` fractional digits.
    #[cfg(feature = "random")]
    pub fn random(base: &RadixBase, int_digits: usize, significant: usize) -> BasedReal {
        use rand::random;

        let nleft = int_digits.max(1) as isize;
        let left: Digits = (0..nleft)
            .map(|i| random::<Digit>() % base.radix_at(i - nleft + 1))
            .collect();
        let right: Digits = (1..=significant as isize)
            .map(|p| random::<Digit>() % base.radix_at(p))
            .collect();
        let remainder = Decimal::new((random::<u64>() % 1_000_000_000_000_000_000) as i64, 18);
        let sign = if random::<bool>() { Sign::Pos } else { Sign::Neg };

        let mut ret = BasedReal {
            base: base.clone(),
            left,
            right,
            sign,
            remainder,
        };
        let zeros = ret.left.iter().take_while(|d| **d == 0).count();
        if zeros == ret.left.len() {
            ret.left = smallvec![0];
        } else {
            ret.left.drain(..zeros);
        }
        ret
    }
}
