//! Addition and subtraction.

use crate::defs::{Digits, Error, Sign};
use crate::num::BasedReal;
use num_traits::{Signed, ToPrimitive};
use rust_decimal::Decimal;

impl BasedReal {
    /// Adds `other` without consulting the precision context.
    /// The result has the larger number of fractional digits of the two operands.
    /// An operand of another base is converted to the base of `self` first.
    pub fn raw_add(&self, other: &BasedReal) -> Result<BasedReal, Error> {
        let other = self.coerce(other)?;
        let other = other.as_ref();

        let maxright = self.significant().max(other.significant());
        let maxleft = self.left().len().max(other.left().len());

        let (fa, fb) = (self.to_fraction(), other.to_fraction());
        if fa == -fb.clone() {
            return Ok(Self::zero(self.base(), maxright));
        }

        // operands are negated so that the sum is positive
        let sign = if fa.abs() > fb.abs() { self.sign() } else { other.sign() };
        let (va, vb) = if sign == Sign::Neg {
            (-self.resize(maxright), -other.resize(maxright))
        } else {
            (self.resize(maxright), other.resize(maxright))
        };

        // signed digits, least significant first
        let len = maxleft + maxright;
        let mut numbers = vec![0i64; len + 1];
        for v in [&va, &vb] {
            let s = v.sign().to_int();
            for (i, d) in v.left().iter().chain(v.right().iter()).rev().enumerate() {
                numbers[i] += s * *d as i64;
            }
        }

        let mut remainder = va.remainder() * Decimal::from(va.sign().to_int())
            + vb.remainder() * Decimal::from(vb.sign().to_int());
        let carry = remainder.floor();
        remainder -= carry;
        numbers[0] += carry.to_i64().ok_or(Error::Overflow)?;

        for i in 0..len {
            let radix = self.base().radix_at(maxright as isize - i as isize) as i64;
            let r = numbers[i];
            if r < 0 || r >= radix {
                numbers[i] = r.rem_euclid(radix);
                numbers[i + 1] += if r > 0 { 1 } else { -1 };
            }
        }

        let mut digits: Digits = numbers.iter().rev().map(|d| d.unsigned_abs() as u32).collect();
        let right = Digits::from_slice(&digits[maxleft + 1..]);
        digits.truncate(maxleft + 1);

        Self::from_parts(self.base().clone(), digits, right, sign, remainder)
    }

    /// Subtracts `other` without consulting the precision context, see `raw_add`.
    pub fn raw_sub(&self, other: &BasedReal) -> Result<BasedReal, Error> {
        self.raw_add(&-other)
    }
}
