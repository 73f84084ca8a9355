//! Division, floor division, and modulo.

use crate::defs::Error;
use crate::num::BasedReal;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

impl BasedReal {
    /// Divides by `other` with `significant` fractional digits, without consulting the precision
    /// context. The quotient is produced by long division position by position; the value left
    /// after the last digit becomes the remainder.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `other` is zero.
    pub fn division(&self, other: &BasedReal, significant: usize) -> Result<BasedReal, Error> {
        let other = self.coerce(other)?;
        let other = other.as_ref();

        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }

        if self.is_zero() {
            return Ok(Self::zero(self.base(), significant));
        }

        let d = other.to_fraction();
        if d == BigRational::one() {
            return Ok(self.clone());
        } else if d == -BigRational::one() {
            return Ok(-self);
        }

        let sign = self.sign().mul(other.sign());
        let q = self.to_fraction().abs() / d.abs();

        let ret = Self::from_fraction(self.base(), &q, Some(significant))?;
        Ok(ret.with_sign(sign))
    }

    /// Divides by `other` without consulting the precision context.
    /// The quotient carries one fractional digit more than the most precise operand.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `other` is zero.
    pub fn raw_div(&self, other: &BasedReal) -> Result<BasedReal, Error> {
        let sig = self.significant().max(other.significant()) + 1;
        self.division(other, sig)
    }

    /// Floor of the quotient and the modulo of `self` by `other`:
    /// `self == q * other + m`, where `m` has the sign of `other`.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `other` is zero.
    pub fn div_rem(&self, other: &BasedReal) -> Result<(BasedReal, BasedReal), Error> {
        let other = self.coerce(other)?;
        let other = other.as_ref();

        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let max_sig = self.significant().max(other.significant());

        if self.is_zero() {
            let zero = Self::zero(self.base(), max_sig);
            return Ok((zero.clone(), zero));
        }

        let s_self = self.resize(max_sig);
        let s_other = other.resize(max_sig);

        if !self.base().is_mixed() && s_self.remainder().is_zero() && s_other.remainder().is_zero() {
            let qself = s_self.subunit_quantity(max_sig as isize);
            let qother = s_other.subunit_quantity(max_sig as isize);
            let (fdiv, m) = qself.div_mod_floor(&qother);
            return Ok((
                Self::from_int(self.base(), fdiv, max_sig),
                Self::from_int(self.base(), m, 0).shift(max_sig as isize)?,
            ));
        }

        let (a, b) = (self.to_fraction(), other.to_fraction());
        let fdiv = (&a / &b).floor();
        let m = a - &fdiv * b;

        Ok((
            Self::from_int(self.base(), fdiv.to_integer(), max_sig),
            if m.is_zero() {
                Self::zero(self.base(), max_sig)
            } else {
                Self::from_fraction(self.base(), &m, Some(max_sig))?
            },
        ))
    }

    /// Floor of the quotient of `self` by `other`, see `div_rem`.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `other` is zero.
    pub fn div_floor(&self, other: &BasedReal) -> Result<BasedReal, Error> {
        Ok(self.div_rem(other)?.0)
    }

    /// Modulo of `self` by `other` with the sign of `other`, see `div_rem`.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `other` is zero.
    pub fn modulo(&self, other: &BasedReal) -> Result<BasedReal, Error> {
        Ok(self.div_rem(other)?.1)
    }
}
