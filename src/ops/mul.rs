//! Multiplication.

use crate::common::util::decimal_to_ratio;
use crate::defs::Error;
use crate::num::BasedReal;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

impl BasedReal {
    /// Multiplies by `other` without consulting the precision context.
    ///
    /// Operands are brought to the same number of fractional digits `n` and multiplied as
    /// integers; the product has `2n` fractional digits, and the contribution of the
    /// remainders is added exactly. Numbers of a mixed base are multiplied through `f64`.
    pub fn raw_mul(&self, other: &BasedReal) -> Result<BasedReal, Error> {
        let other = self.coerce(other)?;
        let other = other.as_ref();

        let (fa, fb) = (self.to_fraction(), other.to_fraction());
        let one = BigRational::one();

        if fa == one {
            return Ok(other.clone());
        } else if fa == -one.clone() {
            return Ok(-other);
        } else if fb == one {
            return Ok(self.clone());
        } else if fb == -one {
            return Ok(-self);
        }

        let max_right = self.significant().max(other.significant());

        if fa.is_zero() || fb.is_zero() {
            return Ok(Self::zero(self.base(), max_right));
        }

        if self.base().is_mixed() {
            return Self::from_f64(self.base(), self.to_f64() * other.to_f64(), self.significant());
        }

        let va = self.resize(max_right);
        let vb = other.resize(max_right);

        let shift = max_right as isize;
        let res_int = va.shift(-shift)?.to_bigint() * vb.shift(-shift)?.to_bigint();
        let res = Self::from_int(self.base(), res_int, 0).shift(2 * shift)?;

        // remainder cross terms
        let factor = BigRational::from_integer(self.base().factor_at(shift));
        let signed = |v: &BasedReal| BigRational::from_integer(BigInt::from(v.sign().to_int()));
        let va_rem = decimal_to_ratio(&va.remainder()) * signed(&va) / &factor;
        let vb_rem = decimal_to_ratio(&vb.remainder()) * signed(&vb) / &factor;
        let rem = va.truncate(None).to_fraction() * &vb_rem
            + vb.truncate(None).to_fraction() * &va_rem
            + va_rem * vb_rem;

        if rem.is_zero() {
            Ok(res)
        } else {
            res.raw_add(&Self::from_fraction(self.base(), &rem, Some(2 * max_right))?)
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::common::consts::{HISTORICAL, SEXAGESIMAL};
    use rust_decimal::Decimal;

    fn sexa(s: &str) -> BasedReal {
        BasedReal::parse(&SEXAGESIMAL, s).unwrap()
    }

    #[test]
    fn test_mul() {
        let a = sexa("01, 12; 04, 17");
        let b = sexa("7; 45, 55");
        let p = a.raw_mul(&b).unwrap();
        assert!(p.equals(&sexa("9,19;39,15,40,35")));
        assert_eq!(p.resize(2).to_string(), "09,19 ; 39,15 |r0.7");

        // identities
        assert!(a.raw_mul(&BasedReal::one(&SEXAGESIMAL, 0)).unwrap().equals(&a));
        assert!(BasedReal::one(&SEXAGESIMAL, 0).raw_mul(&a).unwrap().equals(&a));
        assert!(a.raw_mul(&-BasedReal::one(&SEXAGESIMAL, 3)).unwrap().equals(&-&a));
        assert!(a.raw_mul(&BasedReal::zero(&SEXAGESIMAL, 0)).unwrap().is_zero());

        assert!(sexa("-0;30").raw_mul(&sexa("0;30")).unwrap().equals(&sexa("-0;15,0")));
        assert!(sexa("-0;30").raw_mul(&sexa("-2")).unwrap().equals(&sexa("1;0,0")));

        // remainders are taken into account
        let r = BasedReal::new(&SEXAGESIMAL, &[2], &[0], crate::Sign::Pos, Decimal::new(5, 1)).unwrap();
        let p = r.raw_mul(&sexa("2;0")).unwrap();
        assert!(p.equals(&sexa("4;1,0")));

        // mixed bases go through floats
        let h = BasedReal::parse(&HISTORICAL, "1s 0;30").unwrap();
        let p = h.raw_mul(&BasedReal::parse(&HISTORICAL, "2;0").unwrap()).unwrap();
        assert!(p.equals(&BasedReal::parse(&HISTORICAL, "2s 1;0").unwrap()));
    }

    #[test]
    fn test_mul_random() {
        for _ in 0..1000 {
            let a = BasedReal::random(&SEXAGESIMAL, 3, 3);
            let b = BasedReal::random(&SEXAGESIMAL, 2, 4);

            let p = a.raw_mul(&b).unwrap();
            let f = a.to_f64() * b.to_f64();
            assert!((p.to_f64() - f).abs() <= f.abs() * 1e-12 + 1e-12);
            assert!(p.remainder() < Decimal::ONE);
        }
    }
}
