//! Exponentiation.

use crate::defs::Error;
use crate::num::BasedReal;

impl BasedReal {
    /// Raises `self` to the power `exponent`.
    /// The integer part of the exponent is applied by repeated multiplication or division in the
    /// current precision context; a fractional part is applied as a factor computed with `f64`.
    ///
    /// ## Errors
    ///
    ///  - NonFinite: `exponent` is NaN or infinite.
    ///  - NegativePow: `self` is negative and `exponent` is not an integer.
    ///  - DivisionByZero: `self` is zero and `exponent` is negative.
    pub fn pow(&self, exponent: f64) -> Result<BasedReal, Error> {
        let mut res = Self::one(self.base(), self.significant());

        if exponent == 0.0 {
            return Ok(res);
        }

        if !exponent.is_finite() {
            return Err(Error::NonFinite(exponent));
        }

        if self.is_zero() {
            return if exponent < 0.0 {
                Err(Error::DivisionByZero)
            } else {
                Ok(self.clone())
            };
        }

        let int_exp = exponent.trunc();
        let f_exp = exponent - int_exp;

        if self.is_negative() && f_exp != 0.0 {
            return Err(Error::NegativePow);
        }

        for _ in 0..int_exp.abs() as u64 {
            res = if int_exp > 0.0 {
                res.try_mul(self)?
            } else {
                res.try_div(self)?
            };
        }

        if f_exp != 0.0 {
            let factor = Self::from_f64(self.base(), self.to_f64().powf(f_exp), res.significant())?;
            res = res.try_mul(&factor)?;
        }

        Ok(res)
    }

    /// Raises `self` to the integer power `n`, see `pow`.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `self` is zero and `n` is negative.
    pub fn powi(&self, n: i32) -> Result<BasedReal, Error> {
        self.pow(n as f64)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::common::consts::{HISTORICAL, SEXAGESIMAL};

    fn sexa(s: &str) -> BasedReal {
        BasedReal::parse(&SEXAGESIMAL, s).unwrap()
    }

    #[test]
    fn test_pow() {
        let a = sexa("1;30");
        assert!(a.pow(0.0).unwrap().equals(&sexa("1;0")));
        assert!(a.pow(1.0).unwrap() == a);
        assert!(a.pow(2.0).unwrap().equals(&sexa("2;15")));
        assert!(a.powi(3).unwrap() == 3.375);
        assert!(sexa("2").pow(-2.0).unwrap() == 0.25);
        assert!(sexa("-2").powi(3).unwrap() == -8i64);
        assert!((sexa("4").pow(0.5).unwrap().to_f64() - 2.0).abs() < 1e-9);
        assert!((sexa("2;0,0").pow(1.5).unwrap().to_f64() - 8f64.sqrt()).abs() < 1e-5);

        let z = sexa("0;0");
        assert!(z.pow(3.0).unwrap().is_zero());
        assert_eq!(z.pow(-1.0).err(), Some(Error::DivisionByZero));
        assert_eq!(sexa("-2").pow(0.5).err(), Some(Error::NegativePow));
        assert!(matches!(sexa("2").pow(f64::NAN), Err(Error::NonFinite(_))));

        let h = BasedReal::parse(&HISTORICAL, "1s 0").unwrap();
        assert!(h.powi(2).unwrap() == 900i64);
    }
}
