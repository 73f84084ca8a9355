//! Square root.

use crate::ctx;
use crate::defs::Error;
use crate::num::BasedReal;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One};

impl BasedReal {
    /// Computes the square root with the Babylonian method, each step performed in the current
    /// precision context. By default the number of iterations is the number of fractional digits
    /// the context gives to an operation on `self` and `self`.
    /// Numbers below one start from the `f64` square root and are not iterated.
    ///
    /// ## Errors
    ///
    ///  - NegativeSqrt: `self` is negative.
    ///  - NotImplemented: the precision mode of the context is `Full`.
    pub fn sqrt(&self, iterations: Option<usize>) -> Result<BasedReal, Error> {
        if self.is_zero() {
            return Ok(self.clone());
        }

        if self.is_negative() {
            return Err(Error::NegativeSqrt);
        }

        let mut iterations = match iterations {
            Some(n) => n,
            None => ctx::current().get_pmode().significant(self, self)?,
        };

        let f = self.to_f64().sqrt();
        let mut res = if self.to_fraction() >= BigRational::one() {
            let seed = BigInt::from_f64(f.floor()).ok_or(Error::NonFinite(f))?;
            Self::from_int(self.base(), seed, 0)
        } else {
            iterations = 0;
            Self::from_f64(self.base(), f, self.significant())?
        };

        let two = Self::from_int(self.base(), 2, 0);
        for _ in 0..iterations {
            res = res.try_add(&self.try_div(&res)?)?;
            res = res.try_div(&two)?;
        }

        Ok(res)
    }
}
