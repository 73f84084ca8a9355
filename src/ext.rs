//! Operator traits of `BasedReal`.
//!
//! Arithmetic operators follow the precision context of the current thread, see `ctx`.
//! Operators can not return errors: invalid operations, like division by zero, panic.
//! Use `try_add`, `try_sub`, `try_mul`, `try_div`, and `modulo` to handle errors.

use crate::defs::Error;
use crate::num::BasedReal;
use core::cmp::Ordering;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Shl, Shr, Sub, SubAssign,
};
use num_bigint::BigInt;
use num_rational::BigRational;

fn unwrap_or_panic(r: Result<BasedReal, Error>) -> BasedReal {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

macro_rules! impl_arith_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $fallible:ident) => {
        impl $trait<&BasedReal> for &BasedReal {
            type Output = BasedReal;
            fn $method(self, rhs: &BasedReal) -> Self::Output {
                unwrap_or_panic(BasedReal::$fallible(self, rhs))
            }
        }

        impl $trait<BasedReal> for BasedReal {
            type Output = BasedReal;
            fn $method(self, rhs: BasedReal) -> Self::Output {
                unwrap_or_panic(BasedReal::$fallible(&self, &rhs))
            }
        }

        impl $trait<&BasedReal> for BasedReal {
            type Output = BasedReal;
            fn $method(self, rhs: &BasedReal) -> Self::Output {
                unwrap_or_panic(BasedReal::$fallible(&self, rhs))
            }
        }

        impl $trait<BasedReal> for &BasedReal {
            type Output = BasedReal;
            fn $method(self, rhs: BasedReal) -> Self::Output {
                unwrap_or_panic(BasedReal::$fallible(self, &rhs))
            }
        }

        impl $trait<f64> for &BasedReal {
            type Output = BasedReal;
            fn $method(self, rhs: f64) -> Self::Output {
                let rhs = unwrap_or_panic(self.coerce_f64(rhs));
                unwrap_or_panic(BasedReal::$fallible(self, &rhs))
            }
        }

        impl $trait<f64> for BasedReal {
            type Output = BasedReal;
            fn $method(self, rhs: f64) -> Self::Output {
                $trait::$method(&self, rhs)
            }
        }

        impl $trait<i64> for &BasedReal {
            type Output = BasedReal;
            fn $method(self, rhs: i64) -> Self::Output {
                unwrap_or_panic(BasedReal::$fallible(self, &self.coerce_int(rhs)))
            }
        }

        impl $trait<i64> for BasedReal {
            type Output = BasedReal;
            fn $method(self, rhs: i64) -> Self::Output {
                $trait::$method(&self, rhs)
            }
        }

        impl $trait<&BasedReal> for f64 {
            type Output = BasedReal;
            fn $method(self, rhs: &BasedReal) -> Self::Output {
                let lhs = unwrap_or_panic(rhs.coerce_f64(self));
                unwrap_or_panic(BasedReal::$fallible(&lhs, rhs))
            }
        }

        impl $trait<BasedReal> for f64 {
            type Output = BasedReal;
            fn $method(self, rhs: BasedReal) -> Self::Output {
                $trait::$method(self, &rhs)
            }
        }

        impl $trait<&BasedReal> for i64 {
            type Output = BasedReal;
            fn $method(self, rhs: &BasedReal) -> Self::Output {
                unwrap_or_panic(BasedReal::$fallible(&rhs.coerce_int(self), rhs))
            }
        }

        impl $trait<BasedReal> for i64 {
            type Output = BasedReal;
            fn $method(self, rhs: BasedReal) -> Self::Output {
                $trait::$method(self, &rhs)
            }
        }

        impl $assign_trait<&BasedReal> for BasedReal {
            fn $assign_method(&mut self, rhs: &BasedReal) {
                *self = $trait::$method(&*self, rhs);
            }
        }

        impl $assign_trait<BasedReal> for BasedReal {
            fn $assign_method(&mut self, rhs: BasedReal) {
                *self = $trait::$method(&*self, &rhs);
            }
        }

        impl $assign_trait<f64> for BasedReal {
            fn $assign_method(&mut self, rhs: f64) {
                *self = $trait::$method(&*self, rhs);
            }
        }

        impl $assign_trait<i64> for BasedReal {
            fn $assign_method(&mut self, rhs: i64) {
                *self = $trait::$method(&*self, rhs);
            }
        }
    };
}

impl_arith_op!(Add, add, AddAssign, add_assign, try_add);
impl_arith_op!(Sub, sub, SubAssign, sub_assign, try_sub);
impl_arith_op!(Mul, mul, MulAssign, mul_assign, try_mul);
impl_arith_op!(Div, div, DivAssign, div_assign, try_div);

// modulo is exact and does not use the context
impl_arith_op!(Rem, rem, RemAssign, rem_assign, modulo);

impl Neg for BasedReal {
    type Output = BasedReal;
    fn neg(self) -> Self::Output {
        let s = self.sign().invert();
        self.with_sign(s)
    }
}

impl Neg for &BasedReal {
    type Output = BasedReal;
    fn neg(self) -> Self::Output {
        self.clone().with_sign(self.sign().invert())
    }
}

/// `x << n` moves the digits of `x` by `n` positions to the left.
impl Shl<isize> for &BasedReal {
    type Output = BasedReal;
    fn shl(self, rhs: isize) -> Self::Output {
        unwrap_or_panic(self.shift(-rhs))
    }
}

impl Shl<isize> for BasedReal {
    type Output = BasedReal;
    fn shl(self, rhs: isize) -> Self::Output {
        Shl::shl(&self, rhs)
    }
}

/// `x >> n` moves the digits of `x` by `n` positions to the right.
impl Shr<isize> for &BasedReal {
    type Output = BasedReal;
    fn shr(self, rhs: isize) -> Self::Output {
        unwrap_or_panic(self.shift(rhs))
    }
}

impl Shr<isize> for BasedReal {
    type Output = BasedReal;
    fn shr(self, rhs: isize) -> Self::Output {
        Shr::shr(&self, rhs)
    }
}

//
// Comparison.
//

/// Numbers of the same base are compared through their decimal value, and exactly when
/// the decimal value overflows. Numbers of different bases are compared through `f64`.
impl PartialOrd for BasedReal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.base() == other.base() {
            match (self.to_decimal(), other.to_decimal()) {
                (Ok(a), Ok(b)) => a.partial_cmp(&b),
                _ => self.to_fraction().partial_cmp(&other.to_fraction()),
            }
        } else {
            self.to_f64().partial_cmp(&other.to_f64())
        }
    }
}

impl PartialEq for BasedReal {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<f64> for BasedReal {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.to_f64().partial_cmp(other)
    }
}

impl PartialEq<f64> for BasedReal {
    fn eq(&self, other: &f64) -> bool {
        self.to_f64() == *other
    }
}

impl PartialOrd<i64> for BasedReal {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.to_fraction()
            .partial_cmp(&BigRational::from_integer(BigInt::from(*other)))
    }
}

impl PartialEq<i64> for BasedReal {
    fn eq(&self, other: &i64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<BasedReal> for f64 {
    fn partial_cmp(&self, other: &BasedReal) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

impl PartialEq<BasedReal> for f64 {
    fn eq(&self, other: &BasedReal) -> bool {
        other == self
    }
}

impl PartialOrd<BasedReal> for i64 {
    fn partial_cmp(&self, other: &BasedReal) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

impl PartialEq<BasedReal> for i64 {
    fn eq(&self, other: &BasedReal) -> bool {
        other == self
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::common::consts::{HISTORICAL, SEXAGESIMAL};
    use crate::ctx::{PrecisionMode, Scope};

    fn sexa(s: &str) -> BasedReal {
        BasedReal::parse(&SEXAGESIMAL, s).unwrap()
    }

    #[test]
    fn test_ops() {
        let a = sexa("01, 21; 47, 25");
        let b = sexa("45; 32, 14, 22");

        assert!((&a + &b).equals(&sexa("02,07;19,39,22")));
        assert!((a.clone() + b.clone()).equals(&sexa("02,07;19,39,22")));
        assert!((&a - &b).equals(&sexa("36;15,10,38")));
        assert!((&a - &a).is_zero());

        let mut c = a.clone();
        c += &b;
        c -= b.clone();
        assert!(c == a);
        c *= 2i64;
        assert!(c == &a + &a);
        c /= 2i64;
        assert!(c == a);

        // integer and float operands
        assert!(&sexa("1;30") + 1i64 == 2.5);
        assert!(1i64 + sexa("1;30") == 2.5);
        assert!(sexa("1;30") * 2.0 == 3i64);
        assert!(3.0 - sexa("1;30") == 1.5);
        assert!(6i64 / sexa("2") == 3i64);

        assert!(sexa("7;30") % sexa("2") == 1.5);
        assert!(sexa("-7;30") % 2i64 == 0.5);
        let mut r = sexa("7;30");
        r %= sexa("-2");
        assert!(r == -0.5);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_div_by_zero_panics() {
        let _ = sexa("1") / sexa("0");
    }

    #[test]
    fn test_neg_shift() {
        let a = sexa("1;30");
        assert!((-&a).equals(&sexa("-1;30")));
        assert!((-(-a.clone())).equals(&a));
        assert!((-sexa("0")).is_negative());

        assert!((&a << 1).equals(&sexa("1,30;")));
        assert!((a.clone() >> 1).equals(&sexa("0;1,30")));
    }

    #[test]
    fn test_cmp() {
        let a = sexa("1;30");
        let b = sexa("1;30,0,0");
        assert!(a == b);
        assert!(!a.equals(&b));
        assert!(sexa("-0;0") == sexa("0"));

        assert!(sexa("1;29,59") < a);
        assert!(-&a < sexa("-1;29"));
        assert!(a > 1i64 && a < 2i64 && a == 1.5);
        assert!(1.5 == a && 2i64 > a && 1.0 < a);
        assert!(a != 1i64);

        // one sign of 30 degrees and 0;30
        let h = BasedReal::parse(&HISTORICAL, "1s 0;30").unwrap();
        assert!(h == sexa("30;30"));
        assert!(h > sexa("30;29"));
        assert!(h < sexa("30;31"));
        assert!(sexa("30;30") == h);
    }

    #[test]
    fn test_ops_in_context() {
        let a = sexa("0;30,0,0,6");
        let b = sexa("0;0,1");
        let c = Scope::new().pmode(PrecisionMode::Sci).run(|| &a + &b);
        assert_eq!(c.significant(), 2);
        assert_eq!(c.to_string(), "00 ; 30,01 |r0.0");
    }
}
