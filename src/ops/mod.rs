//! Arithmetic operations on the numbers.
//!
//! The `raw_*` operations and `division` ignore the precision context.
//! The `try_*` operations go through it.

mod add;
mod div;
mod mul;
mod pow;
mod sqrt;


use crate::ctx::{self, Operation};
use crate::defs::Error;
use crate::num::BasedReal;

impl BasedReal {
    /// Adds `other` following the precision context of the current thread.
    ///
    /// ## Errors
    ///
    ///  - NotImplemented: the precision mode is `Full`.
    ///  - Any error of a custom addition algorithm.
    pub fn try_add(&self, other: &BasedReal) -> Result<BasedReal, Error> {
        ctx::apply(Operation::Add, self, other)
    }

    /// Subtracts `other` following the precision context of the current thread.
    ///
    /// ## Errors
    ///
    ///  - NotImplemented: the precision mode is `Full`.
    ///  - Any error of a custom subtraction algorithm.
    pub fn try_sub(&self, other: &BasedReal) -> Result<BasedReal, Error> {
        ctx::apply(Operation::Sub, self, other)
    }

    /// Multiplies by `other` following the precision context of the current thread.
    ///
    /// ## Errors
    ///
    ///  - NotImplemented: the precision mode is `Full`.
    ///  - Any error of a custom multiplication algorithm.
    pub fn try_mul(&self, other: &BasedReal) -> Result<BasedReal, Error> {
        ctx::apply(Operation::Mul, self, other)
    }

    /// Divides by `other` following the precision context of the current thread.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `other` is zero.
    ///  - NotImplemented: the precision mode is `Full`.
    ///  - Any error of a custom division algorithm.
    pub fn try_div(&self, other: &BasedReal) -> Result<BasedReal, Error> {
        ctx::apply(Operation::Div, self, other)
    }
}
