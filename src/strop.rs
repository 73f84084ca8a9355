//! BasedReal formatting.

use crate::num::BasedReal;
use core::fmt::{Debug, Display, Formatter, Write};
use itertools::Itertools;
use rust_decimal::RoundingStrategy;

impl BasedReal {
    /// Formats the number as `int_digits ; frac_digits |rremainder`.
    /// Digits are zero padded to the width of their radix; the remainder is shown with one
    /// decimal when it is not zero.
    pub fn format(&self) -> String {
        let mut s = String::new();

        if self.is_negative() {
            s.push('-');
        }

        let nleft = self.left().len() as isize;
        for (i, d) in self.left().iter().enumerate() {
            let pos = i as isize - nleft + 1;
            if i > 0 {
                s.push_str(self.base().separator_at(pos));
            }
            let _ = write!(s, "{:0width$}", d, width = self.base().width_at(pos));
        }

        s.push_str(" ;");

        if self.significant() > 0 {
            s.push(' ');
            s.push_str(
                &self
                    .right()
                    .iter()
                    .enumerate()
                    .map(|(i, d)| format!("{:0width$}", d, width = self.base().width_at(i as isize + 1)))
                    .join(","),
            );
        }

        if !self.remainder().is_zero() {
            let r = self
                .remainder()
                .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);
            let _ = write!(s, " |r{:.1}", r);
        }

        s
    }
}

impl Display for BasedReal {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format())
    }
}

impl Debug for BasedReal {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({})", self.base().type_name(), self.format())
    }
}
