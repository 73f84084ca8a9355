//! Radix-real is a library of exact positional numbers in historical numeral systems:
//! sexagesimal numbers, degrees counted in zodiacal signs, days and hours, and any
//! user defined mixed radix system.
//!
//! A number keeps its integer digits, its fractional digits, a sign, and a decimal remainder
//! holding the value below its last digit, so that no precision is silently lost.
//!
//! ``` rust
//! use radix_real::{BasedReal, PrecisionMode, Scope, SEXAGESIMAL};
//!
//! let a = BasedReal::parse(&SEXAGESIMAL, "01,21;47,25").unwrap();
//! let b = BasedReal::parse(&SEXAGESIMAL, "45;32,14,22").unwrap();
//!
//! assert_eq!((&a + &b).to_string(), "02,07 ; 19,39,22");
//!
//! // least precise operand decides the precision
//! let c = Scope::new().pmode(PrecisionMode::Sci).run(|| &a + &b);
//! assert_eq!(c.to_string(), "02,07 ; 19,39 |r0.4");
//! ```
//!
//! Arithmetic operators follow a per-thread precision context, see [`ctx`].

#![deny(clippy::suspicious)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::should_implement_trait)]

mod common;
mod conv;
pub mod ctx;
mod defs;
mod ext;
mod num;
mod ops;
mod parser;
mod radix;
mod strop;

#[cfg(feature = "serde")]
mod for_3rd;

pub use crate::common::consts::HISTORICAL;
pub use crate::common::consts::HISTORICAL_DECIMAL;
pub use crate::common::consts::INTEGER_AND_SEXAGESIMAL;
pub use crate::common::consts::SEXAGESIMAL;
pub use crate::common::consts::TEMPORAL;
pub use crate::conv::BasedRange;
pub use crate::ctx::CustomAlgorithm;
pub use crate::ctx::PrecisionContext;
pub use crate::ctx::PrecisionMode;
pub use crate::ctx::Scope;
pub use crate::ctx::TruncatureMode;
pub use crate::defs::Digit;
pub use crate::defs::Error;
pub use crate::defs::Radix;
pub use crate::defs::Sign;
pub use crate::num::BasedReal;
pub use crate::radix::RadixBase;

pub use crate::defs::DEFAULT_ALGORITHM_NAME;
pub use crate::defs::DEFAULT_REMAINDER_THRESHOLD;
