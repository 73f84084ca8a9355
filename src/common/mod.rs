//! Shared constants and helpers.

pub mod consts;
pub mod util;
