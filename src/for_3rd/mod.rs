//! Integration with third-party crates.

mod de;
mod ser;
