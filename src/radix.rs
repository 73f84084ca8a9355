//! Numeral system descriptors and the registry of named bases.

use crate::common::util::{camel_case, ndigit_for_radix};
use crate::defs::{Error, Radix};
use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_traits::One;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

lazy_static! {
    static ref REGISTRY: Mutex<HashMap<String, RadixBase>> = {
        let mut m = HashMap::new();
        for base in crate::common::consts::standard_bases() {
            m.insert(base.type_name().to_owned(), base);
        }
        Mutex::new(m)
    };
}

struct BaseInner {
    name: String,
    type_name: String,
    left: Vec<Radix>,
    right: Vec<Radix>,
    separators: Vec<String>,
    mixed: bool,
    factors: Mutex<HashMap<isize, BigInt>>,
}

/// A positional numeral system.
///
/// Integer radices are listed most significant first, the last one being the radix of
/// position 0 (the digit just before `;`). Fractional radices are listed from position 1
/// rightward. Positions outside of the listed ones reuse the outermost listed radix.
///
/// `RadixBase` is a cheap handle: clones share the same descriptor.
#[derive(Clone)]
pub struct RadixBase {
    inner: Arc<BaseInner>,
}

/// Element of `list` at `key`, where keys past either end return the outermost element.
fn looping<T>(list: &[T], key: isize) -> &T {
    let len = list.len() as isize;
    if key >= len {
        &list[list.len() - 1]
    } else if key < -len {
        &list[0]
    } else if key < 0 {
        &list[(len + key) as usize]
    } else {
        &list[key as usize]
    }
}

impl RadixBase {
    /// Defines a new numeral system and records it in the registry under the
    /// CamelCase form of `name` (`example_base` becomes `ExampleBase`).
    /// Separators are displayed before each integer digit except the leftmost one; by default
    /// `,` is used, or nothing for positions of radix 10.
    ///
    /// ## Errors
    ///
    ///  - EmptyRadix: `left` or `right` is empty.
    ///  - InvalidRadix: a radix is zero.
    ///  - SeparatorCount: the number of separators differs from the number of integer radices.
    ///  - DuplicateBase: a base with the same name is already registered.
    pub fn new(
        left: &[Radix],
        right: &[Radix],
        name: &str,
        separators: Option<&[&str]>,
    ) -> Result<Self, Error> {
        let base = Self::build(left, right, name, separators)?;

        let mut registry = REGISTRY.lock();
        if registry.contains_key(base.type_name()) {
            return Err(Error::DuplicateBase(base.type_name().to_owned()));
        }
        registry.insert(base.type_name().to_owned(), base.clone());

        tracing::debug!(base = base.type_name(), mixed = base.is_mixed(), "registered radix base");

        Ok(base)
    }

    /// Builds a descriptor without registering it.
    pub(crate) fn build(
        left: &[Radix],
        right: &[Radix],
        name: &str,
        separators: Option<&[&str]>,
    ) -> Result<Self, Error> {
        if left.is_empty() || right.is_empty() {
            return Err(Error::EmptyRadix(name.to_owned()));
        }

        if let Some(r) = left.iter().chain(right.iter()).find(|r| **r == 0) {
            return Err(Error::InvalidRadix {
                name: name.to_owned(),
                radix: *r as i64,
            });
        }

        let separators = match separators {
            Some(s) => {
                if s.len() != left.len() {
                    return Err(Error::SeparatorCount {
                        expected: left.len(),
                        found: s.len(),
                    });
                }
                s.iter().map(|s| (*s).to_owned()).collect()
            }
            None => left
                .iter()
                .map(|r| if *r != 10 { ",".to_owned() } else { String::new() })
                .collect(),
        };

        let mixed = left.iter().chain(right.iter()).any(|r| *r != left[0]);

        Ok(RadixBase {
            inner: Arc::new(BaseInner {
                name: name.to_owned(),
                type_name: camel_case(name),
                left: left.to_vec(),
                right: right.to_vec(),
                separators,
                mixed,
                factors: Mutex::new(HashMap::new()),
            }),
        })
    }

    /// Looks up a registered base by its CamelCase name.
    ///
    /// ## Errors
    ///
    ///  - UnknownBase: no base with this name was registered.
    pub fn get(type_name: &str) -> Result<Self, Error> {
        REGISTRY
            .lock()
            .get(type_name)
            .cloned()
            .ok_or_else(|| Error::UnknownBase(type_name.to_owned()))
    }

    /// Names of all registered bases, sorted.
    pub fn registered() -> Vec<String> {
        let mut names: Vec<String> = REGISTRY.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Name the base was defined with.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Registry name of the base.
    pub fn type_name(&self) -> &str {
        &self.inner.type_name
    }

    /// Integer radices, most significant first.
    pub fn left(&self) -> &[Radix] {
        &self.inner.left
    }

    /// Fractional radices, from position 1.
    pub fn right(&self) -> &[Radix] {
        &self.inner.right
    }

    /// Integer separators as defined.
    pub fn separators(&self) -> &[String] {
        &self.inner.separators
    }

    /// Returns true if not every position uses the same radix.
    pub fn is_mixed(&self) -> bool {
        self.inner.mixed
    }

    /// Radix at position `pos`: `pos <= 0` addresses integer positions (0 is the rightmost one),
    /// `pos > 0` fractional positions.
    pub fn radix_at(&self, pos: isize) -> Radix {
        if pos <= 0 {
            *looping(&self.inner.left, pos - 1)
        } else {
            *looping(&self.inner.right, pos - 1)
        }
    }

    /// Separator displayed before the integer digit at position `pos`.
    pub fn separator_at(&self, pos: isize) -> &str {
        looping(&self.inner.separators, pos.min(0) - 1).as_str()
    }

    /// Number of characters a digit at position `pos` is padded to.
    pub fn width_at(&self, pos: isize) -> usize {
        ndigit_for_radix(self.radix_at(pos))
    }

    /// Weight of a digit at position `pos` relative to position 0.
    /// For `pos <= 0` it is the product of the radices at positions `0, -1, .., pos + 1`,
    /// the value of one unit at `pos`. For `pos > 0` it is the product of the radices at
    /// positions `1, .., pos`, the number of units at `pos` in one unit at position 0.
    pub fn factor_at(&self, pos: isize) -> BigInt {
        if let Some(f) = self.inner.factors.lock().get(&pos) {
            return f.clone();
        }

        let mut factor = BigInt::one();
        if pos > 0 {
            for p in 1..=pos {
                factor *= self.radix_at(p);
            }
        } else {
            for p in (pos + 1)..=0 {
                factor *= self.radix_at(p);
            }
        }

        self.inner.factors.lock().insert(pos, factor.clone());
        factor
    }
}

impl PartialEq for RadixBase {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.type_name == other.inner.type_name
    }
}

impl Eq for RadixBase {}

impl Debug for RadixBase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadixBase")
            .field("name", &self.inner.name)
            .field("left", &self.inner.left)
            .field("right", &self.inner.right)
            .field("separators", &self.inner.separators)
            .field("mixed", &self.inner.mixed)
            .finish()
    }
}

impl Display for RadixBase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::common::consts::{HISTORICAL, SEXAGESIMAL, TEMPORAL};

    #[test]
    fn test_looping() {
        let l = [0, 1, 2];
        assert_eq!(*looping(&l, 45), 2);
        assert_eq!(*looping(&l, -5), 0);
        assert_eq!(*looping(&l, -1), 2);
        assert_eq!(*looping(&l, 1), 1);
    }

    #[test]
    fn test_radix_at() {
        let h = &*HISTORICAL;
        assert_eq!(h.radix_at(0), 30);
        assert_eq!(h.radix_at(-1), 12);
        assert_eq!(h.radix_at(-2), 10);
        assert_eq!(h.radix_at(-100), 10);
        assert_eq!(h.radix_at(1), 60);
        assert_eq!(h.radix_at(100), 60);
        assert_eq!(h.separator_at(0), "s ");
        assert_eq!(h.separator_at(-1), "r ");
        assert_eq!(h.separator_at(-2), "");
        assert!(h.is_mixed());

        let t = &*TEMPORAL;
        assert_eq!(t.radix_at(1), 24);
        assert_eq!(t.radix_at(2), 60);
        assert_eq!(t.radix_at(7), 60);
        assert_eq!(t.separator_at(-3), "");

        assert!(!SEXAGESIMAL.is_mixed());
        assert_eq!(SEXAGESIMAL.separator_at(0), ",");
    }

    #[test]
    fn test_factor_at() {
        assert_eq!(SEXAGESIMAL.factor_at(-2), BigInt::from(3600));
        assert_eq!(SEXAGESIMAL.factor_at(0), BigInt::from(1));
        assert_eq!(SEXAGESIMAL.factor_at(3), BigInt::from(216000));
        assert_eq!(HISTORICAL.factor_at(-2), BigInt::from(360));
        assert_eq!(HISTORICAL.factor_at(-3), BigInt::from(3600));
        assert_eq!(TEMPORAL.factor_at(2), BigInt::from(1440));
        // memoized
        assert_eq!(TEMPORAL.factor_at(2), BigInt::from(1440));
    }

    #[test]
    fn test_bases() {
        assert_eq!(RadixBase::get("Sexagesimal").unwrap(), *SEXAGESIMAL);
        assert_eq!(
            RadixBase::new(&[1], &[2], "Sexagesimal", None),
            Err(Error::DuplicateBase("Sexagesimal".into()))
        );
        assert_eq!(
            RadixBase::get("NoSuchBase"),
            Err(Error::UnknownBase("NoSuchBase".into()))
        );
        assert!(matches!(
            RadixBase::new(&[], &[2], "empty_left", None),
            Err(Error::EmptyRadix(_))
        ));
        assert!(matches!(
            RadixBase::new(&[5, 0], &[2], "zero_radix", None),
            Err(Error::InvalidRadix { radix: 0, .. })
        ));
        assert!(matches!(
            RadixBase::new(&[5, 6], &[2], "bad_separators", Some(&[","])),
            Err(Error::SeparatorCount { expected: 2, found: 1 })
        ));

        let b = RadixBase::new(&[20, 5, 18], &[24, 60], "radix_test_base", Some(&[" ", "u ", "sep "]))
            .unwrap();
        assert_eq!(b.type_name(), "RadixTestBase");
        assert_eq!(b.name(), "radix_test_base");
        assert_eq!(RadixBase::get("RadixTestBase").unwrap(), b);
        assert!(RadixBase::registered().contains(&"RadixTestBase".to_owned()));
        assert_eq!(b.width_at(0), 2);
        assert_eq!(b.width_at(-1), 1);
        assert_eq!(b.to_string(), "RadixTestBase");
    }
}
