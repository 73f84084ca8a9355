//! Deserialization of BasedReal.

use core::fmt::Formatter;
use core::str::FromStr;

use crate::defs::Sign;
use crate::num::BasedReal;
use crate::radix::RadixBase;
use rust_decimal::Decimal;
use serde::de::{Error, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

const FIELDS: &[&str] = &["base", "left", "right", "sign", "remainder"];

pub struct BasedRealVisitor {}

impl<'de> Deserialize<'de> for BasedReal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_struct("BasedReal", FIELDS, BasedRealVisitor {})
    }
}

fn build<E: Error>(
    base: String,
    left: Vec<i64>,
    right: Vec<i64>,
    sign: i64,
    remainder: String,
) -> Result<BasedReal, E> {
    let base = RadixBase::get(&base).map_err(|e| E::custom(format!("{e}")))?;
    let sign = Sign::try_from(sign).map_err(|e| E::custom(format!("{e}")))?;
    let remainder = Decimal::from_str(&remainder).map_err(|e| E::custom(format!("{e}")))?;
    BasedReal::new(&base, &left, &right, sign, remainder).map_err(|e| E::custom(format!("{e}")))
}

impl<'de> Visitor<'de> for BasedRealVisitor {
    type Value = BasedReal;

    fn expecting(&self, formatter: &mut Formatter) -> core::fmt::Result {
        write!(formatter, "struct BasedReal")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let base = seq.next_element()?.ok_or_else(|| A::Error::invalid_length(0, &self))?;
        let left = seq.next_element()?.ok_or_else(|| A::Error::invalid_length(1, &self))?;
        let right = seq.next_element()?.ok_or_else(|| A::Error::invalid_length(2, &self))?;
        let sign = seq.next_element()?.ok_or_else(|| A::Error::invalid_length(3, &self))?;
        let remainder = seq.next_element()?.ok_or_else(|| A::Error::invalid_length(4, &self))?;
        build(base, left, right, sign, remainder)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut base: Option<String> = None;
        let mut left: Option<Vec<i64>> = None;
        let mut right: Option<Vec<i64>> = None;
        let mut sign: Option<i64> = None;
        let mut remainder: Option<String> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "base" => base = Some(map.next_value()?),
                "left" => left = Some(map.next_value()?),
                "right" => right = Some(map.next_value()?),
                "sign" => sign = Some(map.next_value()?),
                "remainder" => remainder = Some(map.next_value()?),
                other => return Err(Error::unknown_field(other, FIELDS)),
            }
        }

        build(
            base.ok_or_else(|| A::Error::missing_field("base"))?,
            left.ok_or_else(|| A::Error::missing_field("left"))?,
            right.unwrap_or_default(),
            sign.unwrap_or(1),
            remainder.unwrap_or_else(|| "0".to_owned()),
        )
    }
}
