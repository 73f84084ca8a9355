//! Serialization of BasedReal.
//! A number is written as a struct holding the name of its base, its digits, its sign,
//! and its remainder as a decimal string.

use crate::num::BasedReal;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

impl Serialize for BasedReal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BasedReal", 5)?;
        s.serialize_field("base", self.base().type_name())?;
        s.serialize_field("left", self.left())?;
        s.serialize_field("right", self.right())?;
        s.serialize_field("sign", &self.sign().to_int())?;
        s.serialize_field("remainder", &self.remainder().to_string())?;
        s.end()
    }
}
