//! Serde support: a [`BigDouble`] travels as its exact fraction string.
//!
//! Deserialization goes through [`FromStr`](std::str::FromStr), so decimal
//! and scientific strings are accepted too, and native integers and floats
//! are taken at face value.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::BigDouble;

impl Serialize for BigDouble {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.fraction_description())
    }
}

struct BigDoubleVisitor;

impl<'de> Visitor<'de> for BigDoubleVisitor {
    type Value = BigDouble;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a decimal string or a `numerator/denominator` string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigDouble, E> {
        Ok(BigDouble::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigDouble, E> {
        Ok(BigDouble::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<BigDouble, E> {
        BigDouble::from_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BigDouble, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for BigDouble {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BigDoubleVisitor)
    }
}
