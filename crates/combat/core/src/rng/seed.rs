//! Master seed parsing.
//!
//! Seeds are written as short alphanumeric strings (`"TESTSEED"`). The string is read
//! as a base-35 number over `0-9A-Z` with `O` removed from the alphabet; a letter `O`
//! is read as `0`. Arithmetic wraps at 64 bits.

use core::fmt;
use core::str::FromStr;

use super::RngError;

const ALPHABET: &[u8; 35] = b"0123456789ABCDEFGHIJKLMNPQRSTUVWXYZ";

/// Master seed for a combat's RNG streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seed(pub u64);

impl Seed {
    /// Parses an alphanumeric seed string (case-insensitive).
    pub fn parse(text: &str) -> Result<Self, RngError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(RngError::InvalidSeed(trimmed.to_owned()));
        }
        let mut value: u64 = 0;
        for ch in trimmed.chars() {
            let upper = match ch.to_ascii_uppercase() {
                'O' => '0',
                other => other,
            };
            let digit = ALPHABET
                .iter()
                .position(|&c| c as char == upper)
                .ok_or_else(|| RngError::InvalidSeed(trimmed.to_owned()))?;
            value = value.wrapping_mul(35).wrapping_add(digit as u64);
        }
        Ok(Self(value))
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for Seed {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Seed {
    /// Renders the seed back in its alphanumeric form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0");
        }
        let mut digits = Vec::new();
        let mut rest = self.0;
        while rest > 0 {
            digits.push(ALPHABET[(rest % 35) as usize] as char);
            rest /= 35;
        }
        let text: String = digits.into_iter().rev().collect();
        f.write_str(&text)
    }
}

// Seeds accept either the numeric value or the alphanumeric string form.
#[cfg(feature = "serde")]
impl serde::Serialize for Seed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SeedVisitor;

        impl serde::de::Visitor<'_> for SeedVisitor {
            type Value = Seed;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an unsigned integer or an alphanumeric seed string")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Seed, E> {
                Ok(Seed(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Seed, E> {
                Ok(Seed(v as u64))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Seed, E> {
                Seed::parse(v).map_err(E::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_any(SeedVisitor)
        } else {
            deserializer.deserialize_u64(SeedVisitor)
        }
    }
}
