use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic round generation.
///
/// A 128-bit seed, written as a 32-character hex string. Two sessions started
/// with the same seed and settings show the same shapes in the same order
/// (identity tokens excepted), which makes rounds reproducible for debugging
/// and for sharing a challenge.
///
/// # Example
///
/// ```
/// use memore_engine::SessionSeed;
/// use rand::Rng as _;
///
/// let seed: SessionSeed = rand::rng().random();
/// let parsed: SessionSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSeed([u8; 16]);

impl SessionSeed {
    /// Creates the random number generator the session draws shapes from.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl From<[u8; 16]> for SessionSeed {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for SessionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: {reason}")]
pub struct ParseSeedError {
    input: String,
    reason: String,
}

impl FromStr for SessionSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: String| ParseSeedError {
            input: s.to_owned(),
            reason,
        };
        if s.len() != 32 {
            return Err(error(format!(
                "expected 32 hex characters, got {}",
                s.len()
            )));
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| error(e.to_string()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SessionSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<SessionSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SessionSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SessionSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;

    use super::*;

    #[test]
    fn test_known_value_sequential_bytes() {
        let seed = SessionSeed::from([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

        let deserialized: SessionSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_all_zeros_keeps_leading_zeros() {
        let seed = SessionSeed::from([0; 16]);
        assert_eq!(seed.to_string(), "00000000000000000000000000000000");
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let seed: SessionSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for input in [
            "",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
        ] {
            let err = input.parse::<SessionSeed>().unwrap_err();
            assert!(err.to_string().contains("invalid seed"), "{err}");
        }
    }

    #[test]
    fn test_deserialize_reports_error() {
        let result: Result<SessionSeed, _> = serde_json::from_str("\"xyz\"");
        assert!(result.unwrap_err().to_string().contains("invalid seed"));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let seed: SessionSeed = rand::rng().random();
        let mut a = seed.rng();
        let mut b = seed.rng();
        for _ in 0..20 {
            assert_eq!(a.random::<u32>(), b.random::<u32>());
        }
    }
}
