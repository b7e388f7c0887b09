use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic draws.
///
/// This is a 128-bit (16-byte) seed used to initialize the session's random
/// number generator. One seed fixes both the placement shuffles and the date
/// draw sequence, enabling:
///
/// - Reproducible games for debugging
/// - Replaying a session from a logged seed
/// - Deterministic testing
///
/// The textual form is 32 hexadecimal characters, big-endian, accepted by
/// both [`FromStr`] and serde.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use tenbingo_engine::DrawSeed;
///
/// // Generate a random seed and print its replayable form.
/// let seed: DrawSeed = rand::rng().random();
/// let text = seed.to_string();
///
/// let replay: DrawSeed = text.parse().unwrap();
/// assert_eq!(replay.to_string(), text);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DrawSeed([u8; 16]);

/// Rejection reasons for the 32-character hex form of [`DrawSeed`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    Length { len: usize },
    #[display("invalid hex: {text}")]
    Digits { text: String },
}

impl DrawSeed {
    /// Builds the session RNG this seed stands for.
    pub(crate) fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for DrawSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

impl FromStr for DrawSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::Length { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::Digits {
            text: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for DrawSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DrawSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `DrawSeed` values using the standard random
/// distribution, i.e. `rng.random()`.
impl Distribution<DrawSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DrawSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        DrawSeed(seed)
    }
}
