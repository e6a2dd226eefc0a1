use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of live neighbors a cell can have in a Moore neighborhood.
pub const MAX_NEIGHBORS: u8 = 8;

/// Errors raised while building or parsing [`Rules`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A neighbor count exceeded [`MAX_NEIGHBORS`].
    #[error("neighbor count {0} is outside 0..=8")]
    CountOutOfRange(u8),
    /// A rule string contained a character that is not a digit.
    #[error("unexpected character '{0}' in rule string")]
    InvalidDigit(char),
    /// A rule string did not follow the `B<digits>/S<digits>` layout.
    #[error("rule string '{0}' is not in B<digits>/S<digits> form")]
    MalformedNotation(String),
}

/// Set of neighbor counts in `0..=8`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct NeighborCounts(u16);

impl NeighborCounts {
    /// Set containing no counts.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from explicit counts.
    pub fn from_counts(counts: &[u8]) -> Result<Self, RuleError> {
        counts
            .iter()
            .try_fold(Self::EMPTY, |set, &count| set.with(count))
    }

    /// Returns a copy of the set that also contains `count`.
    pub fn with(self, count: u8) -> Result<Self, RuleError> {
        if count > MAX_NEIGHBORS {
            return Err(RuleError::CountOutOfRange(count));
        }
        Ok(Self(self.0 | 1 << count))
    }

    /// Reports whether `count` is a member of the set.
    #[must_use]
    pub const fn contains(self, count: u8) -> bool {
        count <= MAX_NEIGHBORS && self.0 & (1 << count) != 0
    }

    /// Iterates over the members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..=MAX_NEIGHBORS).filter(move |&count| self.contains(count))
    }
}

impl fmt::Debug for NeighborCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl TryFrom<Vec<u8>> for NeighborCounts {
    type Error = RuleError;

    fn try_from(counts: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_counts(&counts)
    }
}

impl From<NeighborCounts> for Vec<u8> {
    fn from(counts: NeighborCounts) -> Self {
        counts.iter().collect()
    }
}

/// Two-state transition rule expressed as birth and survival counts.
///
/// The default is Conway's rule, `B3/S23`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Counts under which a dead cell becomes alive.
    pub birth: NeighborCounts,
    /// Counts under which a live cell stays alive.
    pub survival: NeighborCounts,
}

impl Rules {
    /// Conway's Game of Life.
    pub const CONWAY: Self = Self {
        birth: NeighborCounts(1 << 3),
        survival: NeighborCounts(1 << 2 | 1 << 3),
    };

    /// Creates a rule from explicit count sets.
    #[must_use]
    pub const fn new(birth: NeighborCounts, survival: NeighborCounts) -> Self {
        Self { birth, survival }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::CONWAY
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for count in self.birth.iter() {
            write!(f, "{count}")?;
        }
        f.write_str("/S")?;
        for count in self.survival.iter() {
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

impl FromStr for Rules {
    type Err = RuleError;

    /// Parses `B3/S23` style notation. Letters are case-insensitive and the
    /// two halves may appear in either order.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || RuleError::MalformedNotation(value.to_owned());
        let (first, second) = value.trim().split_once('/').ok_or_else(malformed)?;

        let mut birth = None;
        let mut survival = None;
        for part in [first, second] {
            let mut chars = part.chars();
            let slot = match chars.next().map(|tag| tag.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(malformed()),
            };
            if slot.is_some() {
                return Err(malformed());
            }
            *slot = Some(parse_counts(chars.as_str())?);
        }

        match (birth, survival) {
            (Some(birth), Some(survival)) => Ok(Self { birth, survival }),
            _ => Err(malformed()),
        }
    }
}

fn parse_counts(digits: &str) -> Result<NeighborCounts, RuleError> {
    digits.chars().try_fold(NeighborCounts::EMPTY, |set, ch| {
        let digit = ch.to_digit(10).ok_or(RuleError::InvalidDigit(ch))?;
        let count = u8::try_from(digit).map_err(|_| RuleError::InvalidDigit(ch))?;
        set.with(count)
    })
}
