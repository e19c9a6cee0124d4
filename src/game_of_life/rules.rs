//! Survival and birth rules keyed by neighbor count

use crate::error::{LifeError, Result};
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// Highest neighbor count in a Moore neighborhood.
pub const MAX_NEIGHBORS: u8 = 8;

/// Number of live cells around a cell, always within 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NeighborCount(u8);

impl NeighborCount {
    /// Wrap a raw count, rejecting anything above 8.
    pub fn new(count: u8) -> Result<Self> {
        if count > MAX_NEIGHBORS {
            return Err(LifeError::OutOfRange(count));
        }
        Ok(Self(count))
    }

    /// Caller guarantees `count <= 8`.
    pub(crate) const fn from_sum(count: u8) -> Self {
        debug_assert!(count <= MAX_NEIGHBORS);
        Self(count)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for NeighborCount {
    type Error = LifeError;

    fn try_from(count: u8) -> Result<Self> {
        Self::new(count)
    }
}

impl From<NeighborCount> for u8 {
    fn from(count: NeighborCount) -> u8 {
        count.0
    }
}

impl fmt::Display for NeighborCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which neighbor counts keep a live cell alive and which bring a dead one to life.
///
/// Each set is stored as a bitmask over the counts 0..=8. Replacing the rules
/// always goes through [`RuleSet::configure`] or [`RuleSet::configure_counts`],
/// both of which validate the whole input before touching `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleSet {
    survive: u16,
    born: u16,
}

impl RuleSet {
    /// Build rules from digit strings such as `"23"` and `"3"`.
    pub fn new(survive: &str, born: &str) -> Result<Self> {
        Ok(Self {
            survive: parse_digits(survive)?,
            born: parse_digits(born)?,
        })
    }

    /// Build rules from neighbor counts. Duplicates are ignored.
    pub fn from_counts<S, B>(survive: S, born: B) -> Result<Self>
    where
        S: IntoIterator<Item = u8>,
        B: IntoIterator<Item = u8>,
    {
        Ok(Self {
            survive: mask_from_counts(survive)?,
            born: mask_from_counts(born)?,
        })
    }

    /// Conway's B3/S23.
    pub const fn conway() -> Self {
        Self {
            survive: (1 << 2) | (1 << 3),
            born: 1 << 3,
        }
    }

    /// Replace both sets from digit strings. On error the current rules are kept.
    pub fn configure(&mut self, survive: &str, born: &str) -> Result<()> {
        *self = Self::new(survive, born)?;
        Ok(())
    }

    /// Replace both sets from neighbor counts. On error the current rules are kept.
    pub fn configure_counts<S, B>(&mut self, survive: S, born: B) -> Result<()>
    where
        S: IntoIterator<Item = u8>,
        B: IntoIterator<Item = u8>,
    {
        *self = Self::from_counts(survive, born)?;
        Ok(())
    }

    #[inline]
    pub fn will_survive(&self, neighbors: NeighborCount) -> bool {
        self.survive & (1 << neighbors.get()) != 0
    }

    #[inline]
    pub fn will_be_born(&self, neighbors: NeighborCount) -> bool {
        self.born & (1 << neighbors.get()) != 0
    }

    /// State of a cell in the next generation.
    #[inline]
    pub fn next_state(&self, alive: bool, neighbors: NeighborCount) -> bool {
        if alive {
            self.will_survive(neighbors)
        } else {
            self.will_be_born(neighbors)
        }
    }

    /// Survival counts in ascending order, e.g. `"23"`.
    pub fn survive_digits(&self) -> String {
        mask_digits(self.survive)
    }

    /// Birth counts in ascending order, e.g. `"3"`.
    pub fn born_digits(&self) -> String {
        mask_digits(self.born)
    }

    pub fn survive_counts(&self) -> Vec<u8> {
        mask_counts(self.survive).collect()
    }

    pub fn born_counts(&self) -> Vec<u8> {
        mask_counts(self.born).collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::conway()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}/S{}", self.born_digits(), self.survive_digits())
    }
}

/// Parses `B3/S23` notation. Either half may come first and the letters are
/// case-insensitive; a missing half means the empty set.
impl FromStr for RuleSet {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut survive = None;
        let mut born = None;

        for part in s.trim().split('/') {
            let mut chars = part.chars();
            let slot = match chars.next() {
                Some('B' | 'b') => &mut born,
                Some('S' | 's') => &mut survive,
                _ => {
                    return Err(LifeError::InvalidRule {
                        rule: s.to_string(),
                        reason: format!("expected B<digits>/S<digits>, found {part:?}"),
                    })
                }
            };
            if slot.is_some() {
                return Err(LifeError::InvalidRule {
                    rule: s.to_string(),
                    reason: format!("{part:?} given twice"),
                });
            }
            *slot = Some(parse_digits(chars.as_str())?);
        }

        Ok(Self {
            survive: survive.unwrap_or(0),
            born: born.unwrap_or(0),
        })
    }
}

fn parse_digits(digits: &str) -> Result<u16> {
    let mut mask = 0u16;
    for ch in digits.chars() {
        let count = ch
            .to_digit(10)
            .filter(|&d| d <= u32::from(MAX_NEIGHBORS))
            .ok_or_else(|| LifeError::InvalidRule {
                rule: digits.to_string(),
                reason: format!("{ch:?} is not a neighbor count between 0 and 8"),
            })?;
        mask |= 1 << count;
    }
    Ok(mask)
}

fn mask_from_counts<I: IntoIterator<Item = u8>>(counts: I) -> Result<u16> {
    let mut mask = 0u16;
    for count in counts {
        if count > MAX_NEIGHBORS {
            return Err(LifeError::InvalidRule {
                rule: count.to_string(),
                reason: format!("{count} is not a neighbor count between 0 and 8"),
            });
        }
        mask |= 1 << count;
    }
    Ok(mask)
}

fn mask_counts(mask: u16) -> impl Iterator<Item = u8> {
    (0..=MAX_NEIGHBORS).filter(move |&n| mask & (1 << n) != 0)
}

fn mask_digits(mask: u16) -> String {
    mask_counts(mask).join("")
}
