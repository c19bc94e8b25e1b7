//! Digit domains as ten-bit sets.

use std::fmt;

/// The set of digits a variable may still take, packed into the low ten bits
/// of a `u16`. `Copy`, so search states can share and replace domains
/// without allocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitDomain(u16);

const FULL: u16 = 0b11_1111_1111;

impl DigitDomain {
    pub const EMPTY: DigitDomain = DigitDomain(0);

    /// All of `0..=9`.
    pub fn all() -> Self {
        DigitDomain(FULL)
    }

    pub fn singleton(digit: u8) -> Self {
        DigitDomain(bit(digit))
    }

    /// Digits in `lo..=hi`, clamped to `0..=9`. Empty when `lo > hi`.
    pub fn interval(lo: u8, hi: u8) -> Self {
        let hi = hi.min(9);
        if lo > hi {
            return Self::EMPTY;
        }
        let mut bits = 0u16;
        for d in lo..=hi {
            bits |= bit(d);
        }
        DigitDomain(bits)
    }

    pub fn contains(self, digit: u8) -> bool {
        digit <= 9 && self.0 & bit(digit) != 0
    }

    pub fn with(self, digit: u8) -> Self {
        DigitDomain(self.0 | bit(digit))
    }

    pub fn without(self, digit: u8) -> Self {
        DigitDomain(self.0 & !bit(digit))
    }

    pub fn difference(self, other: Self) -> Self {
        DigitDomain(self.0 & !other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_singleton(self) -> bool {
        self.len() == 1
    }

    pub fn singleton_value(self) -> Option<u8> {
        if self.is_singleton() {
            Some(self.0.trailing_zeros() as u8)
        } else {
            None
        }
    }

    pub fn min(self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    pub fn max(self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some((15 - self.0.leading_zeros()) as u8)
        }
    }

    pub fn iter(self) -> impl DoubleEndedIterator<Item = u8> {
        (0u8..=9).filter(move |&d| self.contains(d))
    }

    pub fn retain<F: Fn(u8) -> bool>(self, keep: F) -> Self {
        let mut bits = 0u16;
        for d in self.iter() {
            if keep(d) {
                bits |= bit(d);
            }
        }
        DigitDomain(bits)
    }
}

fn bit(digit: u8) -> u16 {
    1u16 << (digit as u16)
}

impl FromIterator<u8> for DigitDomain {
    fn from_iter<I: IntoIterator<Item = u8>>(digits: I) -> Self {
        let mut domain = Self::EMPTY;
        for d in digits {
            if d <= 9 {
                domain = domain.with(d);
            }
        }
        domain
    }
}

impl fmt::Debug for DigitDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, d) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "}}")
    }
}
