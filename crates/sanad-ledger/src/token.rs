// crates/sanad-ledger/src/token.rs
//
// $SND token type and supply constants.
//
// The smallest unit of $SND is the "habba" (grain). 1 SND = 10^18 habba,
// matching 18-decimal fixed-point token semantics. All internal accounting
// uses u128 habba to avoid floating-point precision issues in economic
// calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of habba in one SND. 1 SND = 10^18 habba.
pub const HABBA_PER_SND: u128 = 1_000_000_000_000_000_000;

/// Maximum supply of $SND in habba. 100,000,000 SND * 10^18 habba/SND.
pub const MAX_SUPPLY_HABBA: u128 = 100_000_000 * HABBA_PER_SND;

/// Type alias for habba, the smallest unit of $SND.
pub type Habba = u128;

/// An $SND token amount.
///
/// Wraps an amount in habba (the smallest denomination).
/// All arithmetic is performed in integer habba.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Snd {
    /// Amount in habba (1 SND = 10^18 habba).
    pub habba: u128,
}

impl Snd {
    /// Create an Snd amount from a whole SND value.
    pub fn from_snd(amount: u64) -> Self {
        Self {
            habba: amount as u128 * HABBA_PER_SND,
        }
    }

    /// Create an Snd amount from a habba value.
    pub fn from_habba(habba: u128) -> Self {
        Self { habba }
    }

    /// Returns zero SND.
    pub fn zero() -> Self {
        Self { habba: 0 }
    }
}

impl Add for Snd {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            habba: self.habba + rhs.habba,
        }
    }
}

impl Sub for Snd {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            habba: self.habba.saturating_sub(rhs.habba),
        }
    }
}

impl fmt::Display for Snd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.habba / HABBA_PER_SND;
        let frac = self.habba % HABBA_PER_SND;
        if frac == 0 {
            write!(f, "{} SND", whole)
        } else {
            // Display up to 18 decimal places, trimming trailing zeros
            let frac_str = format!("{:018}", frac);
            let trimmed = frac_str.trim_end_matches('0');
            write!(f, "{}.{} SND", whole, trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_habba_per_snd() {
        assert_eq!(HABBA_PER_SND, 10u128.pow(18));
    }

    #[test]
    fn test_from_snd() {
        assert_eq!(Snd::from_snd(1).habba, HABBA_PER_SND);
        assert_eq!(Snd::from_snd(0).habba, 0);
    }

    #[test]
    fn test_add() {
        let c = Snd::from_snd(1) + Snd::from_habba(HABBA_PER_SND / 2);
        assert_eq!(c.habba, HABBA_PER_SND + HABBA_PER_SND / 2);
    }

    #[test]
    fn test_sub_saturating() {
        let c = Snd::from_snd(1) - Snd::from_snd(2);
        assert_eq!(c.habba, 0);
    }

    #[test]
    fn test_display_whole() {
        assert_eq!(format!("{}", Snd::from_snd(42)), "42 SND");
    }

    #[test]
    fn test_display_fractional() {
        let amount = Snd::from_habba(HABBA_PER_SND + HABBA_PER_SND / 2);
        assert_eq!(format!("{}", amount), "1.5 SND");
    }
}
