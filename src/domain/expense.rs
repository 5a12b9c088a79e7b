use std::fmt;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::money::Amount;

/// Creation-order surrogate key of an expense.
///
/// Ids are handed out by the record store and increase strictly, so sorting
/// by id descending yields newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Presentation tag assigned once when an expense is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseColor {
    Salmon,
    SkyBlue,
    Butter,
    Mint,
    Lavender,
    Apricot,
    Cornflower,
    Lemon,
}

impl ExpenseColor {
    pub const PALETTE: [ExpenseColor; 8] = [
        ExpenseColor::Salmon,
        ExpenseColor::SkyBlue,
        ExpenseColor::Butter,
        ExpenseColor::Mint,
        ExpenseColor::Lavender,
        ExpenseColor::Apricot,
        ExpenseColor::Cornflower,
        ExpenseColor::Lemon,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::PALETTE[rng.gen_range(0..Self::PALETTE.len())]
    }

    pub fn hex(self) -> &'static str {
        match self {
            ExpenseColor::Salmon => "#F1A9A0",
            ExpenseColor::SkyBlue => "#A9CCE3",
            ExpenseColor::Butter => "#F9E79F",
            ExpenseColor::Mint => "#82E0AA",
            ExpenseColor::Lavender => "#BB8FCE",
            ExpenseColor::Apricot => "#F8C471",
            ExpenseColor::Cornflower => "#85C1E9",
            ExpenseColor::Lemon => "#F7DC6F",
        }
    }

    /// `(r, g, b)` components of [`hex`](Self::hex).
    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = &self.hex()[1..];
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).unwrap_or_default()
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }
}

/// A single spending entry. Records are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    id: ExpenseId,
    name: String,
    price: Amount,
    date: NaiveDate,
    color: ExpenseColor,
}

impl ExpenseRecord {
    /// Builds a record from already validated parts.
    pub(crate) fn new(
        id: ExpenseId,
        name: String,
        price: Amount,
        date: NaiveDate,
        color: ExpenseColor,
    ) -> Self {
        Self {
            id,
            name,
            price,
            date,
            color,
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Amount {
        self.price
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn color(&self) -> ExpenseColor {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_color_comes_from_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let color = ExpenseColor::random(&mut rng);
            assert!(ExpenseColor::PALETTE.contains(&color));
        }
    }

    #[test]
    fn rgb_matches_hex() {
        assert_eq!(ExpenseColor::Salmon.rgb(), (0xF1, 0xA9, 0xA0));
        assert_eq!(ExpenseColor::Lemon.rgb(), (0xF7, 0xDC, 0x6F));
    }
}
