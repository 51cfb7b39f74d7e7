//! Fixed-point token units.
//!
//! Every on-chain amount is a `u128` in base units with 18 implied
//! decimals. Owner-facing messages that take "whole" amounts use
//! [`WholeTokens`] so the scaling step is explicit and checked.

/// Base-unit balance (18 implied decimals).
pub type Balance = u128;

/// Decimal places carried by every [`Balance`].
pub const DECIMALS: u8 = 18;

/// `10^DECIMALS`: base units per whole token.
pub const SCALE: Balance = 1_000_000_000_000_000_000;

/// An amount of whole tokens, not yet scaled to base units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, scale::Encode, scale::Decode,
)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct WholeTokens(pub u128);

impl WholeTokens {
    /// Whole tokens held by `balance`, remainder truncated.
    pub const fn from_base_units(balance: Balance) -> Self {
        Self(balance / SCALE)
    }

    /// Scale up to base units. `None` on overflow.
    pub fn to_base_units(self) -> Option<Balance> {
        self.0.checked_mul(SCALE)
    }

    /// `self * count` scaled to base units. `None` on overflow.
    pub fn times(self, count: u128) -> Option<Balance> {
        self.0.checked_mul(count)?.checked_mul(SCALE)
    }

    pub const fn get(self) -> u128 {
        self.0
    }
}
