//! Bounty tax routing.
//!
//! ```text
//! exempt      : sender or recipient is a system wallet
//!               recipient is BURN_ADDRESS
//!               sender or recipient is whitelisted
//! non-exempt  : bounty = amount × bps / 10 000   (truncating)
//!               send   = amount − bounty
//! ```

use ink::primitives::AccountId;

use crate::errors::TokenError;
use crate::units::Balance;

/// Denominator for all basis-point calculations.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Default bounty rate: 1%.
pub const DEFAULT_BOUNTY_BPS: u16 = 100;

/// Upper bound for the owner-settable bounty rate: 10%.
pub const MAX_BOUNTY_BPS: u16 = 1_000;

/// Wallets fixed at genesis. All of them are tax exempt on both sides of a
/// transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct SystemWallets {
    pub treasury: AccountId,
    pub liquidity: AccountId,
    pub team: AccountId,
    pub bounty: AccountId,
    pub airdrop: AccountId,
}

impl SystemWallets {
    pub fn contains(&self, account: &AccountId) -> bool {
        [
            &self.treasury,
            &self.liquidity,
            &self.team,
            &self.bounty,
            &self.airdrop,
        ]
        .contains(&account)
    }
}

/// Outcome of taxing one transfer. `bounty + send` always equals the
/// original amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxSplit {
    pub bounty: Balance,
    pub send: Balance,
}

impl TaxSplit {
    /// Untaxed split: the whole amount reaches the recipient.
    pub const fn exempt(amount: Balance) -> Self {
        Self { bounty: 0, send: amount }
    }

    /// Split `amount` at `bps` basis points.
    pub fn at_rate(amount: Balance, bps: u16) -> Result<Self, TokenError> {
        let bounty = amount
            .checked_mul(u128::from(bps))
            .ok_or(TokenError::Overflow)?
            / BPS_DENOMINATOR;
        // bounty ≤ amount because bps ≤ BPS_DENOMINATOR is enforced by the setter
        let send = amount.checked_sub(bounty).ok_or(TokenError::Overflow)?;
        Ok(Self { bounty, send })
    }
}
