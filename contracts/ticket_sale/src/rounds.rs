//! Round and participant bookkeeping types.

use ink::primitives::AccountId;

pub type RoundId = u32;

/// Owner-tunable sale parameters, all in whole tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct SaleConfig {
    pub ticket_price: u128,
    pub min_balance: u128,
    pub max_bounty: u128,
}

pub const DEFAULT_TICKET_PRICE: u128 = 10_000;
pub const DEFAULT_MIN_BALANCE: u128 = 100_000;
pub const DEFAULT_MAX_BOUNTY: u128 = 1_000_000;

/// Largest page returned by `participants`.
pub const MAX_PAGE_SIZE: u32 = 100;

impl Default for SaleConfig {
    fn default() -> Self {
        Self {
            ticket_price: DEFAULT_TICKET_PRICE,
            min_balance: DEFAULT_MIN_BALANCE,
            max_bounty: DEFAULT_MAX_BOUNTY,
        }
    }
}

/// Aggregates kept per round. `total_cost` is in base units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct RoundTotals {
    pub participants: u32,
    pub tickets: u64,
    pub total_cost: u128,
}

/// Lifetime aggregates kept per buyer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct BuyerTotals {
    pub tickets: u64,
    pub spent: u128,
    pub rounds_entered: u32,
    pub last_round: RoundId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub struct RoundStats {
    pub round_id: RoundId,
    pub is_current: bool,
    pub participants: u32,
    pub tickets: u64,
    pub total_cost: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub struct UserStats {
    pub account: AccountId,
    pub balance: u128,
    pub balance_whole: u128,
    pub eligible: bool,
    pub tickets_this_round: u32,
    pub remaining_tickets: u32,
    pub lifetime: BuyerTotals,
}
