//! Balance-tier ticket allowances.
//!
//! The threshold table is a step function over whole-token balances:
//!
//! ```text
//!   ceiling (INKY)   max tickets / round
//!        100 000     1
//!        300 000     2
//!        600 000     3
//!      1 000 000     4
//!      2 000 000     5
//!      5 000 000     6
//!      u128::MAX     7      sentinel, matches every balance
//! ```
//!
//! A balance sitting exactly on a ceiling belongs to that tier, not the next.

use ink::prelude::vec::Vec;

use crate::errors::SaleError;

/// One row of the threshold table. `ceiling` is in whole tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Tier {
    pub ceiling: u128,
    pub max_tickets: u32,
}

/// Ceiling of the final tier. Guarantees every balance finds a tier.
pub const SENTINEL_CEILING: u128 = u128::MAX;

pub fn default_table() -> Vec<Tier> {
    [
        (100_000, 1),
        (300_000, 2),
        (600_000, 3),
        (1_000_000, 4),
        (2_000_000, 5),
        (5_000_000, 6),
        (SENTINEL_CEILING, 7),
    ]
    .into_iter()
    .map(|(ceiling, max_tickets)| Tier { ceiling, max_tickets })
    .collect()
}

/// Tickets per round for `balance_whole`, before subtracting purchases.
pub fn gross_allowance(table: &[Tier], balance_whole: u128, min_balance_whole: u128) -> u32 {
    if balance_whole < min_balance_whole {
        return 0;
    }
    table
        .iter()
        .find(|tier| tier.ceiling >= balance_whole)
        .map(|tier| tier.max_tickets)
        .unwrap_or(0)
}

/// Tickets still purchasable this round.
pub fn remaining_allowance(
    table: &[Tier],
    balance_whole: u128,
    min_balance_whole: u128,
    already_bought: u32,
) -> u32 {
    gross_allowance(table, balance_whole, min_balance_whole).saturating_sub(already_bought)
}

/// Check that replacing row `index` with `(ceiling, max_tickets)` keeps the
/// table strictly ascending and ending in the sentinel.
pub fn validate_update(
    table: &[Tier],
    index: u32,
    ceiling: u128,
    max_tickets: u32,
) -> Result<Tier, SaleError> {
    let index = index as usize;
    if index >= table.len() {
        return Err(SaleError::IndexOutOfRange);
    }
    let last = table.len() - 1;
    if (index == last) != (ceiling == SENTINEL_CEILING) {
        return Err(SaleError::InvalidThreshold);
    }
    if index > 0 && table[index - 1].ceiling >= ceiling {
        return Err(SaleError::InvalidThreshold);
    }
    if index < last && table[index + 1].ceiling <= ceiling {
        return Err(SaleError::InvalidThreshold);
    }
    Ok(Tier { ceiling, max_tickets })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: u128 = 100_000;

    #[test]
    fn default_table_is_ascending_with_sentinel() {
        let table = default_table();
        assert!(table.windows(2).all(|w| w[0].ceiling < w[1].ceiling));
        assert_eq!(table.last().map(|t| t.ceiling), Some(SENTINEL_CEILING));
    }

    #[test]
    fn ceiling_balance_gets_its_own_tier() {
        let table = default_table();
        assert_eq!(gross_allowance(&table, 300_000, MIN), 2);
        assert_eq!(gross_allowance(&table, 300_001, MIN), 3);
        assert_eq!(gross_allowance(&table, 100_000, MIN), 1);
        assert_eq!(gross_allowance(&table, 5_000_000, MIN), 6);
    }

    #[test]
    fn sentinel_catches_huge_balances() {
        assert_eq!(gross_allowance(&default_table(), u128::MAX, MIN), 7);
    }

    #[test]
    fn below_minimum_is_always_zero() {
        let generous = vec![Tier { ceiling: SENTINEL_CEILING, max_tickets: 50 }];
        assert_eq!(gross_allowance(&generous, MIN - 1, MIN), 0);
        assert_eq!(gross_allowance(&generous, 0, MIN), 0);
        assert_eq!(gross_allowance(&generous, MIN, MIN), 50);
    }

    #[test]
    fn purchases_are_subtracted_and_floored() {
        let table = default_table();
        assert_eq!(remaining_allowance(&table, 300_000, MIN, 0), 2);
        assert_eq!(remaining_allowance(&table, 300_000, MIN, 1), 1);
        assert_eq!(remaining_allowance(&table, 300_000, MIN, 2), 0);
        // Balance dropped a tier after buying: never negative.
        assert_eq!(remaining_allowance(&table, 100_000, MIN, 2), 0);
    }

    #[test]
    fn updates_must_keep_order_and_sentinel() {
        let table = default_table();
        assert_eq!(validate_update(&table, 7, 1, 1), Err(SaleError::IndexOutOfRange));
        assert_eq!(validate_update(&table, 1, 100_000, 2), Err(SaleError::InvalidThreshold));
        assert_eq!(validate_update(&table, 1, 600_000, 2), Err(SaleError::InvalidThreshold));
        assert_eq!(validate_update(&table, 6, 9_000_000, 7), Err(SaleError::InvalidThreshold));
        assert_eq!(
            validate_update(&table, 5, SENTINEL_CEILING, 6),
            Err(SaleError::InvalidThreshold)
        );
        assert_eq!(
            validate_update(&table, 1, 250_000, 3),
            Ok(Tier { ceiling: 250_000, max_tickets: 3 })
        );
        assert_eq!(
            validate_update(&table, 6, SENTINEL_CEILING, 10),
            Ok(Tier { ceiling: SENTINEL_CEILING, max_tickets: 10 })
        );
    }
}
