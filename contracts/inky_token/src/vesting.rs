//! Linear team vesting.
//!
//! ```text
//! elapsed   = min(now − start, duration)       (0 before start)
//! vested    = allocation × elapsed / duration  (truncating)
//! claimable = vested − claimed
//! ```
//!
//! `claimed` only grows and never exceeds `total_allocation`. Once
//! `elapsed == duration` the vested amount is exactly the allocation, so
//! truncation dust is always released by the final claim.

use crate::errors::TokenError;
use crate::units::Balance;

/// Milliseconds, as reported by `block_timestamp`.
pub type Timestamp = u64;

const DAY_MS: Timestamp = 24 * 60 * 60 * 1_000;

/// Team escrow unlocks linearly over two 365-day years.
pub const TEAM_VESTING_DURATION_MS: Timestamp = 2 * 365 * DAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct VestingSchedule {
    pub total_allocation: Balance,
    pub start: Timestamp,
    pub duration: Timestamp,
    pub claimed: Balance,
}

impl VestingSchedule {
    pub fn new(total_allocation: Balance, start: Timestamp, duration: Timestamp) -> Self {
        Self {
            total_allocation,
            start,
            duration,
            claimed: 0,
        }
    }

    /// Cumulative amount vested at `now`.
    pub fn vested_at(&self, now: Timestamp) -> Result<Balance, TokenError> {
        if self.duration == 0 {
            return Ok(self.total_allocation);
        }
        let elapsed = now.saturating_sub(self.start).min(self.duration);
        if elapsed == self.duration {
            return Ok(self.total_allocation);
        }
        let vested = self
            .total_allocation
            .checked_mul(u128::from(elapsed))
            .ok_or(TokenError::Overflow)?
            / u128::from(self.duration);
        Ok(vested)
    }

    /// Amount a claim at `now` would release.
    pub fn claimable_at(&self, now: Timestamp) -> Result<Balance, TokenError> {
        Ok(self.vested_at(now)?.saturating_sub(self.claimed))
    }

    /// Record a claim at `now` and return the released amount.
    ///
    /// # Errors
    /// - [`TokenError::NothingToClaim`] when nothing vested since the last claim.
    pub fn claim(&mut self, now: Timestamp) -> Result<Balance, TokenError> {
        let delta = self.claimable_at(now)?;
        if delta == 0 {
            return Err(TokenError::NothingToClaim);
        }
        self.claimed = self.claimed.checked_add(delta).ok_or(TokenError::Overflow)?;
        Ok(delta)
    }

    pub fn remaining(&self) -> Balance {
        self.total_allocation.saturating_sub(self.claimed)
    }

    pub fn end(&self) -> Timestamp {
        self.start.saturating_add(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::SCALE;

    const START: Timestamp = 1_700_000_000_000;
    const YEAR_MS: Timestamp = 365 * DAY_MS;

    fn escrow() -> VestingSchedule {
        VestingSchedule::new(100_000_000 * SCALE, START, TEAM_VESTING_DURATION_MS)
    }

    #[test]
    fn nothing_before_start() {
        let mut v = escrow();
        assert_eq!(v.claimable_at(START - 1).unwrap(), 0);
        assert_eq!(v.claim(START - 1), Err(TokenError::NothingToClaim));
        assert_eq!(v.claim(START), Err(TokenError::NothingToClaim));
        assert_eq!(v.claimed, 0);
    }

    #[test]
    fn half_after_one_year() {
        let mut v = escrow();
        assert_eq!(v.claim(START + YEAR_MS).unwrap(), 50_000_000 * SCALE);
    }

    #[test]
    fn second_claim_in_same_instant_is_rejected() {
        let mut v = escrow();
        v.claim(START + 1_000).unwrap();
        assert_eq!(v.claim(START + 1_000), Err(TokenError::NothingToClaim));
    }

    #[test]
    fn cumulative_claims_reach_allocation_exactly() {
        let mut v = escrow();
        // Irregular steps leave truncation dust along the way.
        let mut now = START;
        for step in [7_777_777, 86_400_001, 3, YEAR_MS / 3, 999_999_999] {
            now += step;
            let _ = v.claim(now);
        }
        v.claim(v.end()).unwrap();
        assert_eq!(v.claimed, v.total_allocation);
        assert_eq!(v.remaining(), 0);
        assert_eq!(v.claim(v.end() + YEAR_MS), Err(TokenError::NothingToClaim));
    }

    #[test]
    fn claimed_is_monotonic() {
        let mut v = escrow();
        let mut last = 0;
        for day in 0..=800u64 {
            let _ = v.claim(START + day * DAY_MS);
            assert!(v.claimed >= last);
            assert!(v.claimed <= v.total_allocation);
            last = v.claimed;
        }
        assert_eq!(last, v.total_allocation);
    }

    #[test]
    fn zero_duration_vests_immediately() {
        let mut v = VestingSchedule::new(42, START, 0);
        assert_eq!(v.claim(START).unwrap(), 42);
    }
}
