#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod errors;
pub mod gateway;
pub mod rounds;
pub mod tiers;

pub use errors::SaleError;

/// # INKY Ticket Sale
///
/// **Role:** Tier-gated ticket sale with per-round accounting, ticket burns
/// and the bounty-pool payout.
///
/// ```text
///   buyer ──buy_tickets(n)──► [TicketSale] ──balance_of / allowance──► [InkyToken]
///                                   │
///                                   ├── round bookkeeping committed
///                                   └── transfer_from(buyer, BURN, n × price)
///
///   owner ──transfer_bounty_to_winner(w)──► prize = min(pool, max_bounty) → w
///                                           excess                        → BURN
/// ```
///
/// Rounds are keyed by id and never deleted; `start_new_round` only moves
/// the cursor, so every later purchase lands in fresh, zeroed counters.
#[ink::contract]
mod ticket_sale {
    use ink::prelude::vec::Vec;
    use ink::storage::traits::ManualKey;
    use ink::storage::{Lazy, Mapping};
    use inky_token::constants::burn_account;
    use inky_token::units::WholeTokens;

    use crate::errors::SaleError as Error;
    use crate::gateway;
    use crate::rounds::{
        BuyerTotals, RoundId, RoundStats, RoundTotals, SaleConfig, UserStats, MAX_PAGE_SIZE,
    };
    use crate::tiers::{self, Tier};

    // =========================================================================
    // STORAGE
    // =========================================================================

    /// Fixed cells for the values a token call may observe mid-message.
    pub const LOCK_KEY: u32 = 0x4c4f_434b;
    pub const BURNED_KEY: u32 = 0x4255_524e;

    #[ink(storage)]
    pub struct TicketSale {
        owner: AccountId,
        token: AccountId,
        /// Tax-exempt pool wallet, normally the token's bounty system wallet.
        /// Must approve this contract.
        bounty_wallet: AccountId,

        config: SaleConfig,
        thresholds: Vec<Tier>,

        // ── Round ledger ──────────────────────────────────────────────────
        current_round: RoundId,
        round_totals: Mapping<RoundId, RoundTotals>,
        /// (round, slot) → participant, slots in first-purchase order.
        round_participants: Mapping<(RoundId, u32), AccountId>,
        tickets: Mapping<(RoundId, AccountId), u32>,
        buyer_totals: Mapping<AccountId, BuyerTotals>,

        /// All-time base units sent to the burn address by this contract.
        /// `Lazy` cells write through on `set`, unlike the packed root.
        total_burned: Lazy<Balance, ManualKey<BURNED_KEY>>,

        /// Stored as `true` while a token call is in flight.
        locked: Lazy<bool, ManualKey<LOCK_KEY>>,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct TicketsPurchased {
        #[ink(topic)]
        buyer: AccountId,
        #[ink(topic)]
        round: RoundId,
        count: u32,
        cost: Balance,
    }

    #[ink(event)]
    pub struct ThresholdChanged {
        index: u32,
        ceiling: u128,
        max_tickets: u32,
    }

    #[ink(event)]
    pub struct NewRound {
        #[ink(topic)]
        round_id: RoundId,
    }

    #[ink(event)]
    pub struct MinBalanceChanged {
        previous: u128,
        updated: u128,
    }

    #[ink(event)]
    pub struct MaxBountyChanged {
        previous: u128,
        updated: u128,
    }

    #[ink(event)]
    pub struct TicketPriceChanged {
        previous: u128,
        updated: u128,
    }

    /// `prize` and `burn` are whole tokens. `round` is informational.
    #[ink(event)]
    pub struct BountyTransferred {
        #[ink(topic)]
        round: RoundId,
        #[ink(topic)]
        winner: AccountId,
        prize: u128,
        burn: u128,
    }

    #[ink(event)]
    pub struct BountyWalletChanged {
        #[ink(topic)]
        previous: AccountId,
        #[ink(topic)]
        updated: AccountId,
    }

    #[ink(event)]
    pub struct SaleOwnershipTransferred {
        #[ink(topic)]
        previous: AccountId,
        #[ink(topic)]
        new_owner: AccountId,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl TicketSale {
        /// `bounty_wallet` must be tax-exempt on `token`, or payouts are
        /// refused with [`Error::BountyWalletNotExempt`].
        #[ink(constructor)]
        pub fn new(token: AccountId, bounty_wallet: AccountId) -> Self {
            Self {
                owner: Self::env().caller(),
                token,
                bounty_wallet,
                config: SaleConfig::default(),
                thresholds: tiers::default_table(),
                current_round: 1,
                round_totals: Mapping::default(),
                round_participants: Mapping::default(),
                tickets: Mapping::default(),
                buyer_totals: Mapping::default(),
                total_burned: Lazy::new(),
                locked: Lazy::new(),
            }
        }

        // =====================================================================
        // TICKET PURCHASE
        // =====================================================================

        /// Buy `count` tickets in the current round, burning
        /// `count × ticket_price` of the caller's tokens.
        ///
        /// The caller must have approved this contract for the cost. Round
        /// bookkeeping is written before the burn call.
        ///
        /// # Errors
        /// - [`Error::ZeroTickets`]: `count == 0`.
        /// - [`Error::BelowMinimumBalance`]: balance under `min_balance`.
        /// - [`Error::ExceedsTicketAllowance`]: tier allowance exhausted.
        /// - [`Error::InsufficientAllowance`]: approval below the cost.
        /// - [`Error::InsufficientBalance`]: balance below the cost.
        #[ink(message)]
        pub fn buy_tickets(&mut self, count: u32) -> Result<(), Error> {
            self.ensure_unlocked()?;
            if count == 0 {
                return Err(Error::ZeroTickets);
            }

            let buyer = self.env().caller();
            let round = self.current_round;
            let token = self.token;

            // ── Checks ────────────────────────────────────────────────────
            let balance = gateway::balance_of(token, buyer)?;
            let balance_whole = WholeTokens::from_base_units(balance).get();
            if balance_whole < self.config.min_balance {
                return Err(Error::BelowMinimumBalance);
            }

            let already = self.tickets_in_round(round, buyer);
            let allowed = tiers::remaining_allowance(
                &self.thresholds,
                balance_whole,
                self.config.min_balance,
                already,
            );
            if count > allowed {
                return Err(Error::ExceedsTicketAllowance);
            }

            let cost = WholeTokens(self.config.ticket_price)
                .times(u128::from(count))
                .ok_or(Error::Overflow)?;
            if gateway::allowance(token, buyer, self.env().account_id())? < cost {
                return Err(Error::InsufficientAllowance);
            }
            if balance < cost {
                return Err(Error::InsufficientBalance);
            }

            let first_purchase = already == 0;
            let bought = already.checked_add(count).ok_or(Error::Overflow)?;

            let mut totals = self.round_totals.get(round).unwrap_or_default();
            let slot = totals.participants;
            if first_purchase {
                totals.participants = slot.checked_add(1).ok_or(Error::Overflow)?;
            }
            totals.tickets = totals
                .tickets
                .checked_add(u64::from(count))
                .ok_or(Error::Overflow)?;
            totals.total_cost = totals.total_cost.checked_add(cost).ok_or(Error::Overflow)?;

            let mut lifetime = self.buyer_totals.get(buyer).unwrap_or_default();
            lifetime.tickets = lifetime
                .tickets
                .checked_add(u64::from(count))
                .ok_or(Error::Overflow)?;
            lifetime.spent = lifetime.spent.checked_add(cost).ok_or(Error::Overflow)?;
            if first_purchase {
                lifetime.rounds_entered = lifetime.rounds_entered.saturating_add(1);
            }
            lifetime.last_round = round;

            let total_burned = self.total_burned().checked_add(cost).ok_or(Error::Overflow)?;

            // ── Effects ───────────────────────────────────────────────────
            if first_purchase {
                self.round_participants.insert((round, slot), &buyer);
            }
            self.tickets.insert((round, buyer), &bought);
            self.round_totals.insert(round, &totals);
            self.buyer_totals.insert(buyer, &lifetime);
            self.total_burned.set(&total_burned);

            // ── Interaction ───────────────────────────────────────────────
            self.guarded(|| gateway::transfer_from(token, buyer, burn_account(), cost))?;

            self.env().emit_event(TicketsPurchased {
                buyer,
                round,
                count,
                cost,
            });
            Ok(())
        }

        /// Close the current round and open the next one. Old rounds stay
        /// queryable.
        #[ink(message)]
        pub fn start_new_round(&mut self) -> Result<RoundId, Error> {
            self.only_owner()?;
            let round_id = self.current_round.checked_add(1).ok_or(Error::Overflow)?;
            self.current_round = round_id;
            self.env().emit_event(NewRound { round_id });
            Ok(round_id)
        }

        // =====================================================================
        // BOUNTY PAYOUT
        // =====================================================================

        /// Pay the bounty pool to `winner`, capped at `max_bounty`; anything
        /// above the cap is burned. Returns `(prize, burned)` in base units.
        #[ink(message)]
        pub fn transfer_bounty_to_winner(
            &mut self,
            winner: AccountId,
        ) -> Result<(Balance, Balance), Error> {
            self.only_owner()?;
            self.ensure_unlocked()?;

            let pool_wallet = self.bounty_wallet;
            if winner == burn_account() || winner == pool_wallet {
                return Err(Error::InvalidParameter);
            }

            let token = self.token;
            if !gateway::is_tax_exempt(token, pool_wallet)? {
                return Err(Error::BountyWalletNotExempt);
            }
            let pool = gateway::balance_of(token, pool_wallet)?;
            if pool == 0 {
                return Err(Error::BountyPoolEmpty);
            }

            let cap = WholeTokens(self.config.max_bounty)
                .to_base_units()
                .ok_or(Error::Overflow)?;
            let prize = pool.min(cap);
            let excess = pool - prize;

            if gateway::allowance(token, pool_wallet, self.env().account_id())? < pool {
                return Err(Error::InsufficientAllowance);
            }
            let total_burned = self.total_burned().checked_add(excess).ok_or(Error::Overflow)?;

            self.total_burned.set(&total_burned);

            self.guarded(|| {
                if prize > 0 {
                    gateway::transfer_from(token, pool_wallet, winner, prize)?;
                }
                if excess > 0 {
                    gateway::transfer_from(token, pool_wallet, burn_account(), excess)?;
                }
                Ok(())
            })?;

            self.env().emit_event(BountyTransferred {
                round: self.current_round,
                winner,
                prize: WholeTokens::from_base_units(prize).get(),
                burn: WholeTokens::from_base_units(excess).get(),
            });
            Ok((prize, excess))
        }

        // =====================================================================
        // ADMIN
        // =====================================================================

        #[ink(message)]
        pub fn set_max_bounty(&mut self, max_bounty_whole: u128) -> Result<(), Error> {
            self.only_owner()?;
            Self::ensure_scalable(max_bounty_whole)?;
            if max_bounty_whole == 0 {
                return Err(Error::InvalidParameter);
            }
            let previous = self.config.max_bounty;
            self.config.max_bounty = max_bounty_whole;
            self.env().emit_event(MaxBountyChanged {
                previous,
                updated: max_bounty_whole,
            });
            Ok(())
        }

        /// Zero opens the sale to every holder.
        #[ink(message)]
        pub fn set_min_balance(&mut self, min_balance_whole: u128) -> Result<(), Error> {
            self.only_owner()?;
            let previous = self.config.min_balance;
            self.config.min_balance = min_balance_whole;
            self.env().emit_event(MinBalanceChanged {
                previous,
                updated: min_balance_whole,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn set_ticket_price(&mut self, price_whole: u128) -> Result<(), Error> {
            self.only_owner()?;
            Self::ensure_scalable(price_whole)?;
            if price_whole == 0 {
                return Err(Error::InvalidParameter);
            }
            let previous = self.config.ticket_price;
            self.config.ticket_price = price_whole;
            self.env().emit_event(TicketPriceChanged {
                previous,
                updated: price_whole,
            });
            Ok(())
        }

        /// Replace tier `index`. The table must stay strictly ascending and
        /// the last tier keeps the sentinel ceiling.
        #[ink(message)]
        pub fn set_threshold(
            &mut self,
            index: u32,
            balance: u128,
            max_tickets: u32,
        ) -> Result<(), Error> {
            self.only_owner()?;
            let tier = tiers::validate_update(&self.thresholds, index, balance, max_tickets)?;
            self.thresholds[index as usize] = tier;
            self.env().emit_event(ThresholdChanged {
                index,
                ceiling: tier.ceiling,
                max_tickets: tier.max_tickets,
            });
            Ok(())
        }

        /// Point payouts at another pool wallet. It must already be
        /// tax-exempt on the token.
        #[ink(message)]
        pub fn set_bounty_wallet(&mut self, wallet: AccountId) -> Result<(), Error> {
            self.only_owner()?;
            if wallet == burn_account() {
                return Err(Error::InvalidParameter);
            }
            if !gateway::is_tax_exempt(self.token, wallet)? {
                return Err(Error::BountyWalletNotExempt);
            }
            let previous = self.bounty_wallet;
            self.bounty_wallet = wallet;
            self.env().emit_event(BountyWalletChanged {
                previous,
                updated: wallet,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<(), Error> {
            self.only_owner()?;
            let previous = self.owner;
            self.owner = new_owner;
            self.env().emit_event(SaleOwnershipTransferred {
                previous,
                new_owner,
            });
            Ok(())
        }

        // =====================================================================
        // VIEWS
        // =====================================================================

        /// Tickets `account` may still buy this round. Reads the live token
        /// balance on every call.
        #[ink(message)]
        pub fn max_tickets_allowed(&self, account: AccountId) -> Result<u32, Error> {
            let balance_whole = self.balance_whole(account)?;
            Ok(tiers::remaining_allowance(
                &self.thresholds,
                balance_whole,
                self.config.min_balance,
                self.tickets_in_round(self.current_round, account),
            ))
        }

        /// Tier allowance before subtracting this round's purchases.
        #[ink(message)]
        pub fn tier_allowance(&self, account: AccountId) -> Result<u32, Error> {
            let balance_whole = self.balance_whole(account)?;
            Ok(tiers::gross_allowance(
                &self.thresholds,
                balance_whole,
                self.config.min_balance,
            ))
        }

        #[ink(message)]
        pub fn tickets_in_round(&self, round: RoundId, account: AccountId) -> u32 {
            self.tickets.get((round, account)).unwrap_or(0)
        }

        /// Participants of `round` in first-purchase order, `limit` capped at
        /// `MAX_PAGE_SIZE`.
        #[ink(message)]
        pub fn participants(&self, round: RoundId, offset: u32, limit: u32) -> Vec<AccountId> {
            let total = self.round_totals.get(round).unwrap_or_default().participants;
            let end = offset
                .saturating_add(limit.min(MAX_PAGE_SIZE))
                .min(total);
            (offset..end)
                .filter_map(|slot| self.round_participants.get((round, slot)))
                .collect()
        }

        #[ink(message)]
        pub fn round_stats(&self, round: RoundId) -> RoundStats {
            let totals = self.round_totals.get(round).unwrap_or_default();
            RoundStats {
                round_id: round,
                is_current: round == self.current_round,
                participants: totals.participants,
                tickets: totals.tickets,
                total_cost: totals.total_cost,
            }
        }

        #[ink(message)]
        pub fn user_stats(&self, account: AccountId) -> Result<UserStats, Error> {
            let balance = gateway::balance_of(self.token, account)?;
            let balance_whole = WholeTokens::from_base_units(balance).get();
            let tickets_this_round = self.tickets_in_round(self.current_round, account);
            Ok(UserStats {
                account,
                balance,
                balance_whole,
                eligible: balance_whole >= self.config.min_balance,
                tickets_this_round,
                remaining_tickets: tiers::remaining_allowance(
                    &self.thresholds,
                    balance_whole,
                    self.config.min_balance,
                    tickets_this_round,
                ),
                lifetime: self.buyer_totals.get(account).unwrap_or_default(),
            })
        }

        #[ink(message)]
        pub fn thresholds(&self) -> Vec<Tier> {
            self.thresholds.clone()
        }

        #[ink(message)]
        pub fn config(&self) -> SaleConfig {
            self.config
        }

        #[ink(message)]
        pub fn current_round(&self) -> RoundId {
            self.current_round
        }

        #[ink(message)]
        pub fn total_burned(&self) -> Balance {
            self.total_burned.get().unwrap_or(0)
        }

        #[ink(message)]
        pub fn token(&self) -> AccountId {
            self.token
        }

        #[ink(message)]
        pub fn bounty_wallet(&self) -> AccountId {
            self.bounty_wallet
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        // =====================================================================
        // INTERNAL HELPERS
        // =====================================================================

        fn balance_whole(&self, account: AccountId) -> Result<u128, Error> {
            let balance = gateway::balance_of(self.token, account)?;
            Ok(WholeTokens::from_base_units(balance).get())
        }

        /// Run a token interaction with the lock committed to storage.
        fn guarded<T>(&mut self, call: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
            self.locked.set(&true);
            let result = call();
            self.locked.set(&false);
            result
        }

        fn ensure_unlocked(&self) -> Result<(), Error> {
            if self.locked.get().unwrap_or(false) {
                return Err(Error::ReentrantCall);
            }
            Ok(())
        }

        fn ensure_scalable(whole: u128) -> Result<(), Error> {
            WholeTokens(whole)
                .to_base_units()
                .map(|_| ())
                .ok_or(Error::InvalidParameter)
        }

        fn only_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::NotOwner);
            }
            Ok(())
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
