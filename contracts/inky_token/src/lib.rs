#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// Supply, allocation and addressing constants.
pub mod constants {
    use crate::units::{Balance, SCALE};
    use ink::primitives::AccountId;

    pub const TOKEN_NAME: &str = "INKY";
    pub const TOKEN_SYMBOL: &str = "INKY";

    pub const TOTAL_SUPPLY: Balance = 500_000_000 * SCALE;

    pub const TREASURY_ALLOCATION: Balance = TOTAL_SUPPLY / 100 * 35;
    pub const LIQUIDITY_ALLOCATION: Balance = TOTAL_SUPPLY / 100 * 30;
    pub const TEAM_IMMEDIATE_ALLOCATION: Balance = TOTAL_SUPPLY / 100 * 5;
    pub const TEAM_VESTING_ALLOCATION: Balance = TOTAL_SUPPLY / 100 * 20;
    pub const AIRDROP_ALLOCATION: Balance = TOTAL_SUPPLY / 100 * 10;

    /// Upper bound on recipients per `airdrop` call.
    pub const MAX_AIRDROP_BATCH: usize = 200;

    /// Null account. Tokens sent here are out of circulation for good.
    pub const BURN_ADDRESS: [u8; 32] = [0u8; 32];

    pub fn burn_account() -> AccountId {
        AccountId::from(BURN_ADDRESS)
    }
}

pub mod errors;
pub mod tax;
pub mod units;
pub mod vesting;

pub use errors::TokenError;

/// # INKY Token Engine
///
/// **Role:** Ground-truth ledger, bounty tax router, team vesting escrow and
/// one-shot airdrop distributor.
///
/// ## Genesis distribution (500 000 000 INKY, never re-minted)
///
/// ```text
///   treasury          35%   175 000 000
///   liquidity         30%   150 000 000
///   team (immediate)   5%    25 000 000
///   team (escrow)     20%   100 000 000   held by this contract, vests 2 years
///   airdrop           10%    50 000 000
///   bounty             0%             0   filled by transfer tax only
/// ```
///
/// Burned tokens are credited to `BURN_ADDRESS`, so
/// `Σ balances == total_supply` holds for every reachable state.
#[ink::contract]
mod inky_token {
    use ink::prelude::string::String;
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;

    use crate::constants::*;
    use crate::errors::TokenError as Error;
    use crate::tax::{SystemWallets, TaxSplit, DEFAULT_BOUNTY_BPS, MAX_BOUNTY_BPS};
    use crate::units::{WholeTokens, DECIMALS};
    use crate::vesting::{VestingSchedule, TEAM_VESTING_DURATION_MS};

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct InkyToken {
        // ── Token metadata ────────────────────────────────────────────────
        name: String,
        symbol: String,
        decimals: u8,
        total_supply: Balance,

        // ── Ledger ────────────────────────────────────────────────────────
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,

        // ── Access control ────────────────────────────────────────────────
        owner: AccountId,
        wallets: SystemWallets,

        // ── Tax policy ────────────────────────────────────────────────────
        bounty_bps: u16,
        /// Owner whitelist on top of the always-exempt system wallets.
        bounty_exempt: Mapping<AccountId, bool>,

        // ── Distribution ──────────────────────────────────────────────────
        /// Escrow backing lives in this contract's own balance.
        team_vesting: VestingSchedule,
        airdrop_claimed: Mapping<AccountId, bool>,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: Option<AccountId>,
        #[ink(topic)]
        to: Option<AccountId>,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        value: Balance,
    }

    #[ink(event)]
    pub struct BountyRateChanged {
        previous: u16,
        updated: u16,
    }

    #[ink(event)]
    pub struct BountyExemptionChanged {
        #[ink(topic)]
        account: AccountId,
        exempt: bool,
    }

    #[ink(event)]
    pub struct AirdropSent {
        #[ink(topic)]
        recipient: AccountId,
        amount: Balance,
    }

    /// Emitted on every successful `claim_team_tokens`.
    #[ink(event)]
    pub struct TeamTokensClaimed {
        amount: Balance,
        timestamp: Timestamp,
    }

    #[ink(event)]
    pub struct OwnershipTransferred {
        #[ink(topic)]
        previous: AccountId,
        #[ink(topic)]
        new_owner: AccountId,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl InkyToken {
        /// Deploy the token and mint the genesis distribution.
        ///
        /// The caller becomes the owner. The team escrow is credited to this
        /// contract and vests from the current block timestamp.
        #[ink(constructor)]
        pub fn new(
            treasury: AccountId,
            liquidity: AccountId,
            team: AccountId,
            bounty: AccountId,
            airdrop: AccountId,
        ) -> Self {
            let now = Self::env().block_timestamp();
            let escrow = Self::env().account_id();

            let mut token = Self {
                name: String::from(TOKEN_NAME),
                symbol: String::from(TOKEN_SYMBOL),
                decimals: DECIMALS,
                total_supply: TOTAL_SUPPLY,
                balances: Mapping::default(),
                allowances: Mapping::default(),
                owner: Self::env().caller(),
                wallets: SystemWallets {
                    treasury,
                    liquidity,
                    team,
                    bounty,
                    airdrop,
                },
                bounty_bps: DEFAULT_BOUNTY_BPS,
                bounty_exempt: Mapping::default(),
                team_vesting: VestingSchedule::new(
                    TEAM_VESTING_ALLOCATION,
                    now,
                    TEAM_VESTING_DURATION_MS,
                ),
                airdrop_claimed: Mapping::default(),
            };

            token.mint(treasury, TREASURY_ALLOCATION);
            token.mint(liquidity, LIQUIDITY_ALLOCATION);
            token.mint(team, TEAM_IMMEDIATE_ALLOCATION);
            token.mint(escrow, TEAM_VESTING_ALLOCATION);
            token.mint(airdrop, AIRDROP_ALLOCATION);
            token
        }

        // =====================================================================
        // PSP22 / ERC-20 SURFACE
        // =====================================================================

        #[ink(message)]
        pub fn name(&self) -> String {
            self.name.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.symbol.clone()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            self.decimals
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner: AccountId) -> Balance {
            self.balances.get(owner).unwrap_or(0)
        }

        #[ink(message)]
        pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
            self.allowances.get((owner, spender)).unwrap_or(0)
        }

        #[ink(message)]
        pub fn approve(&mut self, spender: AccountId, value: Balance) -> Result<(), Error> {
            let owner = self.env().caller();
            self.allowances.insert((owner, spender), &value);
            self.env().emit_event(Approval { owner, spender, value });
            Ok(())
        }

        /// Move `value` from the caller to `to`, skimming the bounty tax
        /// unless the transfer is exempt.
        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, value: Balance) -> Result<(), Error> {
            let from = self.env().caller();
            self.transfer_taxed(from, to, value).map(|_| ())
        }

        /// Spend the caller's allowance on `from`.
        ///
        /// The allowance is checked before any ledger move and decremented by
        /// the pre-tax `value`, not by what reaches the recipient.
        ///
        /// # Errors
        /// - [`Error::InsufficientAllowance`]: allowance below `value`.
        /// - [`Error::InsufficientBalance`]: `from` cannot cover `value`.
        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            let caller = self.env().caller();
            let allowance = self.allowance(from, caller);
            if allowance < value {
                return Err(Error::InsufficientAllowance);
            }

            self.transfer_taxed(from, to, value)?;
            self.allowances.insert((from, caller), &(allowance - value));
            Ok(())
        }

        /// Returns `(bounty, send)` for a prospective transfer without
        /// touching state.
        #[ink(message)]
        pub fn quote_transfer(
            &self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(Balance, Balance), Error> {
            let split = self.tax_split(from, to, value)?;
            Ok((split.bounty, split.send))
        }

        // =====================================================================
        // TAX POLICY
        // =====================================================================

        #[ink(message)]
        pub fn set_bounty_percent(&mut self, bps: u16) -> Result<(), Error> {
            self.only_owner()?;
            if bps > MAX_BOUNTY_BPS {
                return Err(Error::BountyRateTooHigh);
            }
            let previous = self.bounty_bps;
            self.bounty_bps = bps;
            self.env().emit_event(BountyRateChanged {
                previous,
                updated: bps,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn set_bounty_exempt(
            &mut self,
            account: AccountId,
            exempt: bool,
        ) -> Result<(), Error> {
            self.only_owner()?;
            if exempt {
                self.bounty_exempt.insert(account, &true);
            } else {
                self.bounty_exempt.remove(account);
            }
            self.env().emit_event(BountyExemptionChanged { account, exempt });
            Ok(())
        }

        #[ink(message)]
        pub fn bounty_percent(&self) -> u16 {
            self.bounty_bps
        }

        /// Owner whitelist flag only. See `is_tax_exempt` for the effective rule.
        #[ink(message)]
        pub fn is_bounty_exempt(&self, account: AccountId) -> bool {
            self.bounty_exempt.get(account).unwrap_or(false)
        }

        /// `true` for system wallets and whitelisted accounts.
        #[ink(message)]
        pub fn is_tax_exempt(&self, account: AccountId) -> bool {
            self.wallets.contains(&account) || self.is_bounty_exempt(account)
        }

        #[ink(message)]
        pub fn system_wallets(&self) -> SystemWallets {
            self.wallets
        }

        // =====================================================================
        // DISTRIBUTION
        // =====================================================================

        /// Pay `amount_per_user_whole` tokens from the airdrop wallet to each
        /// recipient that has never received an airdrop.
        ///
        /// Repeats inside the batch and accounts that already claimed are
        /// skipped, and only the accounts actually paid count toward the pool
        /// check. Returns the number of accounts paid.
        #[ink(message)]
        pub fn airdrop(
            &mut self,
            recipients: Vec<AccountId>,
            amount_per_user: WholeTokens,
        ) -> Result<u32, Error> {
            self.only_owner()?;
            if recipients.is_empty() {
                return Err(Error::EmptyRecipients);
            }
            if recipients.len() > MAX_AIRDROP_BATCH {
                return Err(Error::BatchTooLarge);
            }
            let amount = amount_per_user.to_base_units().ok_or(Error::Overflow)?;
            if amount == 0 {
                return Err(Error::ZeroAmount);
            }

            let mut payees: Vec<AccountId> = Vec::with_capacity(recipients.len());
            for recipient in recipients {
                if self.is_reserved(recipient) {
                    return Err(Error::InvalidAddress);
                }
                if self.has_claimed_airdrop(recipient) || payees.contains(&recipient) {
                    continue;
                }
                payees.push(recipient);
            }

            let required = amount
                .checked_mul(payees.len() as u128)
                .ok_or(Error::Overflow)?;
            let pool = self.wallets.airdrop;
            if self.balance_of(pool) < required {
                return Err(Error::InsufficientAirdropPool);
            }

            for recipient in payees.iter().copied() {
                self.airdrop_claimed.insert(recipient, &true);
                self.move_balance(pool, recipient, amount)?;
                self.env().emit_event(AirdropSent { recipient, amount });
            }
            Ok(payees.len() as u32)
        }

        #[ink(message)]
        pub fn has_claimed_airdrop(&self, account: AccountId) -> bool {
            self.airdrop_claimed.get(account).unwrap_or(false)
        }

        #[ink(message)]
        pub fn send_from_treasury(
            &mut self,
            recipient: AccountId,
            amount: WholeTokens,
        ) -> Result<(), Error> {
            self.only_owner()?;
            if self.is_reserved(recipient) {
                return Err(Error::InvalidAddress);
            }
            let amount = amount.to_base_units().ok_or(Error::Overflow)?;
            if amount == 0 {
                return Err(Error::ZeroAmount);
            }
            let treasury = self.wallets.treasury;
            if self.balance_of(treasury) < amount {
                return Err(Error::InsufficientBalance);
            }
            self.move_balance(treasury, recipient, amount)
        }

        // =====================================================================
        // TEAM VESTING
        // =====================================================================

        /// Release everything vested since the previous claim to the team
        /// wallet.
        ///
        /// # Errors
        /// - [`Error::NotTeamWallet`]: caller is not the team wallet.
        /// - [`Error::NothingToClaim`]: nothing vested since the last claim.
        #[ink(message)]
        pub fn claim_team_tokens(&mut self) -> Result<Balance, Error> {
            let caller = self.env().caller();
            if caller != self.wallets.team {
                return Err(Error::NotTeamWallet);
            }

            let now = self.env().block_timestamp();
            let mut schedule = self.team_vesting;
            let amount = schedule.claim(now)?;

            let escrow = self.env().account_id();
            if self.balance_of(escrow) < amount {
                return Err(Error::InsufficientBalance);
            }

            // Claimed total is committed before the ledger move.
            self.team_vesting = schedule;
            self.move_balance(escrow, caller, amount)?;

            self.env().emit_event(TeamTokensClaimed {
                amount,
                timestamp: now,
            });
            Ok(amount)
        }

        #[ink(message)]
        pub fn claimable_team_tokens(&self) -> Balance {
            self.team_vesting
                .claimable_at(self.env().block_timestamp())
                .unwrap_or(0)
        }

        #[ink(message)]
        pub fn vesting_schedule(&self) -> VestingSchedule {
            self.team_vesting
        }

        // =====================================================================
        // SUPPLY VIEWS
        // =====================================================================

        #[ink(message)]
        pub fn burned_supply(&self) -> Balance {
            self.balance_of(burn_account())
        }

        /// Total supply minus burned tokens and the unvested team escrow.
        #[ink(message)]
        pub fn circulating_supply(&self) -> Balance {
            self.total_supply
                .saturating_sub(self.burned_supply())
                .saturating_sub(self.balance_of(self.env().account_id()))
        }

        // =====================================================================
        // ADMIN
        // =====================================================================

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        #[ink(message)]
        pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<(), Error> {
            self.only_owner()?;
            let previous = self.owner;
            self.owner = new_owner;
            self.env().emit_event(OwnershipTransferred {
                previous,
                new_owner,
            });
            Ok(())
        }

        // =====================================================================
        // INTERNAL HELPERS
        // =====================================================================

        fn transfer_exempt(&self, from: AccountId, to: AccountId) -> bool {
            to == burn_account() || self.is_tax_exempt(from) || self.is_tax_exempt(to)
        }

        /// The escrow account only receives at genesis; the burn address
        /// only through transfers.
        fn is_reserved(&self, account: AccountId) -> bool {
            account == burn_account() || account == self.env().account_id()
        }

        fn tax_split(
            &self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<TaxSplit, Error> {
            if self.transfer_exempt(from, to) {
                Ok(TaxSplit::exempt(value))
            } else {
                TaxSplit::at_rate(value, self.bounty_bps)
            }
        }

        /// All checks run before the first write.
        fn transfer_taxed(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<TaxSplit, Error> {
            if value == 0 {
                return Err(Error::ZeroAmount);
            }
            // Anything landing in the escrow would count as unvested forever.
            if to == self.env().account_id() {
                return Err(Error::InvalidAddress);
            }
            if self.balance_of(from) < value {
                return Err(Error::InsufficientBalance);
            }
            let split = self.tax_split(from, to, value)?;

            if split.bounty > 0 {
                let bounty = self.wallets.bounty;
                self.move_balance(from, bounty, split.bounty)?;
            }
            self.move_balance(from, to, split.send)?;
            Ok(split)
        }

        fn move_balance(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            self.debit_balance(from, value)?;
            self.credit_balance(to, value)?;
            self.env().emit_event(Transfer {
                from: Some(from),
                to: Some(to),
                value,
            });
            Ok(())
        }

        fn debit_balance(&mut self, account: AccountId, amount: Balance) -> Result<(), Error> {
            let balance = self.balance_of(account);
            if balance < amount {
                return Err(Error::InsufficientBalance);
            }
            self.balances.insert(account, &(balance - amount));
            Ok(())
        }

        fn credit_balance(&mut self, account: AccountId, amount: Balance) -> Result<(), Error> {
            let balance = self.balance_of(account);
            let new_balance = balance.checked_add(amount).ok_or(Error::Overflow)?;
            self.balances.insert(account, &new_balance);
            Ok(())
        }

        /// Genesis only. Allocations sum to `TOTAL_SUPPLY`, so this cannot
        /// overflow even when wallets coincide.
        fn mint(&mut self, to: AccountId, amount: Balance) {
            let balance = self.balance_of(to);
            self.balances.insert(to, &balance.saturating_add(amount));
            self.env().emit_event(Transfer {
                from: None,
                to: Some(to),
                value: amount,
            });
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
