//! Calls into the INKY token contract.
//!
//! On chain every call is a `build_call` against the token's message
//! selectors. Unit tests swap in an in-memory ledger with the same
//! semantics for the paths the sale uses (exempt transfers only: buyers
//! burn to `BURN_ADDRESS`, payouts leave the bounty system wallet).

use ink::primitives::AccountId;

use crate::errors::SaleError;

pub type Balance = u128;

#[cfg(not(test))]
use self::chain as backend;
#[cfg(test)]
use self::mock as backend;

pub fn balance_of(token: AccountId, owner: AccountId) -> Result<Balance, SaleError> {
    backend::balance_of(token, owner)
}

pub fn allowance(
    token: AccountId,
    owner: AccountId,
    spender: AccountId,
) -> Result<Balance, SaleError> {
    backend::allowance(token, owner, spender)
}

/// System wallets and whitelisted accounts move tokens untaxed.
pub fn is_tax_exempt(token: AccountId, account: AccountId) -> Result<bool, SaleError> {
    backend::is_tax_exempt(token, account)
}

/// Spend this contract's allowance on `from`.
pub fn transfer_from(
    token: AccountId,
    from: AccountId,
    to: AccountId,
    value: Balance,
) -> Result<(), SaleError> {
    backend::transfer_from(token, from, to, value)
}

#[cfg(not(test))]
mod chain {
    use ink::env::call::{build_call, ExecutionInput, Selector};
    use ink::env::DefaultEnvironment;
    use ink::primitives::AccountId;
    use inky_token::TokenError;

    use super::Balance;
    use crate::errors::SaleError;

    fn call_failed<E>(_: E) -> SaleError {
        SaleError::TokenCallFailed
    }

    pub fn balance_of(token: AccountId, owner: AccountId) -> Result<Balance, SaleError> {
        build_call::<DefaultEnvironment>()
            .call(token)
            .exec_input(
                ExecutionInput::new(Selector::new(ink::selector_bytes!("balance_of")))
                    .push_arg(owner),
            )
            .returns::<Balance>()
            .try_invoke()
            .map_err(call_failed)?
            .map_err(call_failed)
    }

    pub fn allowance(
        token: AccountId,
        owner: AccountId,
        spender: AccountId,
    ) -> Result<Balance, SaleError> {
        build_call::<DefaultEnvironment>()
            .call(token)
            .exec_input(
                ExecutionInput::new(Selector::new(ink::selector_bytes!("allowance")))
                    .push_arg(owner)
                    .push_arg(spender),
            )
            .returns::<Balance>()
            .try_invoke()
            .map_err(call_failed)?
            .map_err(call_failed)
    }

    pub fn is_tax_exempt(token: AccountId, account: AccountId) -> Result<bool, SaleError> {
        build_call::<DefaultEnvironment>()
            .call(token)
            .exec_input(
                ExecutionInput::new(Selector::new(ink::selector_bytes!("is_tax_exempt")))
                    .push_arg(account),
            )
            .returns::<bool>()
            .try_invoke()
            .map_err(call_failed)?
            .map_err(call_failed)
    }

    pub fn transfer_from(
        token: AccountId,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), SaleError> {
        let outcome: Result<(), TokenError> = build_call::<DefaultEnvironment>()
            .call(token)
            .exec_input(
                ExecutionInput::new(Selector::new(ink::selector_bytes!("transfer_from")))
                    .push_arg(from)
                    .push_arg(to)
                    .push_arg(value),
            )
            .returns::<Result<(), TokenError>>()
            .try_invoke()
            .map_err(call_failed)?
            .map_err(call_failed)?;
        outcome.map_err(SaleError::Token)
    }
}

/// In-memory stand-in for the token, one ledger per test thread.
#[cfg(test)]
pub mod mock {
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};

    use ink::env::DefaultEnvironment;
    use ink::primitives::AccountId;
    use inky_token::TokenError;

    use super::Balance;
    use crate::errors::SaleError;

    /// Sampled at the start of every `transfer_from`.
    pub type Watcher = fn() -> (bool, Balance);

    #[derive(Default)]
    struct Ledger {
        balances: BTreeMap<AccountId, Balance>,
        allowances: BTreeMap<(AccountId, AccountId), Balance>,
        exempt: BTreeSet<AccountId>,
        offline: bool,
        watcher: Option<Watcher>,
        watched: Vec<(bool, Balance)>,
    }

    thread_local! {
        static LEDGER: RefCell<Ledger> = RefCell::new(Ledger::default());
    }

    fn with<R>(f: impl FnOnce(&mut Ledger) -> R) -> R {
        LEDGER.with(|ledger| f(&mut *ledger.borrow_mut()))
    }

    fn online<R>(f: impl FnOnce(&mut Ledger) -> Result<R, SaleError>) -> Result<R, SaleError> {
        with(|ledger| {
            if ledger.offline {
                return Err(SaleError::TokenCallFailed);
            }
            f(ledger)
        })
    }

    pub fn reset() {
        with(|ledger| *ledger = Ledger::default());
    }

    pub fn set_offline(offline: bool) {
        with(|ledger| ledger.offline = offline);
    }

    pub fn set_balance(owner: AccountId, value: Balance) {
        with(|ledger| ledger.balances.insert(owner, value));
    }

    pub fn set_allowance(owner: AccountId, spender: AccountId, value: Balance) {
        with(|ledger| ledger.allowances.insert((owner, spender), value));
    }

    pub fn set_tax_exempt(account: AccountId, exempt: bool) {
        with(|ledger| {
            if exempt {
                ledger.exempt.insert(account);
            } else {
                ledger.exempt.remove(&account);
            }
        });
    }

    pub fn watch_transfers(watcher: Watcher) {
        with(|ledger| ledger.watcher = Some(watcher));
    }

    pub fn watched() -> Vec<(bool, Balance)> {
        with(|ledger| ledger.watched.clone())
    }

    pub fn balance(owner: AccountId) -> Balance {
        with(|ledger| ledger.balances.get(&owner).copied().unwrap_or(0))
    }

    pub fn allowance_of(owner: AccountId, spender: AccountId) -> Balance {
        with(|ledger| ledger.allowances.get(&(owner, spender)).copied().unwrap_or(0))
    }

    pub fn balance_of(_token: AccountId, owner: AccountId) -> Result<Balance, SaleError> {
        online(|ledger| Ok(ledger.balances.get(&owner).copied().unwrap_or(0)))
    }

    pub fn allowance(
        _token: AccountId,
        owner: AccountId,
        spender: AccountId,
    ) -> Result<Balance, SaleError> {
        online(|ledger| Ok(ledger.allowances.get(&(owner, spender)).copied().unwrap_or(0)))
    }

    pub fn is_tax_exempt(_token: AccountId, account: AccountId) -> Result<bool, SaleError> {
        online(|ledger| Ok(ledger.exempt.contains(&account)))
    }

    pub fn transfer_from(
        _token: AccountId,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), SaleError> {
        let spender = ink::env::account_id::<DefaultEnvironment>();
        if let Some(watcher) = with(|ledger| ledger.watcher) {
            let seen = watcher();
            with(|ledger| ledger.watched.push(seen));
        }
        online(|ledger| {
            if value == 0 {
                return Err(SaleError::Token(TokenError::ZeroAmount));
            }
            let allowance = ledger.allowances.get(&(from, spender)).copied().unwrap_or(0);
            if allowance < value {
                return Err(SaleError::Token(TokenError::InsufficientAllowance));
            }
            let from_balance = ledger.balances.get(&from).copied().unwrap_or(0);
            if from_balance < value {
                return Err(SaleError::Token(TokenError::InsufficientBalance));
            }
            ledger.allowances.insert((from, spender), allowance - value);
            ledger.balances.insert(from, from_balance - value);
            *ledger.balances.entry(to).or_insert(0) += value;
            Ok(())
        })
    }
}
