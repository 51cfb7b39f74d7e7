/// Failure outcomes of the INKY token messages.
///
/// Every variant is returned before the first storage write of the
/// failing message, so a rejected call leaves the ledger untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum TokenError {
    /// Caller is not the contract owner.
    NotOwner,
    /// Caller is not the team wallet.
    NotTeamWallet,
    /// Amount argument is zero.
    ZeroAmount,
    /// Sender's balance does not cover the amount.
    InsufficientBalance,
    /// Spender's allowance does not cover the amount.
    InsufficientAllowance,
    /// Requested bounty rate exceeds `MAX_BOUNTY_BPS`.
    BountyRateTooHigh,
    /// Nothing has vested since the last claim.
    NothingToClaim,
    /// Airdrop batch has no recipients.
    EmptyRecipients,
    /// Airdrop batch exceeds `MAX_AIRDROP_BATCH`.
    BatchTooLarge,
    /// Airdrop wallet balance does not cover the batch.
    InsufficientAirdropPool,
    /// Target account is the burn address where that is not allowed.
    InvalidAddress,
    /// An arithmetic operation overflowed.
    Overflow,
}
