use inky_token::TokenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum SaleError {
    /// Caller is not the contract owner.
    NotOwner,
    /// Ticket count is zero.
    ZeroTickets,
    /// Buyer's whole-token balance is below the participation minimum.
    BelowMinimumBalance,
    /// Requested tickets exceed the buyer's remaining tier allowance.
    ExceedsTicketAllowance,
    /// Buyer's token allowance to this contract does not cover the cost.
    InsufficientAllowance,
    /// Buyer's token balance does not cover the cost.
    InsufficientBalance,
    /// Bounty wallet holds no tokens.
    BountyPoolEmpty,
    /// Bounty wallet is not tax-exempt on the token, so payouts would be taxed.
    BountyWalletNotExempt,
    /// Threshold index is outside the table.
    IndexOutOfRange,
    /// Threshold update would break the ascending order or the sentinel tier.
    InvalidThreshold,
    /// Price, cap or account argument is unusable.
    InvalidParameter,
    /// A token call was re-entered while another one was in flight.
    ReentrantCall,
    /// The token contract rejected the call.
    Token(TokenError),
    /// The cross-contract call itself could not be dispatched or decoded.
    TokenCallFailed,
    /// An arithmetic operation overflowed.
    Overflow,
}

impl From<TokenError> for SaleError {
    fn from(err: TokenError) -> Self {
        SaleError::Token(err)
    }
}
