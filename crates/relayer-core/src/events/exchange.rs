use alloy_sol_types::sol;

sol! {
    /// Emitted whenever a wallet's balance or escrow changes on the exchange
    #[derive(Debug)]
    event BalanceUpdate(
        address token,
        address user,
        uint256 balance,
        uint256 escrow
    );

    /// Emitted when a user requests a withdrawal back to the bridge network
    #[derive(Debug)]
    event Withdraw(
        address recipient,
        address token,
        uint256 value
    );

    /// Emitted when a withdrawal has collected enough authority signatures
    #[derive(Debug)]
    event ReadyToWithdraw(
        bytes message
    );

    /// Emitted for each authority signature over a withdrawal message
    #[derive(Debug)]
    event WithdrawSignatureSubmitted(
        address authority,
        bytes message,
        bytes signature,
        uint256 timestamp
    );
}
