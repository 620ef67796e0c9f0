use alloy_sol_types::sol;

sol! {
    /// Emitted when the bridge pays out a withdrawal on the home network.
    /// `transactionHash` references the originating exchange-network withdraw
    #[derive(Debug)]
    event Withdraw(
        address recipient,
        address token,
        uint256 value,
        bytes32 transactionHash
    );
}
