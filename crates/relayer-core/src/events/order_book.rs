use alloy_sol_types::sol;

sol! {
    /// Emitted when a buy order is placed
    #[derive(Debug)]
    event PlaceBuyOrder(
        bytes32 orderHash,
        address token,
        address base,
        uint256 price,
        uint256 quantity,
        address owner,
        uint256 timestamp
    );

    /// Emitted when a sell order is placed
    /// Note: payload layout is identical to PlaceBuyOrder
    #[derive(Debug)]
    event PlaceSellOrder(
        bytes32 orderHash,
        address token,
        address base,
        uint256 price,
        uint256 quantity,
        address owner,
        uint256 timestamp
    );

    /// Emitted when a standing order is cancelled
    #[derive(Debug)]
    event CancelOrder(
        bytes32 orderHash
    );
}
