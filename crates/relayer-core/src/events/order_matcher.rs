use alloy_sol_types::sol;

sol! {
    /// Emitted when two orders match (trade execution)
    #[derive(Debug)]
    event Trade(
        bytes32 buyOrderHash,
        bytes32 sellOrderHash,
        uint256 volume,
        uint256 timestamp
    );

    /// Emitted when an order's cumulative filled volume changes
    #[derive(Debug)]
    event OrderFilledVolumeUpdate(
        bytes32 orderHash,
        uint256 volume
    );
}
