use alloy_primitives::{Address, B256, U256};

/// An executed match between two standing orders. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub buy_order_hash: B256,
    pub sell_order_hash: B256,
    pub volume: U256,
    pub traded_at: u64,
    /// Hash of the match transaction that produced the Trade event
    pub tx_hash: B256,
    pub token: Address,
    pub base: Address,
    pub price: U256,
}
