use alloy_primitives::{Address, U256};

/// Exchange-side balances for one (token, owner) pair.
///
/// Escrow holds the part of the balance locked behind open orders; the chain
/// guarantees escrow never exceeds balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub token: Address,
    pub owner: Address,
    pub balance: U256,
    pub escrow_balance: U256,
}
