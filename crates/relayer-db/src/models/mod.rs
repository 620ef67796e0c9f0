mod order;
mod trade;
mod wallet;
mod withdraw;

pub use order::DbOrder;
pub use trade::DbTrade;
pub use wallet::DbWallet;
pub use withdraw::{DbWithdrawMeta, DbWithdrawSign};

use crate::{DatabaseError, Result};
use alloy_primitives::{Address, B256, U256};

/// Canonical storage form of an address: lowercase 0x-prefixed hex.
pub fn addr_hex(value: &Address) -> String {
    format!("{value:#x}")
}

/// Canonical storage form of a 32-byte hash: lowercase 0x-prefixed hex.
pub fn hash_hex(value: &B256) -> String {
    format!("{value:#x}")
}

pub(crate) fn parse_addr(value: &str) -> Result<Address> {
    value
        .parse()
        .map_err(|_| DatabaseError::Decode(format!("bad address: {value}")))
}

pub(crate) fn parse_hash(value: &str) -> Result<B256> {
    value
        .parse()
        .map_err(|_| DatabaseError::Decode(format!("bad hash: {value}")))
}

pub(crate) fn parse_u256(value: &str) -> Result<U256> {
    U256::from_str_radix(value, 10)
        .map_err(|_| DatabaseError::Decode(format!("bad numeric: {value}")))
}
