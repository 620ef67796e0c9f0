use crate::{RedisConnection, RedisError, Result};
use alloy_primitives::B256;
use std::sync::Arc;

/// Bit position of the locally-exhausted flag within an order-hash key.
pub const EXHAUSTED_BIT: usize = 127;

/// Hint cache marking orders observed to be fully consumed.
///
/// The flag only suppresses match submissions that would revert on-chain;
/// losing the cache costs throughput, never correctness. Authoritative fill
/// state always comes from OrderFilledVolumeUpdate events.
pub struct ExhaustionCache {
    connection: Arc<RedisConnection>,
}

impl ExhaustionCache {
    pub fn new(connection: Arc<RedisConnection>) -> Self {
        Self { connection }
    }

    fn key(order_hash: &B256) -> String {
        format!("{order_hash:#x}")
    }

    /// Whether the order has been locally observed as fully consumed.
    pub async fn is_exhausted(&self, order_hash: &B256) -> Result<bool> {
        let mut conn = self.connection.get_connection();
        let bit: i64 = redis::cmd("GETBIT")
            .arg(Self::key(order_hash))
            .arg(EXHAUSTED_BIT)
            .query_async(&mut conn)
            .await
            .map_err(|e| RedisError::Cache(e.to_string()))?;
        Ok(bit == 1)
    }

    /// Flag the order as fully consumed.
    pub async fn mark_exhausted(&self, order_hash: &B256) -> Result<()> {
        let mut conn = self.connection.get_connection();
        redis::cmd("SETBIT")
            .arg(Self::key(order_hash))
            .arg(EXHAUSTED_BIT)
            .arg(1)
            .query_async::<i64>(&mut conn)
            .await
            .map_err(|e| RedisError::Cache(e.to_string()))?;
        Ok(())
    }
}
