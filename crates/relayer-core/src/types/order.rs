use alloy_primitives::{Address, B256, U256};

/// A standing buy or sell intent mirrored from the orderbook contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// 32-byte digest uniquely identifying the order on-chain
    pub hash: B256,
    pub token: Address,
    pub base: Address,
    pub price: U256,
    pub quantity: U256,
    pub is_bid: bool,
    pub created_by: Address,
    pub created_at: u64,
    /// price * quantity, in base-token units
    pub volume: U256,
    /// Cumulative filled volume; advanced only by OrderFilledVolumeUpdate
    pub volume_filled: U256,
    pub is_open: bool,
}

impl Order {
    /// Remaining unfilled volume.
    pub fn volume_left(&self) -> U256 {
        self.volume.saturating_sub(self.volume_filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(volume: u64, filled: u64) -> Order {
        Order {
            hash: B256::repeat_byte(0xaa),
            token: Address::repeat_byte(0x01),
            base: Address::repeat_byte(0x02),
            price: U256::from(2u64),
            quantity: U256::from(volume / 2),
            is_bid: true,
            created_by: Address::repeat_byte(0x03),
            created_at: 100,
            volume: U256::from(volume),
            volume_filled: U256::from(filled),
            is_open: true,
        }
    }

    #[test]
    fn volume_left_subtracts_filled() {
        assert_eq!(order(10, 4).volume_left(), U256::from(6u64));
        assert_eq!(order(10, 10).volume_left(), U256::ZERO);
    }

    #[test]
    fn volume_left_never_underflows() {
        // A stale row with filled > volume must not panic the matcher.
        assert_eq!(order(4, 10).volume_left(), U256::ZERO);
    }
}
