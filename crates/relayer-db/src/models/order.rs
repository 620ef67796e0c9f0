use super::{addr_hex, hash_hex, parse_addr, parse_hash, parse_u256};
use crate::Result;
use relayer_core::types::Order;
use sqlx::FromRow;

/// Database model for the orders table
#[derive(Debug, Clone, FromRow)]
pub struct DbOrder {
    /// Primary key: order hash (lowercase hex)
    pub hash: String,
    pub token: String,
    pub base: String,
    pub price: String,
    pub quantity: String,
    pub is_bid: bool,
    pub created_by: String,
    pub created_at: i64,
    pub volume: String,
    pub volume_filled: String,
    pub is_open: bool,
}

impl From<&Order> for DbOrder {
    fn from(order: &Order) -> Self {
        Self {
            hash: hash_hex(&order.hash),
            token: addr_hex(&order.token),
            base: addr_hex(&order.base),
            price: order.price.to_string(),
            quantity: order.quantity.to_string(),
            is_bid: order.is_bid,
            created_by: addr_hex(&order.created_by),
            created_at: order.created_at as i64,
            volume: order.volume.to_string(),
            volume_filled: order.volume_filled.to_string(),
            is_open: order.is_open,
        }
    }
}

impl DbOrder {
    pub fn try_into_order(self) -> Result<Order> {
        Ok(Order {
            hash: parse_hash(&self.hash)?,
            token: parse_addr(&self.token)?,
            base: parse_addr(&self.base)?,
            price: parse_u256(&self.price)?,
            quantity: parse_u256(&self.quantity)?,
            is_bid: self.is_bid,
            created_by: parse_addr(&self.created_by)?,
            created_at: self.created_at as u64,
            volume: parse_u256(&self.volume)?,
            volume_filled: parse_u256(&self.volume_filled)?,
            is_open: self.is_open,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, U256};

    #[test]
    fn order_round_trips_through_db_model() {
        let order = Order {
            hash: B256::repeat_byte(0xaa),
            token: Address::repeat_byte(0x01),
            base: Address::repeat_byte(0x02),
            price: U256::from(2u64),
            quantity: U256::from(3u64),
            is_bid: true,
            created_by: Address::repeat_byte(0x03),
            created_at: 100,
            volume: U256::from(6u64),
            volume_filled: U256::ZERO,
            is_open: true,
        };
        let db = DbOrder::from(&order);
        assert_eq!(db.hash, format!("{:#x}", order.hash));
        assert_eq!(db.volume, "6");
        assert_eq!(db.try_into_order().unwrap(), order);
    }

    #[test]
    fn wei_scale_values_survive_the_decimal_encoding() {
        let volume = U256::from_str_radix("115792089237316195423570985008687907853", 10).unwrap();
        let order = Order {
            hash: B256::repeat_byte(0x01),
            token: Address::ZERO,
            base: Address::ZERO,
            price: volume,
            quantity: U256::from(1u64),
            is_bid: false,
            created_by: Address::ZERO,
            created_at: 0,
            volume,
            volume_filled: U256::ZERO,
            is_open: true,
        };
        let round_tripped = DbOrder::from(&order).try_into_order().unwrap();
        assert_eq!(round_tripped.volume, volume);
    }
}
