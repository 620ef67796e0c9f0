//! Typed declarations for the chain events the relayer subscribes to.
//!
//! Both networks emit a `Withdraw` event with different payloads, so the
//! declarations stay module-qualified instead of being re-exported flat.

pub mod bridge;
pub mod exchange;
pub mod order_book;
pub mod order_matcher;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, U256};
    use alloy_sol_types::SolEvent;

    #[test]
    fn withdraw_signatures_differ_per_network() {
        // The bridge variant carries the exchange tx hash; topic0 must not
        // collide with the exchange variant.
        assert_ne!(
            exchange::Withdraw::SIGNATURE_HASH,
            bridge::Withdraw::SIGNATURE_HASH
        );
    }

    #[test]
    fn place_buy_and_sell_orders_share_a_payload_layout() {
        let buy = order_book::PlaceBuyOrder {
            orderHash: B256::repeat_byte(0xaa),
            token: Address::repeat_byte(0x01),
            base: Address::repeat_byte(0x02),
            price: U256::from(2u64),
            quantity: U256::from(3u64),
            owner: Address::repeat_byte(0x03),
            timestamp: U256::from(100u64),
        };
        let data = buy.encode_log_data();
        // Same data bytes decode as a sell order; only topic0 differs.
        let sell_data = alloy_primitives::LogData::new_unchecked(
            vec![order_book::PlaceSellOrder::SIGNATURE_HASH],
            data.data.clone(),
        );
        let primitive = alloy_primitives::Log {
            address: Address::repeat_byte(0x0b),
            data: sell_data,
        };
        let sell = order_book::PlaceSellOrder::decode_log(&primitive).unwrap();
        assert_eq!(sell.orderHash, buy.orderHash);
        assert_eq!(sell.price, buy.price);
        assert_eq!(sell.quantity, buy.quantity);
    }

    #[test]
    fn trade_event_round_trips() {
        let event = order_matcher::Trade {
            buyOrderHash: B256::repeat_byte(0x11),
            sellOrderHash: B256::repeat_byte(0x22),
            volume: U256::from(42u64),
            timestamp: U256::from(1_700_000_000u64),
        };
        let primitive = alloy_primitives::Log {
            address: Address::repeat_byte(0x0c),
            data: event.encode_log_data(),
        };
        let decoded = order_matcher::Trade::decode_log(&primitive).unwrap();
        assert_eq!(decoded.buyOrderHash, event.buyOrderHash);
        assert_eq!(decoded.sellOrderHash, event.sellOrderHash);
        assert_eq!(decoded.volume, event.volume);
    }
}
