use relayer_core::types::{Order, Trade};
use serde::{Deserialize, Serialize};

/// Kinds of market events fanned out on the pair channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    NewOrder,
    CancelOrder,
    Trade,
    OrderFill,
}

/// Envelope published on a pair channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMessage {
    pub message_type: MessageType,
    pub message_content: serde_json::Value,
}

impl ChannelMessage {
    pub fn new(
        message_type: MessageType,
        payload: impl Serialize,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            message_type,
            message_content: serde_json::to_value(payload)?,
        })
    }
}

/// Order snapshot as published to subscribers. Big integers travel as
/// decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderMessage {
    pub hash: String,
    pub token: String,
    pub base: String,
    pub price: String,
    pub quantity: String,
    pub is_bid: bool,
    pub created_by: String,
    pub created_at: u64,
    pub volume: String,
    pub volume_filled: String,
    pub is_open: bool,
}

impl From<&Order> for OrderMessage {
    fn from(order: &Order) -> Self {
        Self {
            hash: format!("{:#x}", order.hash),
            token: format!("{:#x}", order.token),
            base: format!("{:#x}", order.base),
            price: order.price.to_string(),
            quantity: order.quantity.to_string(),
            is_bid: order.is_bid,
            created_by: format!("{:#x}", order.created_by),
            created_at: order.created_at,
            volume: order.volume.to_string(),
            volume_filled: order.volume_filled.to_string(),
            is_open: order.is_open,
        }
    }
}

/// Executed match as published to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeMessage {
    pub buy_order_hash: String,
    pub sell_order_hash: String,
    pub volume: String,
    pub traded_at: u64,
    pub tx_hash: String,
    pub token: String,
    pub base: String,
    pub price: String,
}

impl From<&Trade> for TradeMessage {
    fn from(trade: &Trade) -> Self {
        Self {
            buy_order_hash: format!("{:#x}", trade.buy_order_hash),
            sell_order_hash: format!("{:#x}", trade.sell_order_hash),
            volume: trade.volume.to_string(),
            traded_at: trade.traded_at,
            tx_hash: format!("{:#x}", trade.tx_hash),
            token: format!("{:#x}", trade.token),
            base: format!("{:#x}", trade.base),
            price: trade.price.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, U256};

    #[test]
    fn envelope_uses_the_wire_field_names() {
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
        let envelope =
            ChannelMessage::new(MessageType::NewOrder, OrderMessage::from(&order)).unwrap();
        let json: serde_json::Value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["messageType"], "NEW_ORDER");
        assert_eq!(json["messageContent"]["volume"], "6");
        assert_eq!(json["messageContent"]["is_open"], true);
    }

    #[test]
    fn message_types_serialize_screaming_snake() {
        for (message_type, expected) in [
            (MessageType::NewOrder, "\"NEW_ORDER\""),
            (MessageType::CancelOrder, "\"CANCEL_ORDER\""),
            (MessageType::Trade, "\"TRADE\""),
            (MessageType::OrderFill, "\"ORDER_FILL\""),
        ] {
            assert_eq!(serde_json::to_string(&message_type).unwrap(), expected);
        }
    }
}
