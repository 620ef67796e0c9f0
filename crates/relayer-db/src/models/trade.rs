use super::{addr_hex, hash_hex};
use relayer_core::types::Trade;
use sqlx::FromRow;

/// Database model for the trades table. Rows are immutable once inserted.
#[derive(Debug, Clone, FromRow)]
pub struct DbTrade {
    pub buy_order_hash: String,
    pub sell_order_hash: String,
    pub volume: String,
    pub traded_at: i64,
    pub tx_hash: String,
    pub token: String,
    pub base: String,
    pub price: String,
}

impl From<&Trade> for DbTrade {
    fn from(trade: &Trade) -> Self {
        Self {
            buy_order_hash: hash_hex(&trade.buy_order_hash),
            sell_order_hash: hash_hex(&trade.sell_order_hash),
            volume: trade.volume.to_string(),
            traded_at: trade.traded_at as i64,
            tx_hash: hash_hex(&trade.tx_hash),
            token: addr_hex(&trade.token),
            base: addr_hex(&trade.base),
            price: trade.price.to_string(),
        }
    }
}
