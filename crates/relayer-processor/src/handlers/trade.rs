use alloy::rpc::types::Log;
use alloy_sol_types::SolEvent;
use relayer_core::events::order_matcher;
use relayer_core::types::Trade;
use relayer_core::{RelayerError, Result};
use relayer_db::models::{hash_hex, DbTrade};
use relayer_db::repositories::{OrderRepository, TradeRepository};
use relayer_redis::{channels, messages::TradeMessage, MessageType, Publisher};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

/// Records executed matches from the on-chain matcher contract.
pub struct TradeHandler {
    db: PgPool,
    publisher: Arc<Publisher>,
}

impl TradeHandler {
    pub fn new(db: PgPool, publisher: Arc<Publisher>) -> Self {
        Self { db, publisher }
    }

    pub async fn handle(&self, log: &Log) -> Result<()> {
        let event = order_matcher::Trade::decode_log(&log.inner)
            .map_err(|e| RelayerError::EventDecode(e.to_string()))?;

        // Both sides share the pair; the sell order is loaded by convention
        // to inherit token, base and price.
        let sell = OrderRepository::get_by_hash(&self.db, &hash_hex(&event.sellOrderHash))
            .await?
            .ok_or(RelayerError::OrderNotFound(event.sellOrderHash))?
            .try_into_order()?;

        let trade = Trade {
            buy_order_hash: event.buyOrderHash,
            sell_order_hash: event.sellOrderHash,
            volume: event.volume,
            traded_at: event.timestamp.to::<u64>(),
            tx_hash: log.transaction_hash.unwrap_or_default(),
            token: sell.token,
            base: sell.base,
            price: sell.price,
        };
        TradeRepository::insert(&self.db, &DbTrade::from(&trade)).await?;

        let channel = channels::pair_channel(&trade.token, &trade.base);
        if let Err(e) = self
            .publisher
            .publish(&channel, MessageType::Trade, &TradeMessage::from(&trade))
            .await
        {
            warn!(error = %e, channel, "Failed to publish TRADE");
        }

        info!(
            buy = %event.buyOrderHash,
            sell = %event.sellOrderHash,
            volume = %event.volume,
            "Trade recorded"
        );
        Ok(())
    }
}
