use alloy::rpc::types::Log;
use alloy_sol_types::SolEvent;
use relayer_core::events::order_matcher;
use relayer_core::{RelayerError, Result};
use relayer_db::models::hash_hex;
use relayer_db::repositories::OrderRepository;
use relayer_redis::{channels, messages::OrderMessage, MessageType, Publisher};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

/// Applies authoritative cumulative fills from OrderFilledVolumeUpdate.
pub struct OrderFilledHandler {
    db: PgPool,
    publisher: Arc<Publisher>,
}

impl OrderFilledHandler {
    pub fn new(db: PgPool, publisher: Arc<Publisher>) -> Self {
        Self { db, publisher }
    }

    pub async fn handle(&self, log: &Log) -> Result<()> {
        let event = order_matcher::OrderFilledVolumeUpdate::decode_log(&log.inner)
            .map_err(|e| RelayerError::EventDecode(e.to_string()))?;

        let hash = hash_hex(&event.orderHash);
        OrderRepository::set_filled_volume(&self.db, &hash, &event.volume.to_string()).await?;

        let order = OrderRepository::get_by_hash(&self.db, &hash)
            .await?
            .ok_or(RelayerError::OrderNotFound(event.orderHash))?
            .try_into_order()?;

        let channel = channels::pair_channel(&order.token, &order.base);
        if let Err(e) = self
            .publisher
            .publish(&channel, MessageType::OrderFill, &OrderMessage::from(&order))
            .await
        {
            warn!(error = %e, channel, "Failed to publish ORDER_FILL");
        }

        info!(
            order_hash = %event.orderHash,
            volume_filled = %event.volume,
            is_open = order.is_open,
            "Order filled volume updated"
        );
        Ok(())
    }
}
