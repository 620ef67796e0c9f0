use alloy::rpc::types::Log;
use alloy_sol_types::SolEvent;
use relayer_core::events::order_book;
use relayer_core::{RelayerError, Result};
use relayer_db::models::hash_hex;
use relayer_db::repositories::OrderRepository;
use relayer_redis::{channels, messages::OrderMessage, MessageType, Publisher};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

/// Closes an order on CancelOrder and announces the closure.
pub struct OrderCancelledHandler {
    db: PgPool,
    publisher: Arc<Publisher>,
}

impl OrderCancelledHandler {
    pub fn new(db: PgPool, publisher: Arc<Publisher>) -> Self {
        Self { db, publisher }
    }

    pub async fn handle(&self, log: &Log) -> Result<()> {
        let event = order_book::CancelOrder::decode_log(&log.inner)
            .map_err(|e| RelayerError::EventDecode(e.to_string()))?;

        let hash = hash_hex(&event.orderHash);
        OrderRepository::close(&self.db, &hash).await?;

        // Reload so the published snapshot carries the closed state.
        let Some(row) = OrderRepository::get_by_hash(&self.db, &hash).await? else {
            warn!(order_hash = %event.orderHash, "Cancel received for unknown order");
            return Ok(());
        };
        let order = row.try_into_order()?;

        let channel = channels::pair_channel(&order.token, &order.base);
        if let Err(e) = self
            .publisher
            .publish(
                &channel,
                MessageType::CancelOrder,
                &OrderMessage::from(&order),
            )
            .await
        {
            warn!(error = %e, channel, "Failed to publish CANCEL_ORDER");
        }

        info!(order_hash = %event.orderHash, "Order cancelled");
        Ok(())
    }
}
