use alloy::rpc::types::Log;
use alloy_primitives::U256;
use alloy_sol_types::SolEvent;
use relayer_core::events::order_book;
use relayer_core::types::Order;
use relayer_core::{RelayerError, Result};
use relayer_db::models::DbOrder;
use relayer_db::repositories::OrderRepository;
use relayer_matcher::MatchingEngine;
use relayer_redis::{channels, messages::OrderMessage, MessageType, Publisher};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

/// Handles PlaceBuyOrder / PlaceSellOrder: persist, announce, then hand the
/// order to the matching engine on this same task.
pub struct OrderPlacedHandler {
    db: PgPool,
    publisher: Arc<Publisher>,
    matcher: Arc<MatchingEngine>,
}

impl OrderPlacedHandler {
    pub fn new(db: PgPool, publisher: Arc<Publisher>, matcher: Arc<MatchingEngine>) -> Self {
        Self {
            db,
            publisher,
            matcher,
        }
    }

    pub async fn handle(&self, log: &Log, is_bid: bool) -> Result<()> {
        // Both place events share one payload layout; only topic0 differs.
        let (order_hash, token, base, price, quantity, owner, timestamp) = if is_bid {
            let event = order_book::PlaceBuyOrder::decode_log(&log.inner)
                .map_err(|e| RelayerError::EventDecode(e.to_string()))?;
            (
                event.orderHash,
                event.token,
                event.base,
                event.price,
                event.quantity,
                event.owner,
                event.timestamp,
            )
        } else {
            let event = order_book::PlaceSellOrder::decode_log(&log.inner)
                .map_err(|e| RelayerError::EventDecode(e.to_string()))?;
            (
                event.orderHash,
                event.token,
                event.base,
                event.price,
                event.quantity,
                event.owner,
                event.timestamp,
            )
        };

        let order = Order {
            hash: order_hash,
            token,
            base,
            price,
            quantity,
            is_bid,
            created_by: owner,
            created_at: timestamp.to::<u64>(),
            volume: price.saturating_mul(quantity),
            volume_filled: U256::ZERO,
            is_open: true,
        };

        OrderRepository::insert(&self.db, &DbOrder::from(&order)).await?;

        let channel = channels::pair_channel(&order.token, &order.base);
        if let Err(e) = self
            .publisher
            .publish(&channel, MessageType::NewOrder, &OrderMessage::from(&order))
            .await
        {
            warn!(error = %e, channel, "Failed to publish NEW_ORDER");
        }

        info!(
            order_hash = %order.hash,
            pair = %channel,
            is_bid,
            volume = %order.volume,
            "Order placed"
        );

        self.matcher.try_match(&order).await;
        Ok(())
    }
}
