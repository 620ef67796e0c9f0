use alloy::rpc::types::Log;
use alloy_sol_types::SolEvent;
use relayer_core::events::{bridge, exchange, order_book, order_matcher};
use relayer_core::Result;
use relayer_matcher::MatchingEngine;
use relayer_redis::Publisher;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{trace, warn};

use crate::handlers::{
    BalanceUpdateHandler, OrderCancelledHandler, OrderFilledHandler, OrderPlacedHandler,
    TradeHandler, WithdrawalHandler,
};

/// Routes raw subscription logs to their handlers by topic0.
///
/// Each handler receives only the collaborators it needs, so tests can stand
/// in alternative stores and buses. Errors returned from here are fatal to
/// the owning watcher; recoverable conditions (publish and match submission
/// failures) are absorbed inside the handlers.
pub struct EventProcessor {
    balance: BalanceUpdateHandler,
    order_placed: OrderPlacedHandler,
    order_cancelled: OrderCancelledHandler,
    trade: TradeHandler,
    order_filled: OrderFilledHandler,
    withdrawal: WithdrawalHandler,
}

impl EventProcessor {
    pub fn new(db: PgPool, publisher: Arc<Publisher>, matcher: Arc<MatchingEngine>) -> Self {
        Self {
            balance: BalanceUpdateHandler::new(db.clone()),
            order_placed: OrderPlacedHandler::new(db.clone(), publisher.clone(), matcher),
            order_cancelled: OrderCancelledHandler::new(db.clone(), publisher.clone()),
            trade: TradeHandler::new(db.clone(), publisher.clone()),
            order_filled: OrderFilledHandler::new(db.clone(), publisher),
            withdrawal: WithdrawalHandler::new(db),
        }
    }

    /// Dispatch a log delivered by the exchange-network subscription.
    pub async fn process_exchange_log(&self, log: &Log) -> Result<()> {
        let Some(topic0) = log.topics().first().copied() else {
            trace!("Skipping log without topic0");
            return Ok(());
        };

        match topic0 {
            t if t == exchange::BalanceUpdate::SIGNATURE_HASH => self.balance.handle(log).await,
            t if t == order_book::PlaceBuyOrder::SIGNATURE_HASH => {
                self.order_placed.handle(log, true).await
            }
            t if t == order_book::PlaceSellOrder::SIGNATURE_HASH => {
                self.order_placed.handle(log, false).await
            }
            t if t == order_book::CancelOrder::SIGNATURE_HASH => {
                self.order_cancelled.handle(log).await
            }
            t if t == order_matcher::Trade::SIGNATURE_HASH => self.trade.handle(log).await,
            t if t == order_matcher::OrderFilledVolumeUpdate::SIGNATURE_HASH => {
                self.order_filled.handle(log).await
            }
            t if t == exchange::WithdrawSignatureSubmitted::SIGNATURE_HASH => {
                self.withdrawal.handle_signature(log).await
            }
            t if t == exchange::ReadyToWithdraw::SIGNATURE_HASH => {
                self.withdrawal.handle_ready(log).await
            }
            t if t == exchange::Withdraw::SIGNATURE_HASH => {
                self.withdrawal.handle_requested(log).await
            }
            _ => {
                warn!(topic0 = ?topic0, "Unknown exchange event signature, dropping log");
                Ok(())
            }
        }
    }

    /// Dispatch a log delivered by the bridge-network subscription.
    pub async fn process_bridge_log(&self, log: &Log) -> Result<()> {
        let Some(topic0) = log.topics().first().copied() else {
            trace!("Skipping log without topic0");
            return Ok(());
        };

        match topic0 {
            t if t == bridge::Withdraw::SIGNATURE_HASH => {
                self.withdrawal.handle_processed(log).await
            }
            _ => {
                warn!(topic0 = ?topic0, "Unknown bridge event signature, dropping log");
                Ok(())
            }
        }
    }
}
