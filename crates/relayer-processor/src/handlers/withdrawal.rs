use alloy::rpc::types::Log;
use alloy_primitives::{hex, B256};
use alloy_sol_types::SolEvent;
use relayer_core::events::{bridge, exchange};
use relayer_core::types::{WithdrawMeta, WithdrawSign, WithdrawStatus, WithdrawalMessage};
use relayer_core::{RelayerError, Result};
use relayer_db::models::{hash_hex, DbWithdrawMeta, DbWithdrawSign};
use relayer_db::repositories::WithdrawalRepository;
use sqlx::PgPool;
use tracing::{debug, error, info};

/// Drives withdrawal records across REQUESTED -> SIGNED -> PROCESSED.
///
/// Records are created only from exchange-network Withdraw events. An
/// advancement for an unknown tx hash means a withdrawal is moving on the
/// bridge without a matching exchange-side request, which is treated as an
/// attack indicator rather than event reordering.
pub struct WithdrawalHandler {
    db: PgPool,
}

impl WithdrawalHandler {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Exchange Withdraw: open a record at REQUESTED, keyed by the log's
    /// transaction hash.
    pub async fn handle_requested(&self, log: &Log) -> Result<()> {
        let event = exchange::Withdraw::decode_log(&log.inner)
            .map_err(|e| RelayerError::EventDecode(e.to_string()))?;

        let meta = WithdrawMeta {
            tx_hash: log.transaction_hash.unwrap_or_default(),
            recipient: event.recipient,
            token: event.token,
            amount: event.value,
            status: WithdrawStatus::Requested,
        };
        WithdrawalRepository::insert_requested(&self.db, &DbWithdrawMeta::from(&meta)).await?;

        info!(
            tx_hash = %meta.tx_hash,
            recipient = %event.recipient,
            token = %event.token,
            amount = %event.value,
            "Withdraw requested"
        );
        Ok(())
    }

    /// WithdrawSignatureSubmitted: append the authority signature. The
    /// lifecycle status is untouched.
    pub async fn handle_signature(&self, log: &Log) -> Result<()> {
        let event = exchange::WithdrawSignatureSubmitted::decode_log(&log.inner)
            .map_err(|e| RelayerError::EventDecode(e.to_string()))?;

        let message = WithdrawalMessage::parse(&event.message)?;
        let sign = WithdrawSign {
            tx_hash: message.tx_hash,
            message: hex::encode(&event.message),
            signature: hex::encode(&event.signature),
            signer: event.authority,
            signed_at: event.timestamp.to::<u64>(),
        };
        WithdrawalRepository::insert_sign(&self.db, &DbWithdrawSign::from(&sign)).await?;

        info!(
            tx_hash = %message.tx_hash,
            signer = %event.authority,
            "Withdraw signature recorded"
        );
        Ok(())
    }

    /// ReadyToWithdraw: advance to SIGNED.
    pub async fn handle_ready(&self, log: &Log) -> Result<()> {
        let event = exchange::ReadyToWithdraw::decode_log(&log.inner)
            .map_err(|e| RelayerError::EventDecode(e.to_string()))?;

        let message = WithdrawalMessage::parse(&event.message)?;
        self.advance(message.tx_hash, WithdrawStatus::Signed).await
    }

    /// Bridge Withdraw: the payout settled on the home network, advance to
    /// PROCESSED.
    pub async fn handle_processed(&self, log: &Log) -> Result<()> {
        let event = bridge::Withdraw::decode_log(&log.inner)
            .map_err(|e| RelayerError::EventDecode(e.to_string()))?;

        self.advance(event.transactionHash, WithdrawStatus::Processed)
            .await
    }

    async fn advance(&self, tx_hash: B256, next: WithdrawStatus) -> Result<()> {
        let Some(row) = WithdrawalRepository::get(&self.db, &hash_hex(&tx_hash)).await? else {
            error!(
                tx_hash = %tx_hash,
                attempted = next.as_str(),
                "HIGH ALERT: withdrawal advancement without a matching exchange-side request"
            );
            return Err(RelayerError::UnauthorizedWithdrawal(tx_hash));
        };
        let meta = row.try_into_meta()?;

        if !meta.status.can_advance_to(next) {
            debug!(
                tx_hash = %tx_hash,
                current = meta.status.as_str(),
                attempted = next.as_str(),
                "Ignoring non-forward withdrawal transition"
            );
            return Ok(());
        }

        WithdrawalRepository::update_status(&self.db, &hash_hex(&tx_hash), next.as_str()).await?;

        info!(tx_hash = %tx_hash, status = next.as_str(), "Withdrawal advanced");
        Ok(())
    }
}
