use alloy::rpc::types::Log;
use alloy_sol_types::SolEvent;
use relayer_core::events::exchange;
use relayer_core::types::Wallet;
use relayer_core::{RelayerError, Result};
use relayer_db::models::DbWallet;
use relayer_db::repositories::WalletRepository;
use sqlx::PgPool;
use tracing::info;

/// Mirrors exchange BalanceUpdate events into the wallets table.
pub struct BalanceUpdateHandler {
    db: PgPool,
}

impl BalanceUpdateHandler {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn handle(&self, log: &Log) -> Result<()> {
        let event = exchange::BalanceUpdate::decode_log(&log.inner)
            .map_err(|e| RelayerError::EventDecode(e.to_string()))?;

        let wallet = Wallet {
            token: event.token,
            owner: event.user,
            balance: event.balance,
            escrow_balance: event.escrow,
        };
        WalletRepository::upsert(&self.db, &DbWallet::from(&wallet)).await?;

        info!(
            token = %event.token,
            owner = %event.user,
            balance = %event.balance,
            escrow = %event.escrow,
            "Wallet balance updated"
        );
        Ok(())
    }
}
