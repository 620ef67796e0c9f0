use crate::models::DbWallet;
use crate::Result;
use sqlx::PgPool;

pub struct WalletRepository;

impl WalletRepository {
    /// Insert or update the wallet row for (token, owner) (upsert)
    pub async fn upsert(pool: &PgPool, wallet: &DbWallet) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO wallets (token, owner, balance, escrow_balance)
            VALUES ($1, $2, $3::numeric, $4::numeric)
            ON CONFLICT (token, owner) DO UPDATE SET
                balance = EXCLUDED.balance,
                escrow_balance = EXCLUDED.escrow_balance
            "#,
        )
        .bind(&wallet.token)
        .bind(&wallet.owner)
        .bind(&wallet.balance)
        .bind(&wallet.escrow_balance)
        .execute(pool)
        .await?;
        Ok(())
    }
}
