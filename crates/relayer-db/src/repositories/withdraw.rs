use crate::models::{DbWithdrawMeta, DbWithdrawSign};
use crate::Result;
use sqlx::PgPool;

pub struct WithdrawalRepository;

impl WithdrawalRepository {
    /// Open a withdrawal record at REQUESTED. Re-delivery is a no-op and
    /// never resets an advanced status.
    pub async fn insert_requested(pool: &PgPool, meta: &DbWithdrawMeta) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO withdrawals (tx_hash, recipient, token, amount, status)
            VALUES ($1, $2, $3, $4::numeric, $5)
            ON CONFLICT (tx_hash) DO NOTHING
            "#,
        )
        .bind(&meta.tx_hash)
        .bind(&meta.recipient)
        .bind(&meta.token)
        .bind(&meta.amount)
        .bind(&meta.status)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Get a withdrawal record by the exchange-network transaction hash
    pub async fn get(pool: &PgPool, tx_hash: &str) -> Result<Option<DbWithdrawMeta>> {
        let result = sqlx::query_as::<_, DbWithdrawMeta>(
            "SELECT tx_hash, recipient, token, amount::text AS amount, status \
             FROM withdrawals WHERE tx_hash = $1",
        )
        .bind(tx_hash)
        .fetch_optional(pool)
        .await?;
        Ok(result)
    }

    /// Overwrite the lifecycle status. Callers guard monotonicity.
    pub async fn update_status(pool: &PgPool, tx_hash: &str, status: &str) -> Result<()> {
        sqlx::query("UPDATE withdrawals SET status = $2 WHERE tx_hash = $1")
            .bind(tx_hash)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Append one authority signature. Re-delivery is a no-op.
    pub async fn insert_sign(pool: &PgPool, sign: &DbWithdrawSign) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO withdraw_signs (tx_hash, message, signature, signer, signed_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (tx_hash, signer) DO NOTHING
            "#,
        )
        .bind(&sign.tx_hash)
        .bind(&sign.message)
        .bind(&sign.signature)
        .bind(&sign.signer)
        .bind(sign.signed_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}
