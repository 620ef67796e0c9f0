use crate::models::DbTrade;
use crate::Result;
use sqlx::PgPool;

pub struct TradeRepository;

impl TradeRepository {
    /// Insert an executed trade. Trades are immutable; replaying the same
    /// log is a no-op.
    pub async fn insert(pool: &PgPool, trade: &DbTrade) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trades (buy_order_hash, sell_order_hash, volume, traded_at,
                                tx_hash, token, base, price)
            VALUES ($1, $2, $3::numeric, $4, $5, $6, $7, $8::numeric)
            ON CONFLICT (tx_hash, buy_order_hash, sell_order_hash) DO NOTHING
            "#,
        )
        .bind(&trade.buy_order_hash)
        .bind(&trade.sell_order_hash)
        .bind(&trade.volume)
        .bind(trade.traded_at)
        .bind(&trade.tx_hash)
        .bind(&trade.token)
        .bind(&trade.base)
        .bind(&trade.price)
        .execute(pool)
        .await?;
        Ok(())
    }
}
