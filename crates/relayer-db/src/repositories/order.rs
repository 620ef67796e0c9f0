use crate::models::DbOrder;
use crate::Result;
use sqlx::PgPool;

/// Column list with NUMERIC columns cast back to text for DbOrder decoding.
const ORDER_COLUMNS: &str = "hash, token, base, price::text AS price, \
     quantity::text AS quantity, is_bid, created_by, created_at, \
     volume::text AS volume, volume_filled::text AS volume_filled, is_open";

pub struct OrderRepository;

impl OrderRepository {
    /// Insert a freshly placed order. Re-delivery of the same order hash is
    /// a no-op; it must not reset filled volume or reopen a closed order.
    pub async fn insert(pool: &PgPool, order: &DbOrder) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (hash, token, base, price, quantity, is_bid,
                                created_by, created_at, volume, volume_filled, is_open)
            VALUES ($1, $2, $3, $4::numeric, $5::numeric, $6, $7, $8,
                    $9::numeric, $10::numeric, $11)
            ON CONFLICT (hash) DO NOTHING
            "#,
        )
        .bind(&order.hash)
        .bind(&order.token)
        .bind(&order.base)
        .bind(&order.price)
        .bind(&order.quantity)
        .bind(order.is_bid)
        .bind(&order.created_by)
        .bind(order.created_at)
        .bind(&order.volume)
        .bind(&order.volume_filled)
        .bind(order.is_open)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Get an order by its hash
    pub async fn get_by_hash(pool: &PgPool, hash: &str) -> Result<Option<DbOrder>> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE hash = $1");
        let result = sqlx::query_as::<_, DbOrder>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await?;
        Ok(result)
    }

    /// Record the authoritative cumulative filled volume. The order closes in
    /// the same statement once the fill reaches the full volume.
    pub async fn set_filled_volume(pool: &PgPool, hash: &str, volume_filled: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE orders
            SET volume_filled = $2::numeric,
                is_open = (is_open AND $2::numeric < volume)
            WHERE hash = $1
            "#,
        )
        .bind(hash)
        .bind(volume_filled)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Close an order (cancelled or fully consumed). Idempotent.
    pub async fn close(pool: &PgPool, hash: &str) -> Result<()> {
        sqlx::query("UPDATE orders SET is_open = FALSE WHERE hash = $1")
            .bind(hash)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Open counter-orders on the same pair whose price crosses the given
    /// order, best price first and oldest first at equal price.
    pub async fn matching_candidates(
        pool: &PgPool,
        token: &str,
        base: &str,
        is_bid: bool,
        price: &str,
    ) -> Result<Vec<DbOrder>> {
        // A bid crosses asks priced at or below it; an ask crosses bids
        // priced at or above it.
        let (price_cmp, order_by) = if is_bid {
            ("<=", "price ASC")
        } else {
            (">=", "price DESC")
        };
        let query = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE token = $1 AND base = $2 AND is_bid = $3 AND is_open = TRUE \
               AND price {price_cmp} $4::numeric \
             ORDER BY {order_by}, created_at ASC",
        );
        let results = sqlx::query_as::<_, DbOrder>(&query)
            .bind(token)
            .bind(base)
            .bind(!is_bid)
            .bind(price)
            .fetch_all(pool)
            .await?;
        Ok(results)
    }
}
