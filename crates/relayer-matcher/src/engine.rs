use alloy_primitives::B256;
use async_trait::async_trait;
use relayer_core::types::Order;
use relayer_core::Result;
use relayer_db::models::{addr_hex, DbOrder};
use relayer_db::repositories::OrderRepository;
use relayer_redis::ExhaustionCache;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

/// Submits a signed match transaction to the order matcher contract.
#[async_trait]
pub trait MatchSubmitter: Send + Sync {
    /// Broadcast matchOrders(buy, sell) and return the transaction hash.
    /// The receipt is not awaited.
    async fn submit_match(&self, buy_order_hash: B256, sell_order_hash: B256) -> Result<B256>;
}

/// Exhaustion-flag store. Flags are hints: a read failure means "not set"
/// and a write failure is logged and dropped.
#[async_trait]
pub trait ExhaustionFlags: Send + Sync {
    async fn is_exhausted(&self, order_hash: &B256) -> bool;
    async fn mark_exhausted(&self, order_hash: &B256);
}

#[async_trait]
impl ExhaustionFlags for ExhaustionCache {
    async fn is_exhausted(&self, order_hash: &B256) -> bool {
        match ExhaustionCache::is_exhausted(self, order_hash).await {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, order_hash = %order_hash, "Exhaustion flag read failed, assuming unset");
                false
            }
        }
    }

    async fn mark_exhausted(&self, order_hash: &B256) {
        if let Err(e) = ExhaustionCache::mark_exhausted(self, order_hash).await {
            warn!(error = %e, order_hash = %order_hash, "Exhaustion flag write failed");
        }
    }
}

/// Best-effort order matcher.
///
/// Runs inline on the exchange-network dispatch task whenever a new order
/// lands. Candidate enumeration and submission are serial; resulting state
/// (filled volume, trades) is reconciled later from the authoritative
/// Trade / OrderFilledVolumeUpdate events.
pub struct MatchingEngine {
    db: PgPool,
    submitter: Arc<dyn MatchSubmitter>,
    flags: Arc<dyn ExhaustionFlags>,
}

impl MatchingEngine {
    pub fn new(
        db: PgPool,
        submitter: Arc<dyn MatchSubmitter>,
        flags: Arc<dyn ExhaustionFlags>,
    ) -> Self {
        Self {
            db,
            submitter,
            flags,
        }
    }

    /// Try to match a freshly placed order against open counter-orders.
    ///
    /// Matching never fails the calling event handler: lookup errors are
    /// logged and the order is simply left for other matchers.
    pub async fn try_match(&self, order: &Order) {
        let rows = match OrderRepository::matching_candidates(
            &self.db,
            &addr_hex(&order.token),
            &addr_hex(&order.base),
            order.is_bid,
            &order.price.to_string(),
        )
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, order_hash = %order.hash, "Matching candidate lookup failed");
                return;
            }
        };

        let candidates: Vec<Order> = match rows
            .into_iter()
            .map(DbOrder::try_into_order)
            .collect::<std::result::Result<_, _>>()
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, order_hash = %order.hash, "Matching candidate row was undecodable");
                return;
            }
        };

        self.match_candidates(order, candidates).await;
    }

    /// Walk the candidate list best-price-first, submitting one match per
    /// candidate, until the new order has been fully consumed.
    async fn match_candidates(&self, order: &Order, candidates: Vec<Order>) {
        // Working counter only; the stored volume is advanced exclusively by
        // OrderFilledVolumeUpdate events.
        let mut volume_of_order = order.volume;

        for candidate in candidates {
            if self.flags.is_exhausted(&candidate.hash).await {
                continue;
            }

            let (buy_order_hash, sell_order_hash) = if order.is_bid {
                (order.hash, candidate.hash)
            } else {
                (candidate.hash, order.hash)
            };

            match self
                .submitter
                .submit_match(buy_order_hash, sell_order_hash)
                .await
            {
                Ok(tx_hash) => {
                    info!(
                        tx_hash = %tx_hash,
                        buy = %buy_order_hash,
                        sell = %sell_order_hash,
                        "Match transaction submitted"
                    );
                    if order.volume >= candidate.volume_left() {
                        self.flags.mark_exhausted(&candidate.hash).await;
                        volume_of_order = volume_of_order.saturating_sub(candidate.volume_left());
                    } else {
                        self.flags.mark_exhausted(&order.hash).await;
                        info!(order_hash = %order.hash, "ORDER_FILLED");
                        return;
                    }
                }
                Err(e) => {
                    // Another matcher may have consumed the candidate first;
                    // the authoritative fill events will reconcile.
                    warn!(
                        error = %e,
                        candidate = %candidate.hash,
                        "Match submission failed, trying next candidate"
                    );
                }
            }
        }

        info!(
            order_hash = %order.hash,
            volume_left = %volume_of_order,
            "ORDER_NOT_FULFILLED"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use relayer_core::RelayerError;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct RecordingSubmitter {
        calls: Mutex<Vec<(B256, B256)>>,
        fail_for: Option<B256>,
    }

    impl RecordingSubmitter {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_for: None,
            }
        }

        fn failing_for(candidate: B256) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_for: Some(candidate),
            }
        }

        fn calls(&self) -> Vec<(B256, B256)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MatchSubmitter for RecordingSubmitter {
        async fn submit_match(&self, buy: B256, sell: B256) -> Result<B256> {
            self.calls.lock().unwrap().push((buy, sell));
            if self.fail_for == Some(buy) || self.fail_for == Some(sell) {
                return Err(RelayerError::Submission("execution reverted".to_string()));
            }
            Ok(B256::repeat_byte(0xfe))
        }
    }

    #[derive(Default)]
    struct MemoryFlags {
        set: Mutex<HashSet<B256>>,
    }

    impl MemoryFlags {
        fn preset(hashes: &[B256]) -> Self {
            Self {
                set: Mutex::new(hashes.iter().copied().collect()),
            }
        }

        fn contains(&self, hash: &B256) -> bool {
            self.set.lock().unwrap().contains(hash)
        }
    }

    #[async_trait]
    impl ExhaustionFlags for MemoryFlags {
        async fn is_exhausted(&self, order_hash: &B256) -> bool {
            self.set.lock().unwrap().contains(order_hash)
        }

        async fn mark_exhausted(&self, order_hash: &B256) {
            self.set.lock().unwrap().insert(*order_hash);
        }
    }

    fn engine(
        submitter: Arc<RecordingSubmitter>,
        flags: Arc<MemoryFlags>,
    ) -> MatchingEngine {
        // The pool is never dereferenced by match_candidates.
        let db = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        MatchingEngine::new(db, submitter, flags)
    }

    fn order(hash: u8, is_bid: bool, volume: u64) -> Order {
        Order {
            hash: B256::repeat_byte(hash),
            token: Address::repeat_byte(0x01),
            base: Address::repeat_byte(0x02),
            price: U256::from(1u64),
            quantity: U256::from(volume),
            is_bid,
            created_by: Address::repeat_byte(0x03),
            created_at: 100,
            volume: U256::from(volume),
            volume_filled: U256::ZERO,
            is_open: true,
        }
    }

    #[tokio::test]
    async fn bid_larger_than_candidate_exhausts_the_candidate() {
        let submitter = Arc::new(RecordingSubmitter::new());
        let flags = Arc::new(MemoryFlags::default());
        let engine = engine(submitter.clone(), flags.clone());

        let bid = order(0xaa, true, 10);
        let ask = order(0xbb, false, 4);
        engine.match_candidates(&bid, vec![ask.clone()]).await;

        assert_eq!(submitter.calls(), vec![(bid.hash, ask.hash)]);
        assert!(flags.contains(&ask.hash));
        assert!(!flags.contains(&bid.hash));
    }

    #[tokio::test]
    async fn bid_smaller_than_candidate_exhausts_the_new_order() {
        let submitter = Arc::new(RecordingSubmitter::new());
        let flags = Arc::new(MemoryFlags::default());
        let engine = engine(submitter.clone(), flags.clone());

        let bid = order(0xaa, true, 3);
        let ask = order(0xbb, false, 4);
        let untouched = order(0xcc, false, 9);
        engine
            .match_candidates(&bid, vec![ask.clone(), untouched.clone()])
            .await;

        // Fully consumed by the first candidate; the loop must stop.
        assert_eq!(submitter.calls(), vec![(bid.hash, ask.hash)]);
        assert!(flags.contains(&bid.hash));
        assert!(!flags.contains(&ask.hash));
        assert!(!flags.contains(&untouched.hash));
    }

    #[tokio::test]
    async fn exhausted_candidates_are_skipped() {
        let submitter = Arc::new(RecordingSubmitter::new());
        let stale = order(0xbb, false, 4);
        let live = order(0xcc, false, 4);
        let flags = Arc::new(MemoryFlags::preset(&[stale.hash]));
        let engine = engine(submitter.clone(), flags.clone());

        let bid = order(0xaa, true, 10);
        engine
            .match_candidates(&bid, vec![stale.clone(), live.clone()])
            .await;

        assert_eq!(submitter.calls(), vec![(bid.hash, live.hash)]);
    }

    #[tokio::test]
    async fn submission_failure_moves_to_the_next_candidate() {
        let contested = order(0xbb, false, 4);
        let fallback = order(0xcc, false, 4);
        let submitter = Arc::new(RecordingSubmitter::failing_for(contested.hash));
        let flags = Arc::new(MemoryFlags::default());
        let engine = engine(submitter.clone(), flags.clone());

        let bid = order(0xaa, true, 10);
        engine
            .match_candidates(&bid, vec![contested.clone(), fallback.clone()])
            .await;

        assert_eq!(
            submitter.calls(),
            vec![(bid.hash, contested.hash), (bid.hash, fallback.hash)]
        );
        // A failed submission must not flag anything.
        assert!(!flags.contains(&contested.hash));
        assert!(flags.contains(&fallback.hash));
    }

    #[tokio::test]
    async fn ask_side_swaps_the_hash_order() {
        let submitter = Arc::new(RecordingSubmitter::new());
        let flags = Arc::new(MemoryFlags::default());
        let engine = engine(submitter.clone(), flags.clone());

        let ask = order(0xaa, false, 10);
        let bid = order(0xbb, true, 4);
        engine.match_candidates(&ask, vec![bid.clone()]).await;

        assert_eq!(submitter.calls(), vec![(bid.hash, ask.hash)]);
    }
}
