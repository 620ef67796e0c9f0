use alloy_primitives::{Address, B256};
use alloy_sol_types::SolEvent;
use relayer_core::config::ContractsConfig;
use relayer_core::events::{bridge, exchange, order_book, order_matcher};

/// Addresses and allowed topic0 set for one chain subscription.
#[derive(Debug, Clone)]
pub struct SubscriptionFilter {
    pub addresses: Vec<Address>,
    pub topics: Vec<B256>,
}

impl SubscriptionFilter {
    /// Exchange-network filter: exchange, orderbook and matcher contracts.
    pub fn exchange(contracts: &ContractsConfig) -> Self {
        Self {
            addresses: vec![
                contracts.exchange.address,
                contracts.orderbook.address,
                contracts.order_matcher.address,
            ],
            topics: vec![
                exchange::BalanceUpdate::SIGNATURE_HASH,
                order_book::PlaceBuyOrder::SIGNATURE_HASH,
                order_book::PlaceSellOrder::SIGNATURE_HASH,
                order_book::CancelOrder::SIGNATURE_HASH,
                order_matcher::Trade::SIGNATURE_HASH,
                order_matcher::OrderFilledVolumeUpdate::SIGNATURE_HASH,
                exchange::Withdraw::SIGNATURE_HASH,
                exchange::ReadyToWithdraw::SIGNATURE_HASH,
                exchange::WithdrawSignatureSubmitted::SIGNATURE_HASH,
            ],
        }
    }

    /// Bridge-network filter: only the bridge contract's Withdraw event.
    pub fn bridge(contracts: &ContractsConfig) -> Self {
        Self {
            addresses: vec![contracts.bridge.address],
            topics: vec![bridge::Withdraw::SIGNATURE_HASH],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contracts() -> ContractsConfig {
        serde_json::from_str(
            r#"{
                "bridge": { "address": "0x1111111111111111111111111111111111111111" },
                "exchange": { "address": "0x2222222222222222222222222222222222222222" },
                "orderbook": { "address": "0x3333333333333333333333333333333333333333" },
                "order_matcher": { "address": "0x4444444444444444444444444444444444444444" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn exchange_filter_covers_all_nine_event_kinds() {
        let filter = SubscriptionFilter::exchange(&contracts());
        assert_eq!(filter.addresses.len(), 3);
        assert_eq!(filter.topics.len(), 9);
    }

    #[test]
    fn bridge_filter_is_withdraw_only() {
        let filter = SubscriptionFilter::bridge(&contracts());
        assert_eq!(filter.addresses.len(), 1);
        assert_eq!(filter.topics, vec![bridge::Withdraw::SIGNATURE_HASH]);
        // The bridge Withdraw must not be confused with the exchange one.
        assert!(!SubscriptionFilter::exchange(&contracts())
            .topics
            .contains(&bridge::Withdraw::SIGNATURE_HASH));
    }
}
