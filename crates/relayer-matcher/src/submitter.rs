use crate::engine::MatchSubmitter;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use relayer_core::{RelayerError, Result};
use tracing::debug;

sol! {
    #[sol(rpc)]
    contract OrderMatcher {
        function matchOrders(bytes32 buyOrderHash, bytes32 sellOrderHash) external;
    }
}

/// Gas limit for a match transaction.
const MATCH_GAS_LIMIT: u64 = 500_000;

/// Sends matchOrders transactions from the relayer's matcher account.
///
/// The exchange network is a gas-free sidechain, so the gas price is pinned
/// to zero. Receipts are never awaited: the resulting Trade and
/// OrderFilledVolumeUpdate events are the source of truth.
pub struct ChainSubmitter {
    provider: DynProvider,
    contract_address: Address,
    matcher_address: Address,
}

impl ChainSubmitter {
    /// Connect to the exchange RPC endpoint with the matcher account wallet.
    pub async fn connect(
        rpc_url: &str,
        contract_address: Address,
        signer: PrivateKeySigner,
    ) -> Result<Self> {
        let matcher_address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect(rpc_url)
            .await
            .map_err(|e| RelayerError::Rpc(format!("exchange RPC connect: {e}")))?
            .erased();

        Ok(Self {
            provider,
            contract_address,
            matcher_address,
        })
    }

    pub fn matcher_address(&self) -> Address {
        self.matcher_address
    }
}

#[async_trait]
impl MatchSubmitter for ChainSubmitter {
    async fn submit_match(&self, buy_order_hash: B256, sell_order_hash: B256) -> Result<B256> {
        let nonce = self
            .provider
            .get_transaction_count(self.matcher_address)
            .pending()
            .await
            .map_err(|e| RelayerError::Submission(format!("pending nonce: {e}")))?;

        let contract = OrderMatcher::new(self.contract_address, self.provider.clone());
        let pending = contract
            .matchOrders(buy_order_hash, sell_order_hash)
            .nonce(nonce)
            .gas(MATCH_GAS_LIMIT)
            .gas_price(0)
            .value(U256::ZERO)
            .send()
            .await
            .map_err(|e| RelayerError::Submission(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        debug!(tx_hash = %tx_hash, nonce, "matchOrders broadcast");
        Ok(tx_hash)
    }
}
