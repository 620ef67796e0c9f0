use crate::filter::SubscriptionFilter;
use crate::subscription::{LogSubscription, LOG_CHANNEL_CAPACITY};
use alloy::rpc::types::Log;
use relayer_core::{RelayerConfig, RelayerError, Result};
use relayer_processor::EventProcessor;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Which chain a watcher is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Bridge,
    Exchange,
}

impl Network {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Bridge => "bridge",
            Self::Exchange => "exchange",
        }
    }
}

/// Per-chain watcher: one log subscription feeding one strictly serial
/// dispatch loop. Entity updates stay linearizable without locking because
/// nothing is processed concurrently within a chain.
pub struct ChainWatcher {
    network: Network,
    ws_url: String,
    filter: SubscriptionFilter,
    processor: Arc<EventProcessor>,
}

impl ChainWatcher {
    pub fn exchange(config: &RelayerConfig, processor: Arc<EventProcessor>) -> Self {
        Self {
            network: Network::Exchange,
            ws_url: config.networks.exchange.ws_url.clone(),
            filter: SubscriptionFilter::exchange(&config.contracts),
            processor,
        }
    }

    pub fn bridge(config: &RelayerConfig, processor: Arc<EventProcessor>) -> Self {
        Self {
            network: Network::Bridge,
            ws_url: config.networks.bridge.ws_url.clone(),
            filter: SubscriptionFilter::bridge(&config.contracts),
            processor,
        }
    }

    /// Run until a fatal error. This never returns Ok: a healthy watcher
    /// relays forever, and the process must not continue half-deaf.
    pub async fn run(self) -> Result<()> {
        info!(network = self.network.as_str(), "Starting chain watcher");

        let (tx, mut rx) = mpsc::channel::<Log>(LOG_CHANNEL_CAPACITY);
        let subscription =
            LogSubscription::new(self.network.as_str(), self.ws_url.clone(), self.filter.clone());
        let subscription_task = tokio::spawn(subscription.run(tx));

        // Serial dispatch; handler errors are fatal.
        let dispatch_result: Result<()> = async {
            while let Some(log) = rx.recv().await {
                match self.network {
                    Network::Exchange => self.processor.process_exchange_log(&log).await?,
                    Network::Bridge => self.processor.process_bridge_log(&log).await?,
                }
            }
            Ok(())
        }
        .await;

        if let Err(e) = dispatch_result {
            subscription_task.abort();
            return Err(e);
        }

        // The channel closed: the subscription ended and its error is the
        // root cause.
        match subscription_task.await {
            Ok(Err(e)) => Err(e),
            Ok(Ok(())) => Err(RelayerError::Subscription {
                network: self.network.as_str(),
                message: "subscription ended unexpectedly".to_string(),
            }),
            Err(e) => Err(RelayerError::Subscription {
                network: self.network.as_str(),
                message: format!("subscription task failed: {e}"),
            }),
        }
    }
}
