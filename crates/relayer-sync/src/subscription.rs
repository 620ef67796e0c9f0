use crate::filter::SubscriptionFilter;
use alloy::rpc::types::Log;
use futures_util::{SinkExt, StreamExt};
use relayer_core::{RelayerError, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, trace};

/// Capacity of the per-subscription log channel.
///
/// Overflow is fatal: silently dropping a log would let the store diverge
/// from chain truth.
pub const LOG_CHANNEL_CAPACITY: usize = 10_000;

/// One eth_subscribe("logs") stream over WebSocket, forwarding raw logs into
/// a bounded channel for serial dispatch.
pub struct LogSubscription {
    network: &'static str,
    ws_url: String,
    filter: SubscriptionFilter,
}

impl LogSubscription {
    pub fn new(network: &'static str, ws_url: String, filter: SubscriptionFilter) -> Self {
        Self {
            network,
            ws_url,
            filter,
        }
    }

    fn error(&self, message: impl Into<String>) -> RelayerError {
        RelayerError::Subscription {
            network: self.network,
            message: message.into(),
        }
    }

    /// Connect, subscribe and forward logs until the stream fails.
    ///
    /// Returns only on error; there is no reconnection here. Losing the
    /// subscription is fatal for the whole process.
    pub async fn run(self, logs: mpsc::Sender<Log>) -> Result<()> {
        info!(network = self.network, url = %self.ws_url, "Connecting log subscription");

        let (ws_stream, _) = connect_async(self.ws_url.as_str())
            .await
            .map_err(|e| self.error(format!("connect: {e}")))?;
        let (mut write, mut read) = ws_stream.split();

        let subscribe_msg = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_subscribe",
            "params": ["logs", {
                "address": self.filter.addresses,
                "topics": [self.filter.topics],
            }],
            "id": 1
        });
        write
            .send(Message::Text(subscribe_msg.to_string().into()))
            .await
            .map_err(|e| self.error(format!("subscribe send: {e}")))?;

        let subscription_id = self.wait_for_subscription(&mut read).await?;
        info!(
            network = self.network,
            subscription_id = %subscription_id,
            addresses = self.filter.addresses.len(),
            topics = self.filter.topics.len(),
            "Log subscription established"
        );

        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let parsed: serde_json::Value = serde_json::from_str(&text)
                        .map_err(|e| self.error(format!("JSON parse: {e}")))?;

                    if parsed.get("method") != Some(&serde_json::json!("eth_subscription")) {
                        trace!(network = self.network, "Non-subscription message");
                        continue;
                    }
                    let Some(result) = parsed.pointer("/params/result") else {
                        continue;
                    };

                    let log: Log = serde_json::from_value(result.clone())
                        .map_err(|e| RelayerError::EventDecode(format!("log parse: {e}")))?;

                    trace!(
                        network = self.network,
                        block = log.block_number.unwrap_or_default(),
                        "Log received"
                    );

                    // The dispatcher drains this channel serially. A full
                    // queue means the next log would have to be dropped.
                    logs.try_send(log)
                        .map_err(|_| RelayerError::ChannelOverflow(self.network))?;
                }
                Ok(Message::Ping(data)) => {
                    debug!(network = self.network, "Ping received, answering");
                    write
                        .send(Message::Pong(data))
                        .await
                        .map_err(|e| self.error(format!("pong send: {e}")))?;
                }
                Ok(Message::Close(frame)) => {
                    return Err(self.error(format!("closed by server: {frame:?}")));
                }
                Ok(_) => {}
                Err(e) => return Err(self.error(e.to_string())),
            }
        }

        Err(self.error("stream ended"))
    }

    /// Wait for the eth_subscribe confirmation (id = 1).
    async fn wait_for_subscription<S>(&self, read: &mut S) -> Result<String>
    where
        S: StreamExt<Item = std::result::Result<Message, tokio_tungstenite::tungstenite::Error>>
            + Unpin,
    {
        let timeout = Duration::from_secs(10);
        let confirmation = async {
            while let Some(msg) = read.next().await {
                let Ok(Message::Text(text)) = msg else {
                    continue;
                };
                let parsed: serde_json::Value = serde_json::from_str(&text)
                    .map_err(|e| self.error(format!("JSON parse: {e}")))?;

                if parsed.get("id") == Some(&serde_json::json!(1)) {
                    if let Some(result) = parsed.get("result").and_then(|v| v.as_str()) {
                        return Ok(result.to_string());
                    }
                    if let Some(error) = parsed.get("error") {
                        return Err(self.error(format!("subscribe rejected: {error}")));
                    }
                }
            }
            Err(self.error("closed during subscribe"))
        };

        match tokio::time::timeout(timeout, confirmation).await {
            Ok(result) => result,
            Err(_) => Err(self.error("subscribe confirmation timeout")),
        }
    }
}
