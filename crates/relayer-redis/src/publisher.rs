use crate::messages::{ChannelMessage, MessageType};
use crate::{RedisConnection, RedisError, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Pair-channel publisher. Delivery is best-effort fan-out; callers log
/// failures and continue.
pub struct Publisher {
    connection: Arc<RedisConnection>,
}

impl Publisher {
    pub fn new(connection: Arc<RedisConnection>) -> Self {
        Self { connection }
    }

    /// Wrap the payload in the channel envelope and PUBLISH it.
    pub async fn publish(
        &self,
        channel: &str,
        message_type: MessageType,
        payload: &impl Serialize,
    ) -> Result<()> {
        let envelope = ChannelMessage::new(message_type, payload)
            .map_err(|e| RedisError::Serialization(e.to_string()))?;
        let body = serde_json::to_string(&envelope)
            .map_err(|e| RedisError::Serialization(e.to_string()))?;

        let mut conn = self.connection.get_connection();
        let receivers: i64 = redis::cmd("PUBLISH")
            .arg(channel)
            .arg(body)
            .query_async(&mut conn)
            .await
            .map_err(|e| RedisError::Publish(e.to_string()))?;

        debug!(channel, ?message_type, receivers, "Published channel message");
        Ok(())
    }
}
