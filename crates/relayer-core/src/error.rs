use alloy_primitives::B256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayerError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(String),

    #[error("Failed to parse config file {0}: {1}")]
    ConfigParse(String, String),

    #[error("Keystore error: {0}")]
    Keystore(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Subscription error on {network} network: {message}")]
    Subscription {
        network: &'static str,
        message: String,
    },

    #[error("Log channel overflow on {0} network: subscription outpaced dispatch")]
    ChannelOverflow(&'static str),

    #[error("Event decode error: {0}")]
    EventDecode(String),

    #[error("Withdrawal message is {0} bytes, expected 104")]
    MalformedMessage(usize),

    #[error("Order not found: {0}")]
    OrderNotFound(B256),

    #[error("Possible unauthorized withdrawal: no record for exchange tx {0}")]
    UnauthorizedWithdrawal(B256),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Match submission error: {0}")]
    Submission(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RelayerError>;
