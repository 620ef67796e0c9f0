use crate::error::{RelayerError, Result};
use alloy_primitives::{Address, B256, U256};

/// Lifecycle of a cross-chain withdrawal.
///
/// Advanced by events from both networks; transitions only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawStatus {
    /// Exchange-network Withdraw event seen
    Requested,
    /// Enough authority signatures collected (ReadyToWithdraw)
    Signed,
    /// Bridge-network payout observed
    Processed,
}

impl WithdrawStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Signed => "SIGNED",
            Self::Processed => "PROCESSED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "REQUESTED" => Some(Self::Requested),
            "SIGNED" => Some(Self::Signed),
            "PROCESSED" => Some(Self::Processed),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Requested => 0,
            Self::Signed => 1,
            Self::Processed => 2,
        }
    }

    /// Whether moving to `next` is a forward transition.
    pub fn can_advance_to(&self, next: WithdrawStatus) -> bool {
        next.rank() > self.rank()
    }
}

/// Cross-chain withdrawal record, keyed by the exchange-network withdraw
/// transaction hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawMeta {
    pub tx_hash: B256,
    pub recipient: Address,
    pub token: Address,
    pub amount: U256,
    pub status: WithdrawStatus,
}

/// One authority's signature over a withdrawal message. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawSign {
    pub tx_hash: B256,
    /// Hex-encoded withdrawal message bytes
    pub message: String,
    /// Hex-encoded authority signature
    pub signature: String,
    pub signer: Address,
    pub signed_at: u64,
}

/// Byte length of a serialized withdrawal message:
/// recipient (20) ++ token (20) ++ value (32) ++ tx hash (32).
pub const WITHDRAWAL_MESSAGE_LEN: usize = 104;

/// Withdrawal message as serialized by the exchange contract.
///
/// The layout must stay byte-compatible with the on-chain producer; the
/// relayer only consumes `tx_hash` but decodes the full message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalMessage {
    pub recipient: Address,
    pub token: Address,
    pub value: U256,
    pub tx_hash: B256,
}

impl WithdrawalMessage {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != WITHDRAWAL_MESSAGE_LEN {
            return Err(RelayerError::MalformedMessage(bytes.len()));
        }
        Ok(Self {
            recipient: Address::from_slice(&bytes[0..20]),
            token: Address::from_slice(&bytes[20..40]),
            value: U256::from_be_slice(&bytes[40..72]),
            tx_hash: B256::from_slice(&bytes[72..104]),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(WITHDRAWAL_MESSAGE_LEN);
        out.extend_from_slice(self.recipient.as_slice());
        out.extend_from_slice(self.token.as_slice());
        out.extend_from_slice(&self.value.to_be_bytes::<32>());
        out.extend_from_slice(self.tx_hash.as_slice());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            WithdrawStatus::Requested,
            WithdrawStatus::Signed,
            WithdrawStatus::Processed,
        ] {
            assert_eq!(WithdrawStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(WithdrawStatus::parse("CANCELLED"), None);
    }

    #[test]
    fn status_only_advances_forward() {
        use WithdrawStatus::*;
        assert!(Requested.can_advance_to(Signed));
        assert!(Requested.can_advance_to(Processed));
        assert!(Signed.can_advance_to(Processed));

        assert!(!Signed.can_advance_to(Requested));
        assert!(!Processed.can_advance_to(Signed));
        // Redelivery of the same event is a no-op, not a regression.
        assert!(!Signed.can_advance_to(Signed));
    }

    #[test]
    fn message_round_trips() {
        let message = WithdrawalMessage {
            recipient: Address::repeat_byte(0x0a),
            token: Address::repeat_byte(0x0b),
            value: U256::from(50u64),
            tx_hash: B256::repeat_byte(0xcc),
        };
        let bytes = message.encode();
        assert_eq!(bytes.len(), WITHDRAWAL_MESSAGE_LEN);
        assert_eq!(WithdrawalMessage::parse(&bytes).unwrap(), message);
    }

    #[test]
    fn truncated_message_is_rejected() {
        let err = WithdrawalMessage::parse(&[0u8; 72]).unwrap_err();
        assert!(matches!(err, RelayerError::MalformedMessage(72)));
    }
}
