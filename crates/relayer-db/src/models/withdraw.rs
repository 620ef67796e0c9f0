use super::{addr_hex, hash_hex, parse_addr, parse_hash, parse_u256};
use crate::{DatabaseError, Result};
use relayer_core::types::{WithdrawMeta, WithdrawSign, WithdrawStatus};
use sqlx::FromRow;

/// Database model for the withdrawals table
#[derive(Debug, Clone, FromRow)]
pub struct DbWithdrawMeta {
    /// Primary key: exchange-network withdraw transaction hash
    pub tx_hash: String,
    pub recipient: String,
    pub token: String,
    pub amount: String,
    /// REQUESTED, SIGNED or PROCESSED
    pub status: String,
}

impl From<&WithdrawMeta> for DbWithdrawMeta {
    fn from(meta: &WithdrawMeta) -> Self {
        Self {
            tx_hash: hash_hex(&meta.tx_hash),
            recipient: addr_hex(&meta.recipient),
            token: addr_hex(&meta.token),
            amount: meta.amount.to_string(),
            status: meta.status.as_str().to_string(),
        }
    }
}

impl DbWithdrawMeta {
    pub fn try_into_meta(self) -> Result<WithdrawMeta> {
        let status = WithdrawStatus::parse(&self.status)
            .ok_or_else(|| DatabaseError::Decode(format!("bad withdraw status: {}", self.status)))?;
        Ok(WithdrawMeta {
            tx_hash: parse_hash(&self.tx_hash)?,
            recipient: parse_addr(&self.recipient)?,
            token: parse_addr(&self.token)?,
            amount: parse_u256(&self.amount)?,
            status,
        })
    }
}

/// Database model for the withdraw_signs table. Append-only.
#[derive(Debug, Clone, FromRow)]
pub struct DbWithdrawSign {
    pub tx_hash: String,
    pub message: String,
    pub signature: String,
    pub signer: String,
    pub signed_at: i64,
}

impl From<&WithdrawSign> for DbWithdrawSign {
    fn from(sign: &WithdrawSign) -> Self {
        Self {
            tx_hash: hash_hex(&sign.tx_hash),
            message: sign.message.clone(),
            signature: sign.signature.clone(),
            signer: addr_hex(&sign.signer),
            signed_at: sign.signed_at as i64,
        }
    }
}
