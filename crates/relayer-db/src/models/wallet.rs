use super::addr_hex;
use relayer_core::types::Wallet;
use sqlx::FromRow;

/// Database model for the wallets table. Big integers travel as decimal
/// strings and are stored as NUMERIC(78,0).
#[derive(Debug, Clone, FromRow)]
pub struct DbWallet {
    pub token: String,
    pub owner: String,
    pub balance: String,
    pub escrow_balance: String,
}

impl From<&Wallet> for DbWallet {
    fn from(wallet: &Wallet) -> Self {
        Self {
            token: addr_hex(&wallet.token),
            owner: addr_hex(&wallet.owner),
            balance: wallet.balance.to_string(),
            escrow_balance: wallet.escrow_balance.to_string(),
        }
    }
}
