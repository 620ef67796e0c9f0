mod order;
mod trade;
mod wallet;
mod withdraw;

pub use order::Order;
pub use trade::Trade;
pub use wallet::Wallet;
pub use withdraw::{
    WithdrawMeta, WithdrawSign, WithdrawStatus, WithdrawalMessage, WITHDRAWAL_MESSAGE_LEN,
};
