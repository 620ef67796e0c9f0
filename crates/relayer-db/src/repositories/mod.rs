mod order;
mod trade;
mod wallet;
mod withdraw;

pub use order::OrderRepository;
pub use trade::TradeRepository;
pub use wallet::WalletRepository;
pub use withdraw::WithdrawalRepository;
