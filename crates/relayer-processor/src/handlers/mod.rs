mod balance;
mod order_cancelled;
mod order_filled;
mod order_placed;
mod trade;
mod withdrawal;

pub use balance::BalanceUpdateHandler;
pub use order_cancelled::OrderCancelledHandler;
pub use order_filled::OrderFilledHandler;
pub use order_placed::OrderPlacedHandler;
pub use trade::TradeHandler;
pub use withdrawal::WithdrawalHandler;
