pub mod filter;
pub mod subscription;
pub mod watcher;

pub use filter::SubscriptionFilter;
pub use subscription::{LogSubscription, LOG_CHANNEL_CAPACITY};
pub use watcher::ChainWatcher;
