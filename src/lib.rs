pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod store;

pub use config::Config;
pub use domain::{
    LevelConfig, Order, OrderStatus, RankedConfig, WinBoostConfig,
};
pub use error::AppError;
pub use notify::{DiscordNotifier, Notifier, NullNotifier};
pub use orders::{Clock, OrderService, SystemClock};
pub use pricing::{calculate_level_price, calculate_ranked_price, calculate_win_boost_price};
pub use store::{MemoryOrderStore, OrderStore, SqliteOrderStore};
