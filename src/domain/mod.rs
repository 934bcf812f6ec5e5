//! Domain types for the storefront core.
//!
//! This module provides:
//! - The `Order` entity and its status lifecycle enum
//! - Payment, proof, and purchased-item records
//! - Closed configuration types for the three boost product lines

pub mod boost;
pub mod order;

pub use boost::{
    Division, GameMode, LevelConfig, Platform, Rank, RankedConfig, RankedOptions, Region,
    WinBoostConfig, WinOptions, WinType,
};
pub use order::{Order, OrderItem, OrderProof, OrderStatus, PaymentInfo};
