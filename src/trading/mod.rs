// src/trading/mod.rs
pub mod rules;
pub mod session;

pub use rules::RulesCache;
pub use session::{map_order, Session};
