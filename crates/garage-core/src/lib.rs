//! Vehicle ownership records and the maintenance forecasting engine.
//!
//! The engine modules (`lifecycle`, `due`, `tier`, `forecast`, `loan`,
//! `registration`, `warranty`) are pure functions over records already in
//! memory. `config`, `storage` and `snapshot` read and write the `.garage/`
//! record store that feeds them.

pub mod config;
pub mod due;
pub mod error;
pub mod forecast;
pub mod format;
pub mod lifecycle;
pub mod loan;
pub mod lock;
pub mod months;
pub mod registration;
pub mod snapshot;
pub mod storage;
pub mod tier;
pub mod types;
pub mod warranty;
