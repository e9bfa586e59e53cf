//! Balance resolution and report aggregation

pub mod balance;
pub mod balance_sheet;
pub mod cashflow;
pub mod config;
pub mod dates;
pub mod log;
pub mod model;
pub mod numeric;
pub mod palette;
pub mod report;
pub mod source;
pub mod summary;
pub mod trends;

// Re-export main types for cleaner imports
pub use balance::BalanceResolver;
pub use model::{
    BALANCE_GROUPS, BalanceGroup, BalanceItem, BalanceStatement, Entity, EntityRef, Ledger,
    Transaction,
};
pub use numeric::SortOrder;
pub use report::ReportEngine;
pub use source::RecordSource;
