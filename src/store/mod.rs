//! Record sources the reports can be computed from.

pub mod memory;
pub mod vault;

pub use memory::MemorySource;
pub use vault::VaultSource;
