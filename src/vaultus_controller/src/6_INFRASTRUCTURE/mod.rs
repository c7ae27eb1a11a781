//! Infrastructure - Shared utilities and types
//! Foundation layer for all other modules

pub mod constants;
pub mod config;
pub mod errors;
pub mod math;
pub mod reentrancy;

// Re-export commonly used items
pub use constants::*;
pub use config::{PoolConfig, VaultConfig};
pub use errors::{VaultError, Result, AmountError, PreconditionError, ConfigError};
pub use math::{to_base_units, to_display_string, display_amount, format_units};
pub use reentrancy::{ActionSlots, SlotGuard};
