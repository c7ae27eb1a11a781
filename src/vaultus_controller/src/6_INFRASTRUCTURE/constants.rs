//! Deployment constants for the Vaultus vault on Monad testnet

use std::time::Duration;

/// Chain every read and write is pinned to (Monad testnet)
pub const MONAD_TESTNET_CHAIN_ID: u64 = 10143;

/// VaultusVault deployment
pub const VAULT_ADDRESS: &str = "0x8b138e9f76669423be8664e1d4a6cd69427f4c3a";

/// MockUSDC, the deposited asset
pub const ASSET_TOKEN_ADDRESS: &str = "0x82062a5d0b885b6f18e5221c1d6bb4229ce8b007";

/// Yield pools the vault allocates across (informational only)
pub const NEVERLAND_POOL_ADDRESS: &str = "0x826538ad3fa76f94c0e97da2d1c7322044cdd979";
pub const TOWNSQUARE_POOL_ADDRESS: &str = "0x39a7566c74d3391e3b1cdbecf18bb65c0c01977a";

/// USDC base units (e6)
pub const ASSET_DECIMALS: u32 = 6;

/// Vault share base units (e18)
pub const SHARE_DECIMALS: u32 = 18;

/// Default fraction digits for dashboard amounts
pub const DISPLAY_FRACTION_DIGITS: u32 = 2;

/// Every tracked read is re-issued on this interval
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Terminal transitions kept for diagnostics
pub const MAX_ACTION_HISTORY: usize = 20;

/// Symbol used in user-facing messages for the deposited asset
pub const ASSET_SYMBOL: &str = "USDC";
