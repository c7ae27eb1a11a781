//! Static controller configuration
//!
//! Contract addresses and the target chain are fixed inputs. The defaults
//! describe the Monad testnet deployment; hosts pointing at another
//! deployment build their own `VaultConfig`.

use std::time::Duration;
use candid::{CandidType, Deserialize};
use serde::Serialize;
use crate::infrastructure::constants::*;
use crate::infrastructure::{ConfigError, Result, VaultError};
use crate::types::{Address, Pool};

/// uint256 holds at most 78 decimal digits
const MAX_DECIMALS: u32 = 77;

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub pool: Pool,
    pub address: Address,
}

#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Every read and write targets this chain
    pub chain_id: u64,
    pub vault: Address,
    pub asset_token: Address,
    pub asset_decimals: u32,
    pub share_decimals: u32,
    pub poll_interval_secs: u64,
    pub pools: Vec<PoolConfig>,
}

impl VaultConfig {
    pub fn new(chain_id: u64, vault: Address, asset_token: Address, pools: Vec<PoolConfig>) -> Self {
        Self {
            chain_id,
            vault,
            asset_token,
            asset_decimals: ASSET_DECIMALS,
            share_decimals: SHARE_DECIMALS,
            poll_interval_secs: POLL_INTERVAL.as_secs(),
            pools,
        }
    }

    /// Deployment on Monad testnet (chain 10143)
    pub fn monad_testnet() -> Result<Self> {
        let pools = vec![
            PoolConfig { pool: Pool::Neverland, address: Address::parse(NEVERLAND_POOL_ADDRESS)? },
            PoolConfig { pool: Pool::TownSquare, address: Address::parse(TOWNSQUARE_POOL_ADDRESS)? },
        ];

        let config = Self::new(
            MONAD_TESTNET_CHAIN_ID,
            Address::parse(VAULT_ADDRESS)?,
            Address::parse(ASSET_TOKEN_ADDRESS)?,
            pools,
        );
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for decimals in [self.asset_decimals, self.share_decimals] {
            if decimals > MAX_DECIMALS {
                return Err(VaultError::Config(ConfigError::InvalidDecimals { decimals }));
            }
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn pool_address(&self, pool: Pool) -> Option<&Address> {
        self.pools.iter().find(|p| p.pool == pool).map(|p| &p.address)
    }
}
