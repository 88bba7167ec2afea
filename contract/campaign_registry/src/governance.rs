//! Registry governance record.
//!
//! Campaigns never cache these values: every withdrawal reads the admin and
//! fee benefactor in force at call time, so a rotation applies to withdrawals
//! that were already pending.

use soroban_sdk::{Address, Env};

use crate::storage_types::{CrowdfundError, DataKey};

pub fn read_admin(env: &Env) -> Result<Address, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(CrowdfundError::NotInitialized)
}

pub fn read_fee_benefactor(env: &Env) -> Result<Address, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::FeeBenefactor)
        .ok_or(CrowdfundError::NotInitialized)
}

pub fn read_fee_basis_points(env: &Env) -> Result<u32, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::FeeBasisPoints)
        .ok_or(CrowdfundError::NotInitialized)
}

/// Checks `caller` is the current admin, then authenticates it.
pub fn require_admin(env: &Env, caller: &Address) -> Result<Address, CrowdfundError> {
    let admin = read_admin(env)?;
    if *caller != admin {
        return Err(CrowdfundError::NotAdmin);
    }
    caller.require_auth();
    Ok(admin)
}
