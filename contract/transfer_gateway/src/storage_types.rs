use soroban_sdk::{contracterror, contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Token,
}

/// A campaign as seen from outside its registry.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignRef {
    pub registry: Address,
    pub id: u64,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GatewayError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidAmount = 3,
}

pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
