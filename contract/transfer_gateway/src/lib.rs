//! # Transfer Gateway
//!
//! Stateless relay between donors and campaign registries. A donor approves
//! this contract on the funding token, then calls [`TransferGateway::donate`];
//! the gateway pulls the tokens into the registry and credits the campaign in
//! the donor's name. Registries accept donations from nowhere else, so a credit
//! always corresponds to an allowance-backed pull.

#![no_std]
use soroban_sdk::{contract, contractclient, contractimpl, log, token, Address, Env};

mod storage_types;

#[cfg(test)]
mod test;

pub use storage_types::{CampaignRef, GatewayError};
use storage_types::{DataKey, TTL_INSTANCE};

/// Entry point a registry exposes to its gateway.
#[contractclient(name = "CampaignLedgerClient")]
pub trait CampaignLedger {
    fn donate(env: Env, gateway: Address, campaign_id: u64, donor: Address, amount: i128);
}

#[contract]
pub struct TransferGateway;

#[contractimpl]
impl TransferGateway {
    /// Bind the gateway to its funding token. `admin` signs the binding and is
    /// recorded as the deployer of record.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), GatewayError> {
        if env.storage().instance().has(&DataKey::Token) {
            return Err(GatewayError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
        Ok(())
    }

    /// Pull `amount` from `donor`'s allowance into the campaign's registry and
    /// credit the campaign.
    ///
    /// Allowance or balance shortfalls fail inside the token contract and
    /// abort the whole call.
    pub fn donate(
        env: Env,
        donor: Address,
        campaign: CampaignRef,
        amount: i128,
    ) -> Result<(), GatewayError> {
        donor.require_auth();
        if amount < 0 {
            return Err(GatewayError::InvalidAmount);
        }

        let token_address = read_token(&env)?;
        let gateway = env.current_contract_address();

        token::Client::new(&env, &token_address).transfer_from(
            &gateway,
            &donor,
            &campaign.registry,
            &amount,
        );
        CampaignLedgerClient::new(&env, &campaign.registry).donate(
            &gateway,
            &campaign.id,
            &donor,
            &amount,
        );

        log!(&env, "donation relayed", campaign.id, amount);
        Ok(())
    }

    pub fn token(env: Env) -> Result<Address, GatewayError> {
        read_token(&env)
    }

    pub fn admin(env: Env) -> Result<Address, GatewayError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(GatewayError::NotInitialized)
    }
}

fn read_token(env: &Env) -> Result<Address, GatewayError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(GatewayError::NotInitialized)
}
