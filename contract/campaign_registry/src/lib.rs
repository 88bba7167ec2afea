//! # Campaign Registry
//!
//! Factory and escrow for token-denominated crowdfunding campaigns.
//!
//! Each campaign is an independent record copied from a shared template and
//! initialized once. Donations arrive only through the transfer gateway, which
//! pulls tokens from the donor's allowance into this contract and then credits
//! the campaign. After the deadline the campaign's derived status decides who
//! may withdraw:
//!
//! - **Succeeded**: the owner takes the available funds minus the protocol fee,
//!   which goes to the current fee benefactor. Four weeks after the deadline
//!   donors may reclaim whatever the owner has left.
//! - **Failed**: every donor reclaims their pledge.
//! - Twenty-four weeks after the deadline the current admin may sweep any
//!   token the campaign still holds.
//!
//! Tokens are custodied by this contract and tracked per campaign, so one
//! campaign can never pay out another campaign's funds. Anything the contract
//! holds beyond the tracked total can be swept by the admin at any time.

#![no_std]

mod campaign;
mod events;
mod governance;
mod storage_types;
mod utils;


pub use storage_types::{Campaign, CampaignId, CampaignStatus, CrowdfundError};

use soroban_sdk::{
    contract, contractclient, contractimpl, log, token, Address, Env, String, Vec,
};
use storage_types::{
    DataKey, PersistentKey, BASIS_POINTS, MAX_CAMPAIGN_DURATION, MIN_CAMPAIGN_DURATION,
    TTL_INSTANCE, TTL_PERSISTENT,
};
use utils::{after, inflate_for_fee};

/// The part of the transfer gateway the registry reads at initialization.
#[contractclient(name = "GatewayClient")]
pub trait GatewayInterface {
    fn token(env: Env) -> Address;
}

#[contract]
pub struct CampaignRegistry;

#[contractimpl]
impl CampaignRegistry {
    /// Initialize the registry with its governance roles and gateway.
    ///
    /// The funding token is taken from the gateway so both always agree.
    pub fn initialize(
        env: Env,
        admin: Address,
        fee_benefactor: Address,
        fee_basis_points: u32,
        gateway: Address,
    ) -> Result<(), CrowdfundError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(CrowdfundError::AlreadyInitialized);
        }
        if fee_basis_points >= BASIS_POINTS {
            return Err(CrowdfundError::InvalidFee);
        }
        admin.require_auth();

        let token = GatewayClient::new(&env, &gateway).token();
        let template = Campaign::template(
            &env,
            env.current_contract_address(),
            gateway.clone(),
            token.clone(),
        );

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::FeeBenefactor, &fee_benefactor);
        env.storage().instance().set(&DataKey::FeeBasisPoints, &fee_basis_points);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::Gateway, &gateway);
        env.storage().instance().set(&DataKey::CampaignTemplate, &template);
        env.storage().instance().set(&DataKey::NextCampaignId, &1u64);

        extend_instance(&env);
        log!(&env, "registry initialized", admin, fee_basis_points);
        Ok(())
    }

    /// Create a new campaign owned by `creator`.
    ///
    /// `funding_goal` and `funding_max` are the amounts the creator wants to
    /// net after fees; they are stored inflated by the current fee.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        deadline: u64,
        funding_goal: i128,
        funding_max: i128,
        title: String,
        description: String,
    ) -> Result<CampaignId, CrowdfundError> {
        creator.require_auth();

        let now = env.ledger().timestamp();
        if deadline < after(now, MIN_CAMPAIGN_DURATION) {
            return Err(CrowdfundError::DeadlineTooSoon);
        }
        if deadline > after(now, MAX_CAMPAIGN_DURATION) {
            return Err(CrowdfundError::DeadlineTooFar);
        }
        if funding_max < funding_goal {
            return Err(CrowdfundError::FundingMaxBelowGoal);
        }
        if funding_goal < 0 {
            return Err(CrowdfundError::InvalidAmount);
        }
        if title.len() == 0 {
            return Err(CrowdfundError::EmptyTitle);
        }
        if description.len() == 0 {
            return Err(CrowdfundError::EmptyDescription);
        }

        let admin = governance::read_admin(&env)?;
        let fee_basis_points = governance::read_fee_basis_points(&env)?;
        let mut campaign: Campaign = env
            .storage()
            .instance()
            .get(&DataKey::CampaignTemplate)
            .ok_or(CrowdfundError::NotInitialized)?;
        let campaign_id: CampaignId = env
            .storage()
            .instance()
            .get(&DataKey::NextCampaignId)
            .ok_or(CrowdfundError::NotInitialized)?;

        campaign.init(
            creator.clone(),
            admin,
            deadline,
            inflate_for_fee(funding_goal, fee_basis_points)?,
            inflate_for_fee(funding_max, fee_basis_points)?,
            title,
            description,
            fee_basis_points,
        )?;

        save_campaign(&env, campaign_id, &campaign);

        let created_at_key = PersistentKey::CreatedAt(campaign_id);
        env.storage().persistent().set(&created_at_key, &now);
        extend_persistent(&env, &created_at_key);

        env.storage()
            .instance()
            .set(&DataKey::NextCampaignId, &(campaign_id + 1));
        extend_instance(&env);

        events::emit_campaign_created(
            &env,
            events::CampaignCreatedEvent {
                campaign_id,
                creator,
                deadline,
                funding_goal: campaign.funding_goal,
                funding_max: campaign.funding_max,
                fee_basis_points,
            },
        );

        Ok(campaign_id)
    }

    /// Credit a donation already moved into custody by the gateway.
    pub fn donate(
        env: Env,
        gateway: Address,
        campaign_id: CampaignId,
        donor: Address,
        amount: i128,
    ) -> Result<(), CrowdfundError> {
        let mut campaign = get_campaign(&env, campaign_id)?;
        if gateway != campaign.gateway {
            return Err(CrowdfundError::NotGateway);
        }
        gateway.require_auth();

        let total_donations = campaign.record_donation(env.ledger().timestamp(), amount)?;

        let contribution_key = PersistentKey::Contribution(campaign_id, donor.clone());
        let contribution: i128 = env
            .storage()
            .persistent()
            .get(&contribution_key)
            .unwrap_or(0);
        env.storage()
            .persistent()
            .set(&contribution_key, &(contribution + amount));
        extend_persistent(&env, &contribution_key);

        credit_custody(&env, campaign_id, &campaign.token, amount)?;
        save_campaign(&env, campaign_id, &campaign);

        events::emit_donation(
            &env,
            events::DonationEvent {
                campaign_id,
                donor,
                amount,
                total_donations,
            },
        );
        Ok(())
    }

    /// Move tokens into a campaign's custody without crediting a donor.
    ///
    /// Such tokens count toward nothing and can only leave through the admin
    /// sweep.
    pub fn deposit(
        env: Env,
        from: Address,
        campaign_id: CampaignId,
        token: Address,
        amount: i128,
    ) -> Result<(), CrowdfundError> {
        from.require_auth();
        if amount <= 0 {
            return Err(CrowdfundError::InvalidAmount);
        }
        get_campaign(&env, campaign_id)?;

        token::Client::new(&env, &token).transfer(&from, &env.current_contract_address(), &amount);
        credit_custody(&env, campaign_id, &token, amount)?;

        events::emit_deposit(
            &env,
            events::DepositEvent {
                campaign_id,
                from,
                token,
                amount,
            },
        );
        Ok(())
    }

    /// Hand the campaign, and every owner right over pledged funds, to `new_owner`.
    pub fn transfer_campaign(
        env: Env,
        caller: Address,
        campaign_id: CampaignId,
        new_owner: Address,
    ) -> Result<(), CrowdfundError> {
        let mut campaign = get_campaign(&env, campaign_id)?;
        if caller != campaign.owner {
            return Err(CrowdfundError::NotOwner);
        }
        caller.require_auth();

        campaign.owner = new_owner.clone();
        save_campaign(&env, campaign_id, &campaign);

        events::emit_ownership_transferred(
            &env,
            events::OwnershipTransferredEvent {
                campaign_id,
                previous_owner: caller,
                new_owner,
            },
        );
        Ok(())
    }

    /// Pay out a successful campaign. Returns the owner's share.
    pub fn withdraw_owner(
        env: Env,
        caller: Address,
        campaign_id: CampaignId,
    ) -> Result<i128, CrowdfundError> {
        let mut campaign = get_campaign(&env, campaign_id)?;
        if caller != campaign.owner {
            return Err(CrowdfundError::NotOwner);
        }
        caller.require_auth();

        let payout = campaign.settle_owner(env.ledger().timestamp())?;
        let fee_benefactor = governance::read_fee_benefactor(&env)?;

        debit_custody(&env, campaign_id, &campaign.token, payout.fee + payout.owner)?;
        save_campaign(&env, campaign_id, &campaign);

        pay_out(&env, &campaign.token, &fee_benefactor, payout.fee);
        pay_out(&env, &campaign.token, &campaign.owner, payout.owner);

        log!(&env, "owner withdrawal", campaign_id, payout.owner, payout.fee);
        events::emit_owner_withdrawal(
            &env,
            events::OwnerWithdrawalEvent {
                campaign_id,
                owner: caller,
                amount: payout.owner,
                fee_benefactor,
                fee: payout.fee,
            },
        );
        Ok(payout.owner)
    }

    /// Reclaim a pledge from a failed campaign, or from a successful one the
    /// owner left untouched past the priority window. Returns the refund.
    pub fn withdraw_donor(
        env: Env,
        donor: Address,
        campaign_id: CampaignId,
    ) -> Result<i128, CrowdfundError> {
        donor.require_auth();
        let mut campaign = get_campaign(&env, campaign_id)?;

        let contribution_key = PersistentKey::Contribution(campaign_id, donor.clone());
        let contribution: i128 = env
            .storage()
            .persistent()
            .get(&contribution_key)
            .unwrap_or(0);

        let refund = campaign.settle_donor(env.ledger().timestamp(), contribution)?;

        env.storage().persistent().remove(&contribution_key);
        debit_custody(&env, campaign_id, &campaign.token, refund)?;
        save_campaign(&env, campaign_id, &campaign);

        pay_out(&env, &campaign.token, &donor, refund);

        log!(&env, "donor withdrawal", campaign_id, refund);
        events::emit_donor_withdrawal(
            &env,
            events::DonorWithdrawalEvent {
                campaign_id,
                donor,
                amount: refund,
            },
        );
        Ok(refund)
    }

    /// Sweep any token held for a long-abandoned campaign to the current admin.
    ///
    /// Leaves the campaign's `available_funds` bookkeeping untouched.
    pub fn withdraw_admin(
        env: Env,
        caller: Address,
        campaign_id: CampaignId,
        token: Address,
        amount: i128,
    ) -> Result<(), CrowdfundError> {
        let campaign = get_campaign(&env, campaign_id)?;
        if !campaign.admin_sweep_open(env.ledger().timestamp()) {
            return Err(CrowdfundError::AdminWaitingPeriod);
        }
        let admin = governance::require_admin(&env, &caller)?;
        if amount < 0 {
            return Err(CrowdfundError::InvalidAmount);
        }

        debit_custody(&env, campaign_id, &token, amount)?;
        pay_out(&env, &token, &admin, amount);

        log!(&env, "admin sweep", campaign_id, token, amount);
        events::emit_admin_withdrawal(
            &env,
            events::AdminWithdrawalEvent {
                campaign_id,
                admin,
                token,
                amount,
            },
        );
        Ok(())
    }

    /// Sweep tokens that reached the registry outside any campaign to the
    /// current admin. Returns the amount swept.
    ///
    /// Only the balance exceeding the sum of all campaign custody is
    /// reachable, so pledged funds stay where they are.
    pub fn withdraw_surplus(env: Env, caller: Address, token: Address) -> Result<i128, CrowdfundError> {
        let admin = governance::require_admin(&env, &caller)?;
        let surplus = read_surplus(&env, &token);
        if surplus <= 0 {
            return Err(CrowdfundError::NothingToWithdraw);
        }

        pay_out(&env, &token, &admin, surplus);

        log!(&env, "surplus sweep", token, surplus);
        events::emit_surplus_swept(
            &env,
            events::SurplusSweptEvent {
                admin,
                token,
                amount: surplus,
            },
        );
        Ok(surplus)
    }

    /// Set the fee snapshotted into campaigns created from now on.
    pub fn set_fee(env: Env, caller: Address, fee_basis_points: u32) -> Result<(), CrowdfundError> {
        governance::require_admin(&env, &caller)?;
        if fee_basis_points >= BASIS_POINTS {
            return Err(CrowdfundError::InvalidFee);
        }

        let previous = governance::read_fee_basis_points(&env)?;
        env.storage()
            .instance()
            .set(&DataKey::FeeBasisPoints, &fee_basis_points);
        extend_instance(&env);

        events::emit_fee_updated(&env, previous, fee_basis_points);
        Ok(())
    }

    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), CrowdfundError> {
        let previous = governance::require_admin(&env, &caller)?;
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        extend_instance(&env);

        events::emit_admin_transferred(
            &env,
            events::GovernanceUpdatedEvent {
                previous,
                current: new_admin,
            },
        );
        Ok(())
    }

    pub fn transfer_benefactor(
        env: Env,
        caller: Address,
        new_benefactor: Address,
    ) -> Result<(), CrowdfundError> {
        governance::require_admin(&env, &caller)?;
        let previous = governance::read_fee_benefactor(&env)?;
        env.storage()
            .instance()
            .set(&DataKey::FeeBenefactor, &new_benefactor);
        extend_instance(&env);

        events::emit_benefactor_transferred(
            &env,
            events::GovernanceUpdatedEvent {
                previous,
                current: new_benefactor,
            },
        );
        Ok(())
    }

    /// View functions
    pub fn get_all_campaigns(env: Env) -> Vec<CampaignId> {
        let mut campaigns = Vec::new(&env);
        for campaign_id in 1..read_next_campaign_id(&env) {
            campaigns.push_back(campaign_id);
        }
        campaigns
    }

    /// Creation timestamp of a campaign this registry created, if any.
    pub fn initialized_campaigns(env: Env, campaign_id: CampaignId) -> Option<u64> {
        env.storage()
            .persistent()
            .get(&PersistentKey::CreatedAt(campaign_id))
    }

    pub fn campaign_count(env: Env) -> u64 {
        read_next_campaign_id(&env) - 1
    }

    pub fn get_campaign(env: Env, campaign_id: CampaignId) -> Result<Campaign, CrowdfundError> {
        get_campaign(&env, campaign_id)
    }

    pub fn campaign_status(
        env: Env,
        campaign_id: CampaignId,
    ) -> Result<CampaignStatus, CrowdfundError> {
        Ok(get_campaign(&env, campaign_id)?.status(env.ledger().timestamp()))
    }

    pub fn donor_contribution(env: Env, campaign_id: CampaignId, donor: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&PersistentKey::Contribution(campaign_id, donor))
            .unwrap_or(0)
    }

    /// Amount of `token` held on behalf of a campaign.
    pub fn custody_balance(env: Env, campaign_id: CampaignId, token: Address) -> i128 {
        read_custody(&env, campaign_id, &token)
    }

    /// Amount of `token` held by the registry beyond every campaign's custody.
    pub fn surplus_balance(env: Env, token: Address) -> i128 {
        read_surplus(&env, &token)
    }

    pub fn campaign_template(env: Env) -> Result<Campaign, CrowdfundError> {
        env.storage()
            .instance()
            .get(&DataKey::CampaignTemplate)
            .ok_or(CrowdfundError::NotInitialized)
    }

    pub fn admin(env: Env) -> Result<Address, CrowdfundError> {
        governance::read_admin(&env)
    }

    pub fn fee_benefactor(env: Env) -> Result<Address, CrowdfundError> {
        governance::read_fee_benefactor(&env)
    }

    pub fn fee_basis_points(env: Env) -> Result<u32, CrowdfundError> {
        governance::read_fee_basis_points(&env)
    }

    pub fn token(env: Env) -> Result<Address, CrowdfundError> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(CrowdfundError::NotInitialized)
    }

    pub fn gateway(env: Env) -> Result<Address, CrowdfundError> {
        env.storage()
            .instance()
            .get(&DataKey::Gateway)
            .ok_or(CrowdfundError::NotInitialized)
    }
}

// Helper functions
fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn get_campaign(e: &Env, campaign_id: CampaignId) -> Result<Campaign, CrowdfundError> {
    e.storage()
        .persistent()
        .get(&PersistentKey::Campaign(campaign_id))
        .ok_or(CrowdfundError::CampaignNotFound)
}

fn save_campaign(e: &Env, campaign_id: CampaignId, campaign: &Campaign) {
    let key = PersistentKey::Campaign(campaign_id);
    e.storage().persistent().set(&key, campaign);
    extend_persistent(e, &key);
}

// Ids are handed out sequentially from 1, so the next id bounds the list.
fn read_next_campaign_id(e: &Env) -> CampaignId {
    e.storage()
        .instance()
        .get(&DataKey::NextCampaignId)
        .unwrap_or(1)
}

fn read_custody(e: &Env, campaign_id: CampaignId, token: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&PersistentKey::Custody(campaign_id, token.clone()))
        .unwrap_or(0)
}

fn read_total_custody(e: &Env, token: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&PersistentKey::TotalCustody(token.clone()))
        .unwrap_or(0)
}

fn write_total_custody(e: &Env, token: &Address, total: i128) {
    let key = PersistentKey::TotalCustody(token.clone());
    e.storage().persistent().set(&key, &total);
    extend_persistent(e, &key);
}

fn read_surplus(e: &Env, token: &Address) -> i128 {
    let held = token::Client::new(e, token).balance(&e.current_contract_address());
    held.saturating_sub(read_total_custody(e, token))
}

fn credit_custody(
    e: &Env,
    campaign_id: CampaignId,
    token: &Address,
    amount: i128,
) -> Result<(), CrowdfundError> {
    let key = PersistentKey::Custody(campaign_id, token.clone());
    let balance = read_custody(e, campaign_id, token)
        .checked_add(amount)
        .ok_or(CrowdfundError::ArithmeticOverflow)?;
    let total = read_total_custody(e, token)
        .checked_add(amount)
        .ok_or(CrowdfundError::ArithmeticOverflow)?;
    e.storage().persistent().set(&key, &balance);
    extend_persistent(e, &key);
    write_total_custody(e, token, total);
    Ok(())
}

fn debit_custody(
    e: &Env,
    campaign_id: CampaignId,
    token: &Address,
    amount: i128,
) -> Result<(), CrowdfundError> {
    let balance = read_custody(e, campaign_id, token);
    if amount > balance {
        return Err(CrowdfundError::InsufficientCustody);
    }
    let key = PersistentKey::Custody(campaign_id, token.clone());
    e.storage().persistent().set(&key, &(balance - amount));
    extend_persistent(e, &key);
    write_total_custody(e, token, read_total_custody(e, token) - amount);
    Ok(())
}

fn pay_out(e: &Env, token: &Address, recipient: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(e, token).transfer(&e.current_contract_address(), recipient, &amount);
    }
}
