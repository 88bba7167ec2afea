use soroban_sdk::{contracttype, Address, Env, Symbol};

use crate::storage_types::CampaignId;

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub campaign_id: CampaignId,
    pub creator: Address,
    pub deadline: u64,
    pub funding_goal: i128,
    pub funding_max: i128,
    pub fee_basis_points: u32,
}

#[contracttype]
#[derive(Clone)]
pub struct DonationEvent {
    pub campaign_id: CampaignId,
    pub donor: Address,
    pub amount: i128,
    pub total_donations: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct DepositEvent {
    pub campaign_id: CampaignId,
    pub from: Address,
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct OwnershipTransferredEvent {
    pub campaign_id: CampaignId,
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct OwnerWithdrawalEvent {
    pub campaign_id: CampaignId,
    pub owner: Address,
    pub amount: i128,
    pub fee_benefactor: Address,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct DonorWithdrawalEvent {
    pub campaign_id: CampaignId,
    pub donor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct AdminWithdrawalEvent {
    pub campaign_id: CampaignId,
    pub admin: Address,
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct SurplusSweptEvent {
    pub admin: Address,
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct GovernanceUpdatedEvent {
    pub previous: Address,
    pub current: Address,
}

pub fn emit_campaign_created(env: &Env, event: CampaignCreatedEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_created"),), event);
}

pub fn emit_donation(env: &Env, event: DonationEvent) {
    env.events().publish((Symbol::new(env, "donation"),), event);
}

pub fn emit_deposit(env: &Env, event: DepositEvent) {
    env.events().publish((Symbol::new(env, "deposit"),), event);
}

pub fn emit_ownership_transferred(env: &Env, event: OwnershipTransferredEvent) {
    env.events()
        .publish((Symbol::new(env, "ownership_transferred"),), event);
}

pub fn emit_owner_withdrawal(env: &Env, event: OwnerWithdrawalEvent) {
    env.events()
        .publish((Symbol::new(env, "owner_withdrawal"),), event);
}

pub fn emit_donor_withdrawal(env: &Env, event: DonorWithdrawalEvent) {
    env.events()
        .publish((Symbol::new(env, "donor_withdrawal"),), event);
}

pub fn emit_admin_withdrawal(env: &Env, event: AdminWithdrawalEvent) {
    env.events()
        .publish((Symbol::new(env, "admin_withdrawal"),), event);
}

pub fn emit_surplus_swept(env: &Env, event: SurplusSweptEvent) {
    env.events()
        .publish((Symbol::new(env, "surplus_swept"),), event);
}

pub fn emit_fee_updated(env: &Env, previous: u32, current: u32) {
    env.events()
        .publish((Symbol::new(env, "fee_updated"),), (previous, current));
}

pub fn emit_admin_transferred(env: &Env, event: GovernanceUpdatedEvent) {
    env.events()
        .publish((Symbol::new(env, "admin_transferred"),), event);
}

pub fn emit_benefactor_transferred(env: &Env, event: GovernanceUpdatedEvent) {
    env.events()
        .publish((Symbol::new(env, "benefactor_transferred"),), event);
}
