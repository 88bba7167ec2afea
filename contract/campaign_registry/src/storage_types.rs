use soroban_sdk::{contracterror, contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    FeeBenefactor,
    FeeBasisPoints,
    Token,
    Gateway,
    CampaignTemplate,
    NextCampaignId,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    Contribution(CampaignId, Address),
    Custody(CampaignId, Address),
    CreatedAt(CampaignId),
    TotalCustody(Address), // sum of Custody(_, token) over all campaigns
}

pub type CampaignId = u64;

/// Lifecycle of a campaign, derived from the ledger clock on every read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[contracttype]
pub enum CampaignStatus {
    Open,
    Succeeded,
    Failed,
}

/// One fundraising effort.
///
/// `funding_goal` and `funding_max` are gross thresholds: they already include
/// the fee inflation applied by the registry at creation.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub owner: Address,
    pub admin: Address,
    pub gateway: Address,
    pub token: Address,
    pub deadline: u64,
    pub funding_goal: i128,
    pub funding_max: i128,
    pub fee_basis_points: u32,
    pub total_donations: i128,
    pub available_funds: i128,
    pub outstanding_pledges: i128, // sum of contributions not yet reclaimed
    pub title: String,
    pub description: String,
    pub initialized: bool,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdfundError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    CampaignNotFound = 3,
    NotGateway = 4,
    NotOwner = 5,
    NotAdmin = 6,
    /// Donation attempted at or after the deadline.
    CampaignFinished = 7,
    ExceedsFundingMax = 8,
    /// Withdrawal attempted while the campaign is still open.
    CampaignNotFinished = 9,
    GoalNotReached = 10,
    /// Goal reached and the owner's priority window is still running.
    GoalReachedWaitingPeriod = 11,
    NothingToWithdraw = 12,
    AdminWaitingPeriod = 13,
    DeadlineTooSoon = 14,
    DeadlineTooFar = 15,
    FundingMaxBelowGoal = 16,
    EmptyTitle = 17,
    EmptyDescription = 18,
    InvalidFee = 19,
    InvalidAmount = 20,
    InsufficientCustody = 21,
    ArithmeticOverflow = 22,
}

// Constants
pub const BASIS_POINTS: u32 = 10000; // 100% in basis points
pub const WEEK: u64 = 7 * 24 * 60 * 60;
pub const MIN_CAMPAIGN_DURATION: u64 = WEEK;
pub const MAX_CAMPAIGN_DURATION: u64 = 3 * 365 * 24 * 60 * 60; // 3 years
pub const OWNER_PRIORITY_WINDOW: u64 = 4 * WEEK;
pub const ADMIN_DORMANCY_PERIOD: u64 = 24 * WEEK;
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
