//! Campaign state machine.
//!
//! Every rule here is a pure function of the stored record and the ledger
//! timestamp handed in by the caller. Storage, token movement and
//! authorization live in the contract entry points.

use soroban_sdk::{Address, Env, String};

use crate::storage_types::{
    Campaign, CampaignStatus, CrowdfundError, ADMIN_DORMANCY_PERIOD, OWNER_PRIORITY_WINDOW,
};
use crate::utils::{after, fee_portion, prorate};

/// Split of an owner withdrawal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OwnerPayout {
    pub fee: i128,
    pub owner: i128,
}

impl Campaign {
    /// Blueprint every campaign is copied from. Holds the collaborators and
    /// nothing else until `init` runs on the copy.
    pub fn template(env: &Env, placeholder: Address, gateway: Address, token: Address) -> Self {
        Campaign {
            owner: placeholder.clone(),
            admin: placeholder,
            gateway,
            token,
            deadline: 0,
            funding_goal: 0,
            funding_max: 0,
            fee_basis_points: 0,
            total_donations: 0,
            available_funds: 0,
            outstanding_pledges: 0,
            title: String::from_str(env, ""),
            description: String::from_str(env, ""),
            initialized: false,
        }
    }

    /// One-time setup. Inputs are trusted; the registry validates them.
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        owner: Address,
        admin: Address,
        deadline: u64,
        funding_goal: i128,
        funding_max: i128,
        title: String,
        description: String,
        fee_basis_points: u32,
    ) -> Result<(), CrowdfundError> {
        if self.initialized {
            return Err(CrowdfundError::AlreadyInitialized);
        }
        self.owner = owner;
        self.admin = admin;
        self.deadline = deadline;
        self.funding_goal = funding_goal;
        self.funding_max = funding_max;
        self.title = title;
        self.description = description;
        self.fee_basis_points = fee_basis_points;
        self.initialized = true;
        Ok(())
    }

    pub fn status(&self, now: u64) -> CampaignStatus {
        if now < self.deadline {
            CampaignStatus::Open
        } else if self.total_donations >= self.funding_goal {
            CampaignStatus::Succeeded
        } else {
            CampaignStatus::Failed
        }
    }

    /// Accepts a pledge and returns the new total.
    pub fn record_donation(&mut self, now: u64, amount: i128) -> Result<i128, CrowdfundError> {
        if amount < 0 {
            return Err(CrowdfundError::InvalidAmount);
        }
        if now >= self.deadline {
            return Err(CrowdfundError::CampaignFinished);
        }
        let total = self
            .total_donations
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        if total > self.funding_max {
            return Err(CrowdfundError::ExceedsFundingMax);
        }

        self.total_donations = total;
        self.available_funds += amount;
        self.outstanding_pledges += amount;
        Ok(total)
    }

    /// Drains `available_funds` into a fee and an owner share.
    pub fn settle_owner(&mut self, now: u64) -> Result<OwnerPayout, CrowdfundError> {
        match self.status(now) {
            CampaignStatus::Open => return Err(CrowdfundError::CampaignNotFinished),
            CampaignStatus::Failed => return Err(CrowdfundError::GoalNotReached),
            CampaignStatus::Succeeded => {}
        }

        let fee = fee_portion(self.available_funds, self.fee_basis_points)?;
        let payout = OwnerPayout {
            fee,
            owner: self.available_funds - fee,
        };
        self.available_funds = 0;
        Ok(payout)
    }

    /// Refund owed to a donor who pledged `contribution`, which the caller
    /// then zeroes.
    ///
    /// The refund is the donor's share of whatever the owner left behind, so
    /// it equals `contribution` until the owner withdraws.
    pub fn settle_donor(&mut self, now: u64, contribution: i128) -> Result<i128, CrowdfundError> {
        if contribution <= 0 {
            return Err(CrowdfundError::NothingToWithdraw);
        }
        match self.status(now) {
            CampaignStatus::Open => return Err(CrowdfundError::CampaignNotFinished),
            CampaignStatus::Succeeded
                if now < after(self.deadline, OWNER_PRIORITY_WINDOW) =>
            {
                return Err(CrowdfundError::GoalReachedWaitingPeriod)
            }
            _ => {}
        }

        let refund = prorate(contribution, self.available_funds, self.outstanding_pledges)?;
        self.available_funds -= refund;
        self.outstanding_pledges -= contribution;
        Ok(refund)
    }

    pub fn admin_sweep_open(&self, now: u64) -> bool {
        now >= after(self.deadline, ADMIN_DORMANCY_PERIOD)
    }
}
