use anchor_lang::prelude::*;

#[event]
pub struct RegistryInitialized {
    pub admin: Pubkey,
}

#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct PoolCreated {
    pub pool_id: u64,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_per_second: u64,
    pub min_stake_amount: u64,
    pub lock_period: i64,
    pub timestamp: i64,
}

#[event]
pub struct RewardRateUpdated {
    pub pool_id: u64,
    pub old_rate: u64,
    pub new_rate: u64,
    pub acc_reward_per_share: u128,
    pub timestamp: i64,
}

#[event]
pub struct PoolAccrued {
    pub pool_id: u64,
    pub acc_reward_per_share: u128,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardsFunded {
    pub pool_id: u64,
    pub funder: Pubkey,
    pub amount: u64,
    pub total_funded: u64,
}

#[event]
pub struct Deposited {
    pub pool_id: u64,
    pub user: Pubkey,
    pub amount: u64,
    pub position_amount: u64,
    pub total_staked: u64,
    pub unlock_time: i64,
}

#[event]
pub struct Withdrawn {
    pub pool_id: u64,
    pub user: Pubkey,
    pub amount: u64,
    pub position_amount: u64,
    pub total_staked: u64,
}

/// `paid` is below `pending` when the reward vault was short
#[event]
pub struct RewardHarvested {
    pub pool_id: u64,
    pub user: Pubkey,
    pub pending: u64,
    pub paid: u64,
}

#[event]
pub struct EmergencyWithdrawn {
    pub pool_id: u64,
    pub user: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
}
