use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod transfers;

use instructions::*;

declare_id!("DrPAEwzp73MSbSJcg9Y3JnxJPUeN5iBjf8YRhbjjgnao");

#[program]
pub mod pool_staking {
    use super::*;

    /// Create the program-wide pool registry
    ///
    /// The signer becomes the admin allowed to create pools and set rates.
    pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
        instructions::initialize_registry::handler_initialize_registry(ctx)
    }

    /// Create a new staking pool (admin only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `reward_per_second` - Reward tokens emitted per second across the pool
    /// * `min_stake_amount` - Smallest amount a single deposit may add
    /// * `lock_period` - Seconds after the latest deposit before withdrawal
    ///
    /// # Returns
    /// * The new pool id
    pub fn create_pool(
        ctx: Context<CreatePool>,
        reward_per_second: u64,
        min_stake_amount: u64,
        lock_period: i64,
    ) -> Result<u64> {
        instructions::create_pool::handler_create_pool(ctx, reward_per_second, min_stake_amount, lock_period)
    }

    /// Change a pool's emission rate (admin only)
    ///
    /// Rewards up to now are settled at the old rate first.
    pub fn update_reward_rate(ctx: Context<UpdateRewardRate>, pool_id: u64, new_rate: u64) -> Result<()> {
        instructions::admin::update_reward_rate(ctx, pool_id, new_rate)
    }

    /// Transfer admin rights to a new address (admin only)
    pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
        instructions::admin::transfer_admin(ctx)
    }

    /// Add reward tokens to a pool's reward vault
    pub fn fund_rewards(ctx: Context<FundRewards>, pool_id: u64, amount: u64) -> Result<()> {
        instructions::fund_rewards::handler_fund_rewards(ctx, pool_id, amount)
    }

    /// Bring a pool's accumulator up to the current time
    pub fn update_pool(ctx: Context<UpdatePool>, pool_id: u64) -> Result<()> {
        instructions::update_pool::handler_update_pool(ctx, pool_id)
    }

    /// Stake tokens into a pool
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `pool_id` - Pool to stake into
    /// * `amount` - Amount of stake tokens (at least the pool minimum)
    ///
    pub fn deposit(ctx: Context<Deposit>, pool_id: u64, amount: u64) -> Result<()> {
        instructions::deposit::handler_deposit(ctx, pool_id, amount)
    }

    /// Withdraw staked tokens after the lock period
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `pool_id` - Pool to withdraw from
    /// * `amount` - Amount of stake tokens to withdraw
    ///
    pub fn withdraw(ctx: Context<Withdraw>, pool_id: u64, amount: u64) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx, pool_id, amount)
    }

    /// Claim pending rewards
    pub fn harvest(ctx: Context<Harvest>, pool_id: u64) -> Result<()> {
        instructions::harvest::handler_harvest(ctx, pool_id)
    }

    /// Withdraw the whole stake immediately, forfeiting pending rewards
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, pool_id: u64) -> Result<()> {
        instructions::emergency_withdraw::handler_emergency_withdraw(ctx, pool_id)
    }

    // =========================================================================
    // Views (return data only)
    // =========================================================================

    pub fn pool_count(ctx: Context<RegistryView>) -> Result<u64> {
        instructions::views::handler_pool_count(ctx)
    }

    pub fn pool_info(ctx: Context<PoolView>, pool_id: u64) -> Result<PoolInfo> {
        instructions::views::handler_pool_info(ctx, pool_id)
    }

    pub fn pending_reward(ctx: Context<PositionView>, pool_id: u64, participant: Pubkey) -> Result<u64> {
        instructions::views::handler_pending_reward(ctx, pool_id, participant)
    }

    pub fn position_info(
        ctx: Context<PositionView>,
        pool_id: u64,
        participant: Pubkey,
    ) -> Result<PositionInfo> {
        instructions::views::handler_position_info(ctx, pool_id, participant)
    }
}
