// =============================================================================
// Read-only Views
// =============================================================================
// These instructions mutate nothing and hand their result back as return
// data, so clients can call them through simulation. Pending rewards are
// projected to the current clock without accruing the pool. A participant
// who never deposited reads as an empty position rather than an error.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, POSITION_SEED, REGISTRY_SEED};
use crate::engine;
use crate::error::StakingError;
use crate::state::{Pool, Position, Registry};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolInfo {
    pub id: u64,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_per_second: u64,
    pub last_accrual_time: i64,
    pub acc_reward_per_share: u128,
    pub total_staked: u64,
    pub min_stake_amount: u64,
    pub lock_period: i64,
    pub staker_count: u64,
    pub total_rewards_paid: u64,
    pub total_rewards_funded: u64,
}

impl From<&Pool> for PoolInfo {
    fn from(pool: &Pool) -> Self {
        Self {
            id: pool.id,
            stake_mint: pool.stake_mint,
            reward_mint: pool.reward_mint,
            reward_per_second: pool.reward_per_second,
            last_accrual_time: pool.last_accrual_time,
            acc_reward_per_share: pool.acc_reward_per_share,
            total_staked: pool.total_staked,
            min_stake_amount: pool.min_stake_amount,
            lock_period: pool.lock_period,
            staker_count: pool.staker_count,
            total_rewards_paid: pool.total_rewards_paid,
            total_rewards_funded: pool.total_rewards_funded,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PositionInfo {
    pub amount: u64,
    pub deposit_time: i64,
    pub active: bool,
    pub unlock_time: i64,
    pub pending_reward: u64,
    pub rewards_claimed: u64,
}

impl PositionInfo {
    pub fn new(pool: &Pool, position: &Position, now: i64) -> Result<Self> {
        Ok(Self {
            amount: position.amount,
            deposit_time: position.deposit_time,
            active: position.active,
            unlock_time: position.unlock_time(pool.lock_period)?,
            pending_reward: engine::pending_reward(pool, position, now)?,
            rewards_claimed: position.rewards_claimed,
        })
    }
}

// =============================================================================
// Accounts
// =============================================================================

#[derive(Accounts)]
pub struct RegistryView<'info> {
    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump
    )]
    pub registry: Account<'info, Registry>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct PoolView<'info> {
    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        constraint = registry.contains(pool_id) @ StakingError::PoolNotFound
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        seeds = [POOL_SEED, &pool_id.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64, participant: Pubkey)]
pub struct PositionView<'info> {
    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        constraint = registry.contains(pool_id) @ StakingError::PoolNotFound
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        seeds = [POOL_SEED, &pool_id.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: PDA checked by seeds; may be uninitialized, see `load_position`
    #[account(
        seeds = [POSITION_SEED, pool.key().as_ref(), participant.as_ref()],
        bump
    )]
    pub position: UncheckedAccount<'info>,
}

/// Read a position account, treating a never-created one as Empty
fn load_position(info: &AccountInfo) -> Result<Position> {
    let data = info.try_borrow_data()?;
    if !data.is_empty() {
        require_keys_eq!(*info.owner, crate::ID, ErrorCode::AccountOwnedByWrongProgram);
    }

    position_from_data(&data)
}

fn position_from_data(data: &[u8]) -> Result<Position> {
    if data.is_empty() {
        return Ok(Position::default());
    }

    Position::try_deserialize(&mut &data[..])
}

// =============================================================================
// Handlers
// =============================================================================

pub fn handler_pool_count(ctx: Context<RegistryView>) -> Result<u64> {
    Ok(ctx.accounts.registry.pool_count)
}

pub fn handler_pool_info(ctx: Context<PoolView>, _pool_id: u64) -> Result<PoolInfo> {
    let pool: &Pool = &ctx.accounts.pool;
    Ok(PoolInfo::from(pool))
}

pub fn handler_pending_reward(
    ctx: Context<PositionView>,
    _pool_id: u64,
    _participant: Pubkey,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let position = load_position(&ctx.accounts.position)?;
    engine::pending_reward(&ctx.accounts.pool, &position, now)
}

pub fn handler_position_info(
    ctx: Context<PositionView>,
    _pool_id: u64,
    _participant: Pubkey,
) -> Result<PositionInfo> {
    let now = Clock::get()?.unix_timestamp;
    let position = load_position(&ctx.accounts.position)?;
    PositionInfo::new(&ctx.accounts.pool, &position, now)
}
