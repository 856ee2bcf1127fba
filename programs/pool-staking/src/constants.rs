// =============================================================================
// Pool Staking Constants
// =============================================================================

// PDA Seeds
pub const REGISTRY_SEED: &[u8] = b"registry";
pub const POOL_SEED: &[u8] = b"pool";
pub const POSITION_SEED: &[u8] = b"position";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

// Precision for the accumulated reward per share (12 decimals)
// acc_reward_per_share and reward_debt are stored scaled by this factor
pub const ACC_PRECISION: u128 = 1_000_000_000_000; // 10^12

// Longest lock a pool may promise to its stakers (365 days)
pub const MAX_LOCK_PERIOD: i64 = 365 * 24 * 60 * 60;
