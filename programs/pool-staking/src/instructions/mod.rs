// =============================================================================
// Instructions Module - Pool Staking
// =============================================================================

pub mod admin;
pub mod create_pool;
pub mod deposit;
pub mod emergency_withdraw;
pub mod fund_rewards;
pub mod harvest;
pub mod initialize_registry;
pub mod update_pool;
pub mod views;
pub mod withdraw;

pub use admin::*;
pub use create_pool::*;
pub use deposit::*;
pub use emergency_withdraw::*;
pub use fund_rewards::*;
pub use harvest::*;
pub use initialize_registry::*;
pub use update_pool::*;
pub use views::*;
pub use withdraw::*;
