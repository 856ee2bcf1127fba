use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Authorization Errors
    #[msg("Unauthorized: admin only")]
    Unauthorized,

    #[msg("Invalid authority")]
    InvalidAuthority,

    // Pool Errors
    #[msg("Pool not found")]
    PoolNotFound,

    #[msg("Lock period must be between zero and the maximum lock period")]
    InvalidLockPeriod,

    // Position Errors
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Amount below the pool's minimum stake")]
    BelowMinimumStake,

    #[msg("Insufficient staked balance")]
    InsufficientStake,

    #[msg("Position is still locked")]
    StillLocked,

    #[msg("No pending rewards to harvest")]
    NoPendingRewards,

    #[msg("Position has no active stake")]
    NoActivePosition,

    // Transfer Errors
    #[msg("Custody transfer failed")]
    TransferFailed,

    // Math Errors
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account Validation Errors
    #[msg("Invalid stake mint")]
    InvalidStakeMint,

    #[msg("Invalid reward mint")]
    InvalidRewardMint,

    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_sequential_from_6000() {
        assert_eq!(u32::from(StakingError::Unauthorized), 6000);
        assert_eq!(u32::from(StakingError::NoActivePosition), 6009);
        assert_eq!(u32::from(StakingError::TransferFailed), 6010);
        assert_eq!(u32::from(StakingError::MathOverflow), 6011);
        assert_eq!(u32::from(StakingError::InvalidTokenAccountOwner), 6016);
    }
}
