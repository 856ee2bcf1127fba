use anchor_lang::prelude::*;

use crate::error::StakingError;

/// Program-wide pool registry
/// PDA: ["registry"]
///
/// Holds the admin identity consulted by every admin-only instruction and
/// the sequential pool counter. Pool ids are handed out from `pool_count`
/// and never reused, so pools form an append-only sequence.
#[account]
#[derive(InitSpace, Default)]
pub struct Registry {
    /// Admin who can create pools and change reward rates
    pub admin: Pubkey,

    /// Number of pools created so far (also the next pool id)
    pub pool_count: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Registry {
    pub fn is_admin(&self, caller: &Pubkey) -> bool {
        self.admin == *caller
    }

    pub fn contains(&self, pool_id: u64) -> bool {
        pool_id < self.pool_count
    }

    /// Reserve the next pool id
    pub fn next_pool_id(&mut self) -> Result<u64> {
        let pool_id = self.pool_count;
        self.pool_count = self
            .pool_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(pool_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_ids_are_sequential() {
        let mut registry = Registry::default();

        assert_eq!(registry.next_pool_id().unwrap(), 0);
        assert_eq!(registry.next_pool_id().unwrap(), 1);
        assert_eq!(registry.next_pool_id().unwrap(), 2);
        assert_eq!(registry.pool_count, 3);

        assert!(registry.contains(2));
        assert!(!registry.contains(3));
    }

    #[test]
    fn test_is_admin() {
        let admin = Pubkey::new_from_array([1; 32]);
        let registry = Registry {
            admin,
            ..Default::default()
        };

        assert!(registry.is_admin(&admin));
        assert!(!registry.is_admin(&Pubkey::new_from_array([2; 32])));
    }
}
