use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::events::RegistryInitialized;
use crate::state::Registry;

/// Create the program-wide registry
///
/// # Accounts
/// * `admin` - Becomes the registry admin (signer, payer)
/// * `registry` - Registry PDA to create
///
#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    /// Admin who will control pool creation and reward rates
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Registry PDA
    #[account(
        init,
        payer = admin,
        space = 8 + Registry::INIT_SPACE,
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, Registry>,

    pub system_program: Program<'info, System>,
}

pub fn handler_initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
    let registry = &mut ctx.accounts.registry;

    registry.admin = ctx.accounts.admin.key();
    registry.pool_count = 0;
    registry.bump = ctx.bumps.registry;

    emit!(RegistryInitialized {
        admin: registry.admin,
    });

    msg!("Registry initialized: admin={}", registry.admin);

    Ok(())
}
