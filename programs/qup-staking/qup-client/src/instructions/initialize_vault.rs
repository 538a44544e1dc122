// initialize_vault: [discriminator: 8][bump: u8]
//
// Authority-only. Creates the vault state account ["vault", authority] and
// its token account ["token_vault", authority].

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{instruction::AccountMeta, pubkey::Pubkey};
use solana_system_interface::program::ID as SYSTEM_PROGRAM_ID;

use crate::constants::RENT_SYSVAR_ID;
use crate::errors::Result;
use crate::instructions::{instruction_data, EncodedInstruction, OperationKind};
use crate::pda::{derive_token_vault_pda, derive_vault_pda};

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct InitializeVaultArgs {
    pub bump: u8, // Canonical bump of the vault PDA
}

impl InitializeVaultArgs {
    pub const LEN: usize = 1;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeVaultAccounts {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub token_mint: Pubkey,
    pub token_vault: Pubkey,
}

impl InitializeVaultAccounts {
    /// Derive the vault PDAs for `authority`; also returns the vault bump.
    pub fn for_authority(
        authority: &Pubkey,
        token_mint: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<(Self, u8)> {
        let (vault, vault_bump) = derive_vault_pda(authority, program_id)?;
        let (token_vault, _) = derive_token_vault_pda(authority, program_id)?;

        let accounts = Self {
            vault,
            authority: *authority,
            token_mint: *token_mint,
            token_vault,
        };
        Ok((accounts, vault_bump))
    }
}

pub fn encode_initialize_vault(
    args: InitializeVaultArgs,
    accounts: &InitializeVaultAccounts,
) -> Result<EncodedInstruction> {
    Ok(EncodedInstruction {
        kind: OperationKind::InitializeVault,
        data: instruction_data(OperationKind::InitializeVault, &args)?,
        accounts: vec![
            AccountMeta::new(accounts.vault, false),
            AccountMeta::new(accounts.authority, true),
            AccountMeta::new_readonly(accounts.token_mint, false),
            AccountMeta::new(accounts.token_vault, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        ],
    })
}
