// stake: [discriminator: 8][amount: u64][duration_days: u32]

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{instruction::AccountMeta, pubkey::Pubkey};
use solana_system_interface::program::ID as SYSTEM_PROGRAM_ID;

use crate::amount::MinorUnitAmount;
use crate::config::VaultConfig;
use crate::errors::Result;
use crate::instructions::{instruction_data, EncodedInstruction, OperationKind};
use crate::pda::{derive_user_stake_pda, owner_token_account};

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StakeArgs {
    pub amount: u64,        // Minor units
    pub duration_days: u32,
}

impl StakeArgs {
    pub const LEN: usize = 8 + 4;

    pub fn new(amount: MinorUnitAmount, duration_days: u32) -> Self {
        Self {
            amount: amount.get(),
            duration_days,
        }
    }
}

/// Accounts shared by stake, unstake and claim for one (owner, vault) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeAccounts {
    pub owner: Pubkey,
    pub owner_token_account: Pubkey,
    pub vault_token_account: Pubkey,
    pub user_stake: Pubkey,
    pub vault: Pubkey,
    pub token_mint: Pubkey,
}

impl StakeAccounts {
    /// Resolve every account for `owner` from the vault config.
    pub fn for_owner(config: &VaultConfig, owner: &Pubkey) -> Result<Self> {
        let (user_stake, _) = derive_user_stake_pda(owner, config.vault(), config.program_id())?;

        Ok(Self {
            owner: *owner,
            owner_token_account: owner_token_account(owner, config.token_mint()),
            vault_token_account: *config.vault_token_account(),
            user_stake,
            vault: *config.vault(),
            token_mint: *config.token_mint(),
        })
    }
}

pub fn encode_stake(args: StakeArgs, accounts: &StakeAccounts) -> Result<EncodedInstruction> {
    Ok(EncodedInstruction {
        kind: OperationKind::Stake,
        data: instruction_data(OperationKind::Stake, &args)?,
        accounts: vec![
            AccountMeta::new_readonly(accounts.owner, true),
            AccountMeta::new(accounts.owner_token_account, false),
            AccountMeta::new(accounts.vault_token_account, false),
            AccountMeta::new(accounts.user_stake, false),
            AccountMeta::new(accounts.vault, false),
            AccountMeta::new_readonly(accounts.token_mint, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
    })
}
